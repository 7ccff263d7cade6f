//! Pluggable block-cipher + hash binding for the keystream and header
//! IV derivation (C2). The only binding implemented here is the
//! default: AES (128-bit block, 128/192/256-bit key) and SHA-256.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// AES block size in bytes. Fixed regardless of key length.
pub const AES_BLOCK_SIZE: usize = 16;

/// Legal AES key sizes, in bits, largest first — the ladder
/// `KeyStretcher::get_key` decrements from.
pub const AES_KEY_SIZES_BITS: &[usize] = &[256, 192, 128];

pub(crate) enum AesBlockCipher {
    Aes128(aes::Aes128),
    Aes192(aes::Aes192),
    Aes256(aes::Aes256),
}

impl AesBlockCipher {
    pub(crate) fn new(key: &[u8]) -> Result<Self> {
        match key.len() {
            16 => Ok(Self::Aes128(aes::Aes128::new(GenericArray::from_slice(key)))),
            24 => Ok(Self::Aes192(aes::Aes192::new(GenericArray::from_slice(key)))),
            32 => Ok(Self::Aes256(aes::Aes256::new(GenericArray::from_slice(key)))),
            len => Err(Error::InvalidKeySize(len)),
        }
    }

    pub(crate) fn encrypt_block(&self, block: &mut [u8; AES_BLOCK_SIZE]) {
        let mut ga = GenericArray::clone_from_slice(block);
        match self {
            Self::Aes128(c) => c.encrypt_block(&mut ga),
            Self::Aes192(c) => c.encrypt_block(&mut ga),
            Self::Aes256(c) => c.encrypt_block(&mut ga),
        }
        block.copy_from_slice(&ga);
    }
}

pub(crate) fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Names the block cipher + hash pair a [`crate::cipher::CipherStream`]
/// is built from. Only the default (AES + SHA-256) binding is
/// implemented; the type exists as the seam spec.md's C2 describes,
/// ready for a second binding without disturbing callers.
#[derive(Debug, Clone, Copy)]
pub struct CipherFactory {
    block_size: usize,
    key_sizes_bits: &'static [usize],
}

impl CipherFactory {
    pub const fn aes_sha256() -> Self {
        Self {
            block_size: AES_BLOCK_SIZE,
            key_sizes_bits: AES_KEY_SIZES_BITS,
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn key_sizes_bits(&self) -> &'static [usize] {
        self.key_sizes_bits
    }
}

impl Default for CipherFactory {
    fn default() -> Self {
        Self::aes_sha256()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_key_length() {
        let err = AesBlockCipher::new(&[0u8; 10]).unwrap_err();
        assert!(matches!(err, Error::InvalidKeySize(10)));
    }

    #[test]
    fn accepts_all_three_key_lengths() {
        assert!(AesBlockCipher::new(&[0u8; 16]).is_ok());
        assert!(AesBlockCipher::new(&[0u8; 24]).is_ok());
        assert!(AesBlockCipher::new(&[0u8; 32]).is_ok());
    }

    #[test]
    fn default_factory_is_aes_sha256() {
        let factory = CipherFactory::default();
        assert_eq!(factory.block_size(), 16);
        assert_eq!(factory.key_sizes_bits(), &[256, 192, 128]);
    }
}
