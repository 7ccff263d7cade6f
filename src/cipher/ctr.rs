//! CTR-mode keystream generator (C4).
//!
//! Not textbook CTR: the counter block is `nonce-prefix(min(N, 8)) ++
//! zeroes`, with a big-endian counter XORed into its last bytes, and
//! the keystream is produced in batches of `BLOCKS_PER_BATCH` ECB
//! encryptions, cached as `[start_block, end_block)`.

use zeroize::Zeroize;

use super::factory::{AES_BLOCK_SIZE, AesBlockCipher, sha256};
use super::header::fill;
use crate::error::Result;

pub const BLOCK_SIZE: usize = AES_BLOCK_SIZE;

const BATCH_BYTES: usize = 4096;
const BLOCKS_PER_BATCH: u64 = (BATCH_BYTES / BLOCK_SIZE) as u64;

pub struct CtrKeystream {
    cipher: AesBlockCipher,
    ctr_seed: [u8; BLOCK_SIZE],
    pad: Vec<u8>,
    start_block: u64,
    end_block: u64,
}

impl CtrKeystream {
    pub fn new(key: &[u8], nonce: &[u8], salt: &[u8]) -> Result<Self> {
        let cipher = AesBlockCipher::new(key)?;

        // Derived for parity with the header's documented IV; a true
        // ECB permutation has no IV to feed it, so it's otherwise unused.
        let _iv = derive_iv(nonce, salt);

        let mut ctr_seed = [0u8; BLOCK_SIZE];
        let prefix_len = nonce.len().min(8);
        ctr_seed[..prefix_len].copy_from_slice(&nonce[..prefix_len]);

        Ok(Self {
            cipher,
            ctr_seed,
            pad: Vec::new(),
            start_block: 0,
            end_block: 0,
        })
    }

    fn ensure_batch(&mut self, block_index: u64) {
        if self.start_block <= block_index && block_index < self.end_block {
            return;
        }

        let start_block = (block_index / BLOCKS_PER_BATCH) * BLOCKS_PER_BATCH;
        let mut pad = vec![0u8; BATCH_BYTES];

        for i in 0..BLOCKS_PER_BATCH {
            let counter = start_block + i + 1;
            let mut block = self.ctr_seed;
            xor_counter(&mut block, counter);
            self.cipher.encrypt_block(&mut block);

            let offset = (i as usize) * BLOCK_SIZE;
            pad[offset..offset + BLOCK_SIZE].copy_from_slice(&block);
        }

        self.pad.zeroize();
        self.pad = pad;
        self.start_block = start_block;
        self.end_block = start_block + BLOCKS_PER_BATCH;
    }

    /// XORs `data` in place with the keystream starting at plaintext
    /// byte offset `position`. CTR is its own inverse, so this single
    /// method serves both encryption and decryption.
    pub fn transform(&mut self, mut position: u64, mut data: &mut [u8]) {
        while !data.is_empty() {
            let block_index = position / BLOCK_SIZE as u64;
            self.ensure_batch(block_index);

            let pad_offset = (position % BATCH_BYTES as u64) as usize;
            let run = (BATCH_BYTES - pad_offset).min(data.len());

            for (byte, pad_byte) in data[..run].iter_mut().zip(&self.pad[pad_offset..pad_offset + run]) {
                *byte ^= pad_byte;
            }

            position += run as u64;
            data = &mut data[run..];
        }
    }

    /// Drops the cached batch, forcing the next `transform` call to
    /// recompute it. Used when explicitly disposing the owning stream
    /// ahead of scope end.
    pub fn clear(&mut self) {
        self.pad.zeroize();
        self.pad.clear();
        self.start_block = 0;
        self.end_block = 0;
    }
}

impl Drop for CtrKeystream {
    fn drop(&mut self) {
        self.pad.zeroize();
        self.ctr_seed.zeroize();
    }
}

fn xor_counter(block: &mut [u8; BLOCK_SIZE], mut counter: u64) {
    let mut idx = BLOCK_SIZE;
    while counter != 0 && idx > 0 {
        idx -= 1;
        block[idx] ^= (counter & 0xFF) as u8;
        counter >>= 8;
    }
}

/// `iv = fill(zeroes(block_size), SHA256(nonce ++ salt))`.
fn derive_iv(nonce: &[u8], salt: &[u8]) -> [u8; BLOCK_SIZE] {
    let mut seed = Vec::with_capacity(nonce.len() + salt.len());
    seed.extend_from_slice(nonce);
    seed.extend_from_slice(salt);
    let hash = sha256(&seed);

    let mut iv = [0u8; BLOCK_SIZE];
    fill(&mut iv, &hash);
    iv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> Vec<u8> {
        vec![0x42u8; 16]
    }

    #[test]
    fn transform_is_its_own_inverse() {
        let nonce = vec![1u8; 16];
        let salt = vec![2u8; 16];
        let plaintext = b"the quick brown fox jumps over the lazy dog".to_vec();

        let mut encrypted = plaintext.clone();
        CtrKeystream::new(&key(), &nonce, &salt)
            .unwrap()
            .transform(0, &mut encrypted);
        assert_ne!(encrypted, plaintext);

        let mut decrypted = encrypted.clone();
        CtrKeystream::new(&key(), &nonce, &salt)
            .unwrap()
            .transform(0, &mut decrypted);
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn transform_is_position_independent() {
        let nonce = vec![1u8; 16];
        let salt = vec![2u8; 16];
        let plaintext = vec![0xABu8; 10_000];

        let mut whole = plaintext.clone();
        CtrKeystream::new(&key(), &nonce, &salt)
            .unwrap()
            .transform(0, &mut whole);

        let mut piecewise = plaintext.clone();
        let mut ctr = CtrKeystream::new(&key(), &nonce, &salt).unwrap();
        let mut offset = 0;
        for chunk_len in [37, 4059, 4096, 1807, 1] {
            let end = (offset + chunk_len).min(piecewise.len());
            ctr.transform(offset as u64, &mut piecewise[offset..end]);
            offset = end;
        }

        assert_eq!(whole, piecewise);
    }

    #[test]
    fn batch_crossing_produces_same_bytes_as_a_single_pass() {
        let nonce = vec![3u8; 16];
        let salt = vec![4u8; 16];
        // Spans two batches (4096 bytes each) plus a remainder.
        let plaintext = vec![0u8; 9000];

        let mut a = plaintext.clone();
        CtrKeystream::new(&key(), &nonce, &salt)
            .unwrap()
            .transform(0, &mut a);

        let mut b = plaintext.clone();
        let mut ctr = CtrKeystream::new(&key(), &nonce, &salt).unwrap();
        ctr.transform(0, &mut b[..5000]);
        ctr.transform(5000, &mut b[5000..]);

        assert_eq!(a, b);
    }

    #[test]
    fn different_nonces_give_different_keystreams() {
        let salt = vec![2u8; 16];
        let plaintext = vec![0u8; 64];

        let mut a = plaintext.clone();
        CtrKeystream::new(&key(), &vec![1u8; 16], &salt)
            .unwrap()
            .transform(0, &mut a);

        let mut b = plaintext;
        CtrKeystream::new(&key(), &vec![9u8; 16], &salt)
            .unwrap()
            .transform(0, &mut b);

        assert_ne!(a, b);
    }

    #[test]
    fn rejects_invalid_key_length() {
        let err = CtrKeystream::new(&[0u8; 10], &[1u8; 16], &[2u8; 16]).unwrap_err();
        assert!(matches!(err, crate::error::Error::InvalidKeySize(10)));
    }
}
