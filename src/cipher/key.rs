//! Password-based key stretching (PBKDF2, RFC 2898) — C1.

use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;

use crate::cipher::password::Password;
use crate::cipher::rng::fill_random;
use crate::error::{Error, Result};

pub struct KeyStretcher {
    password: Password,
    salt: Vec<u8>,
    iterations: u32,
}

impl KeyStretcher {
    pub const DEFAULT_ITERATIONS: u32 = 10_000;
    pub const MIN_SALT_LEN: usize = 8;
    pub const DEFAULT_SALT_LEN: usize = 16;

    /// For encrypting: generates a salt if none is given, and rejects
    /// a caller-supplied salt under the minimum length.
    pub fn new(password: Password, salt: Option<Vec<u8>>, iterations: u32) -> Result<Self> {
        if password.is_empty() {
            return Err(Error::EmptyPassword);
        }
        let salt = match salt {
            Some(salt) if salt.len() < Self::MIN_SALT_LEN => return Err(Error::ShortSalt),
            Some(salt) => salt,
            None => {
                let mut salt = vec![0u8; Self::DEFAULT_SALT_LEN];
                fill_random(&mut salt);
                salt
            }
        };
        Ok(Self { password, salt, iterations })
    }

    /// For decrypting: the salt already came off the wire, so there's
    /// nothing left to validate about its length.
    pub fn from_salt(password: Password, salt: Vec<u8>, iterations: u32) -> Result<Self> {
        if password.is_empty() {
            return Err(Error::EmptyPassword);
        }
        Ok(Self { password, salt, iterations })
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Chooses the largest key size, in bits, not exceeding
    /// `max_key_size_bits` (`None` = no cap) from `sizes_bits`, and
    /// derives that many bytes via PBKDF2-HMAC-SHA1.
    pub fn get_key(&self, sizes_bits: &[usize], max_key_size_bits: Option<usize>) -> Result<Vec<u8>> {
        let cap = max_key_size_bits.unwrap_or(usize::MAX);
        let bits = sizes_bits
            .iter()
            .copied()
            .filter(|&size| size <= cap)
            .max()
            .ok_or(Error::NoLegalKeySize)?;
        if bits % 8 != 0 {
            return Err(Error::InvalidKeySizeBits(bits));
        }

        let mut key = vec![0u8; bits / 8];
        pbkdf2_hmac::<Sha1>(self.password.as_bytes(), &self.salt, self.iterations, &mut key);
        Ok(key)
    }
}
