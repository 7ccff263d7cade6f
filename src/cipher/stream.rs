//! `CipherStream` (C5): a filter over an arbitrary stream that
//! transparently encrypts on write and decrypts on read.

use std::io::{self, Read, Seek, SeekFrom, Write};

use super::ctr::CtrKeystream;
use super::factory::CipherFactory;
use super::header;
use super::key::KeyStretcher;
use super::password::Password;
use crate::error::{Error, Result};

/// What to derive the stream's key from: a password (stretched via
/// [`KeyStretcher`]) or an already-derived key.
pub enum KeyMaterial {
    Password(Password),
    Key(Vec<u8>),
}

impl From<Password> for KeyMaterial {
    fn from(password: Password) -> Self {
        Self::Password(password)
    }
}

impl From<&str> for KeyMaterial {
    fn from(password: &str) -> Self {
        Self::Password(Password::new(password))
    }
}

impl From<String> for KeyMaterial {
    fn from(password: String) -> Self {
        Self::Password(Password::new(password))
    }
}

impl From<Vec<u8>> for KeyMaterial {
    fn from(key: Vec<u8>) -> Self {
        Self::Key(key)
    }
}

/// Allows an underlying stream to be truncated, needed by
/// [`CipherStream::set_length`]. Implemented for the carriers this
/// crate actually uses; any other `Seek` type simply won't have
/// `set_length` available, which is the Rust-idiomatic analogue of a
/// "seek not supported" runtime error.
pub trait Truncate {
    fn truncate(&mut self, size: u64) -> io::Result<()>;
}

impl Truncate for std::fs::File {
    fn truncate(&mut self, size: u64) -> io::Result<()> {
        self.set_len(size)
    }
}

impl Truncate for io::Cursor<Vec<u8>> {
    fn truncate(&mut self, size: u64) -> io::Result<()> {
        self.get_mut().resize(size as usize, 0);
        Ok(())
    }
}

/// A filter stream that encrypts plaintext written through it and
/// decrypts ciphertext read through it, via the CTR keystream (C4)
/// framed by a header (C3). No authentication: a wrong password or
/// corrupted ciphertext decrypts silently to garbage.
pub struct CipherStream<S> {
    inner: Option<S>,
    ctr: CtrKeystream,
    nonce: Vec<u8>,
    salt: Vec<u8>,
    block_len: usize,
    start_position: u64,
    position: u64,
}

impl<S> CipherStream<S> {
    pub fn nonce(&self) -> &[u8] {
        &self.nonce
    }

    pub fn password_salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn block_length(&self) -> usize {
        self.block_len
    }

    pub fn min_nonce_length(&self) -> usize {
        self.block_len / 2
    }

    pub fn max_nonce_length(&self) -> usize {
        self.block_len
    }

    /// The plaintext-addressed position; distinct from the underlying
    /// stream's position, which is offset by the header.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.is_none()
    }

    /// Drops the underlying stream and zeroes the keystream's cached
    /// pad immediately, ahead of the struct's own `Drop`.
    pub fn dispose(&mut self) {
        self.inner.take();
        self.ctr.clear();
    }

    /// Recovers the underlying stream, if the `CipherStream` hasn't
    /// already been disposed.
    pub fn into_inner(mut self) -> Option<S> {
        self.inner.take()
    }
}

impl<S: Write + Seek> CipherStream<S> {
    /// Writes a fresh header (generating a nonce and/or salt as
    /// needed) and returns a stream ready to encrypt from plaintext
    /// position 0.
    pub fn create(
        mut underlying: S,
        key: impl Into<KeyMaterial>,
        factory: CipherFactory,
        nonce: Option<Vec<u8>>,
        salt: Option<Vec<u8>>,
    ) -> Result<Self> {
        let block_len = factory.block_size();

        let (derived_key, salt) = match key.into() {
            KeyMaterial::Password(password) => {
                let stretcher = KeyStretcher::new(password, salt, KeyStretcher::DEFAULT_ITERATIONS)?;
                let key = stretcher.get_key(factory.key_sizes_bits(), None)?;
                (key, stretcher.salt().to_vec())
            }
            KeyMaterial::Key(key) => {
                let salt = match salt {
                    Some(salt) if salt.len() < KeyStretcher::MIN_SALT_LEN => {
                        return Err(Error::ShortSalt);
                    }
                    Some(salt) => salt,
                    None => {
                        let mut salt = vec![0u8; KeyStretcher::DEFAULT_SALT_LEN];
                        super::rng::fill_random(&mut salt);
                        salt
                    }
                };
                (key, salt)
            }
        };

        let nonce = match nonce {
            Some(nonce) => nonce,
            None => {
                let max_len = (u16::MAX as usize).saturating_sub(salt.len() + header::H_OV);
                let mut buf = vec![0u8; max_len.min(block_len)];
                super::rng::fill_random(&mut buf);
                buf
            }
        };

        if nonce.len() < block_len / 2 || nonce.len() > block_len {
            return Err(Error::InvalidNonceLength);
        }

        if header::H_OV + nonce.len() + salt.len() > u16::MAX as usize {
            return Err(Error::SaltTooLarge);
        }

        header::write(&mut underlying, &nonce, &salt)?;
        let start_position = underlying.stream_position()?;

        let ctr = CtrKeystream::new(&derived_key, &nonce, &salt)?;

        Ok(Self {
            inner: Some(underlying),
            ctr,
            nonce,
            salt,
            block_len,
            start_position,
            position: 0,
        })
    }
}

impl<S: Read + Seek> CipherStream<S> {
    /// Reads and validates the header, then returns a stream ready to
    /// decrypt from plaintext position 0.
    pub fn open(mut underlying: S, key: impl Into<KeyMaterial>, factory: CipherFactory) -> Result<Self> {
        let block_len = factory.block_size();
        let key = key.into();
        if let KeyMaterial::Password(password) = &key {
            if password.is_empty() {
                return Err(Error::EmptyPassword);
            }
        }

        let read_began_at = underlying.stream_position()?;

        let header = match header::read(&mut underlying, block_len) {
            Ok(header) => header,
            Err(err) => {
                if underlying.seek(SeekFrom::Start(read_began_at)).is_err() {
                    log::warn!("failed to restore stream position after a rejected header");
                }
                return Err(err);
            }
        };

        let derived_key = match key {
            KeyMaterial::Password(password) => {
                let stretcher =
                    KeyStretcher::from_salt(password, header.salt.clone(), KeyStretcher::DEFAULT_ITERATIONS)?;
                stretcher.get_key(factory.key_sizes_bits(), None)?
            }
            KeyMaterial::Key(key) => key,
        };

        let start_position = underlying.stream_position()?;
        let ctr = CtrKeystream::new(&derived_key, &header.nonce, &header.salt)?;

        Ok(Self {
            inner: Some(underlying),
            ctr,
            nonce: header.nonce,
            salt: header.salt,
            block_len,
            start_position,
            position: 0,
        })
    }
}

impl<S: Seek> CipherStream<S> {
    /// The plaintext length: the underlying stream's length minus the
    /// header overhead.
    pub fn length(&mut self) -> io::Result<u64> {
        let inner = self.inner.as_mut().ok_or_else(disposed_io_error)?;
        let current = inner.stream_position()?;
        let end = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(current))?;
        Ok(end.saturating_sub(self.start_position))
    }
}

impl<S: Seek + Truncate> CipherStream<S> {
    pub fn set_length(&mut self, plaintext_len: u64) -> io::Result<()> {
        let start_position = self.start_position;
        let inner = self.inner.as_mut().ok_or_else(disposed_io_error)?;
        inner.truncate(start_position + plaintext_len)
    }
}

impl<S: Read> Read for CipherStream<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let inner = self.inner.as_mut().ok_or_else(disposed_io_error)?;
        let n = inner.read(buf)?;
        if n > 0 {
            self.ctr.transform(self.position, &mut buf[..n]);
            self.position += n as u64;
        }
        Ok(n)
    }
}

impl<S: Write> Write for CipherStream<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let inner = self.inner.as_mut().ok_or_else(disposed_io_error)?;
        let mut ciphertext = buf.to_vec();
        self.ctr.transform(self.position, &mut ciphertext);
        inner.write_all(&ciphertext)?;
        self.position += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.as_mut().ok_or_else(disposed_io_error)?.flush()
    }
}

impl<S: Seek> Seek for CipherStream<S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let start_position = self.start_position;
        let inner = self.inner.as_mut().ok_or_else(disposed_io_error)?;

        let target = match pos {
            SeekFrom::Start(offset) => SeekFrom::Start(start_position.saturating_add(offset)),
            other => other,
        };

        let mut new_position = inner.seek(target)?;
        if new_position < start_position {
            new_position = inner.seek(SeekFrom::Start(start_position))?;
        }

        self.position = new_position - start_position;
        Ok(self.position)
    }
}

fn disposed_io_error() -> io::Error {
    log::debug!("operation attempted on a disposed cipher stream");
    io::Error::other(Error::Disposed)
}
