//! Fluent, one-shot entry points for string/byte/file encryption.
//!
//! Thin convenience layer over [`crate::cipher::CipherStream`] — the
//! staged builders below exist so callers who don't need streaming
//! control don't have to construct a `CipherStream` by hand.

use std::fs::File;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

use crate::cipher::{CipherFactory, CipherStream, KeyMaterial, Password};
use crate::error::{Error, Result};

enum Source {
    File(PathBuf),
    Bytes(Vec<u8>),
    String(String),
}

fn read_source(source: Source) -> Result<Vec<u8>> {
    Ok(match source {
        Source::File(path) => std::fs::read(path)?,
        Source::Bytes(bytes) => bytes,
        Source::String(s) => s.into_bytes(),
    })
}

pub struct EncryptBuilder {
    source: Source,
}

pub struct EncryptReady {
    source: Source,
    key: KeyMaterial,
}

pub fn encrypt_file(path: impl AsRef<Path>) -> EncryptBuilder {
    EncryptBuilder { source: Source::File(path.as_ref().to_path_buf()) }
}

pub fn encrypt_string(s: impl Into<String>) -> EncryptBuilder {
    EncryptBuilder { source: Source::String(s.into()) }
}

pub fn encrypt_bytes(b: impl Into<Vec<u8>>) -> EncryptBuilder {
    EncryptBuilder { source: Source::Bytes(b.into()) }
}

impl EncryptBuilder {
    pub fn with_password(self, password: impl Into<Password>) -> EncryptReady {
        EncryptReady { source: self.source, key: KeyMaterial::Password(password.into()) }
    }
}

impl EncryptReady {
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        let plaintext = read_source(self.source)?;
        let mut stream =
            CipherStream::create(Cursor::new(Vec::new()), self.key, CipherFactory::default(), None, None)?;
        stream.write_all(&plaintext)?;
        stream.flush()?;
        let cursor = stream.into_inner().expect("stream was not disposed");
        Ok(cursor.into_inner())
    }

    pub fn into_file(self, path: impl AsRef<Path>) -> Result<()> {
        let plaintext = read_source(self.source)?;
        let file = File::create(path.as_ref())?;
        let mut stream = CipherStream::create(file, self.key, CipherFactory::default(), None, None)?;
        stream.write_all(&plaintext)?;
        stream.flush()?;
        Ok(())
    }
}

pub struct DecryptBuilder {
    source: Source,
}

pub struct DecryptReady {
    source: Source,
    key: KeyMaterial,
}

pub fn decrypt_file(path: impl AsRef<Path>) -> DecryptBuilder {
    DecryptBuilder { source: Source::File(path.as_ref().to_path_buf()) }
}

pub fn decrypt_bytes(b: impl Into<Vec<u8>>) -> DecryptBuilder {
    DecryptBuilder { source: Source::Bytes(b.into()) }
}

impl DecryptBuilder {
    pub fn with_password(self, password: impl Into<Password>) -> DecryptReady {
        DecryptReady { source: self.source, key: KeyMaterial::Password(password.into()) }
    }
}

impl DecryptReady {
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        let mut plaintext = Vec::new();
        match self.source {
            Source::File(path) => {
                let file = File::open(path)?;
                let mut stream = CipherStream::open(file, self.key, CipherFactory::default())?;
                stream.read_to_end(&mut plaintext)?;
            }
            Source::Bytes(bytes) => {
                let mut stream = CipherStream::open(Cursor::new(bytes), self.key, CipherFactory::default())?;
                stream.read_to_end(&mut plaintext)?;
            }
            Source::String(_) => unreachable!("decrypt sources are never strings"),
        }
        Ok(plaintext)
    }

    pub fn into_string(self) -> Result<String> {
        String::from_utf8(self.into_bytes()?).map_err(|_| Error::InvalidUtf8)
    }
}
