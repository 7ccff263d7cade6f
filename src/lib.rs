//! Password-based streaming byte/file encryption.
//!
//! A custom CTR-mode keystream (built from a real AES block
//! permutation) is framed by a compact, self-describing header
//! carrying a nonce and salt, and exposed as a `Read + Write + Seek`
//! filter over an arbitrary underlying stream ([`cipher::CipherStream`]).
//! There is no authentication tag: a wrong password or corrupted
//! ciphertext decrypts to garbage rather than failing loudly.
//!
//! [`facade`] wraps the core in one-shot string/bytes/file helpers for
//! callers who don't need streaming control.

pub mod cipher;
pub mod error;
pub mod facade;

pub use cipher::{CipherFactory, CipherStream, KeyMaterial, KeyStretcher, Password};
pub use error::{Error, Result};
