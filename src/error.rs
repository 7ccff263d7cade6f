//! Crate-wide error type.

use std::fmt;

/// Errors produced by the cipher core, the façade, and the CLI glue.
#[derive(Debug)]
pub enum Error {
    /// A password is null or empty.
    EmptyPassword,
    /// A caller-supplied salt is shorter than the minimum (8 bytes).
    ShortSalt,
    /// A requested key size, in bits, is not a whole number of bytes.
    InvalidKeySizeBits(usize),
    /// A key's byte length doesn't match any legal AES key size (16/24/32).
    InvalidKeySize(usize),
    /// No declared key size is small enough to satisfy the requested cap.
    NoLegalKeySize,
    /// Nonce + salt + header overhead would overflow the 16-bit length
    /// fields of the wire header.
    SaltTooLarge,
    /// Nonce length outside `[block_size / 2, block_size]`.
    InvalidNonceLength,
    /// The header's `headerLength` field is too small to hold the
    /// mandatory overhead and minimum nonce.
    HeaderTooShort,
    /// The header's length fields don't agree with each other.
    InconsistentHeader,
    /// Fewer bytes were available than the header or caller demanded.
    ShortRead { expected: usize, actual: usize },
    /// An operation was attempted after the stream was disposed.
    Disposed,
    /// A decrypted byte stream was not valid UTF-8.
    InvalidUtf8,
    /// Underlying I/O failure.
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::ShortSalt => write!(f, "salt must be at least 8 bytes"),
            Self::InvalidKeySizeBits(bits) => {
                write!(f, "key size {bits} bits is not a multiple of 8")
            }
            Self::InvalidKeySize(len) => {
                write!(f, "key length {len} bytes matches no legal AES key size")
            }
            Self::NoLegalKeySize => {
                write!(f, "no declared key size satisfies the requested cap")
            }
            Self::SaltTooLarge => {
                write!(f, "nonce and salt are too large for the header's length fields")
            }
            Self::InvalidNonceLength => write!(f, "nonce length is outside [block/2, block]"),
            Self::HeaderTooShort => write!(f, "header length field is too small"),
            Self::InconsistentHeader => write!(f, "header length fields are inconsistent"),
            Self::ShortRead { expected, actual } => {
                write!(f, "expected {expected} bytes but found {actual}")
            }
            Self::Disposed => write!(f, "cipher stream has already been disposed"),
            Self::InvalidUtf8 => write!(f, "decrypted bytes are not valid UTF-8"),
            Self::Io(reason) => write!(f, "I/O error: {reason}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        // `CipherStream`'s disposed-stream guard has to return `io::Error`
        // to satisfy `Read`/`Write`/`Seek`, but carries `Self::Disposed` as
        // its source so callers going through the core `Result<_, Error>`
        // API (e.g. via the façade) still see the dedicated variant.
        if let Some(source) = err.get_ref() {
            if let Some(Self::Disposed) = source.downcast_ref::<Self>() {
                return Self::Disposed;
            }
        }
        Self::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
