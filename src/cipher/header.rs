//! Stream byte-order helpers and the self-describing wire header (C3).
//!
//! Wire format: `headerLength(u16 BE) | nonceLength(u16 BE) | nonce |
//! saltLength(u16 BE) | salt`.

use std::io::{Read, Write};

use crate::error::{Error, Result};

/// Fixed overhead, in bytes, of the header's two length-prefix halves
/// (`headerLength` itself plus `nonceLength`; `saltLength` makes up the
/// other half of `H_OV`).
pub const H_OV: usize = 4;

pub fn read_u16_be<R: Read>(r: &mut R) -> Result<u16> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)
        .map_err(|_| Error::ShortRead { expected: 2, actual: 0 })?;
    Ok(u16::from_be_bytes(buf))
}

pub fn write_u16_be<W: Write>(w: &mut W, value: u16) -> Result<()> {
    w.write_all(&value.to_be_bytes())?;
    Ok(())
}

pub fn read_exact_bytes<R: Read>(r: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)
        .map_err(|_| Error::ShortRead { expected: len, actual: 0 })?;
    Ok(buf)
}

/// Fills `buf` by tiling `pattern` across it.
///
/// The first `min(pattern.len(), buf.len())` bytes are copied from
/// `pattern` directly; the rest is filled by doubling the
/// already-written prefix until `buf` is full, which still produces a
/// pure periodic tiling of `pattern` but needs `O(log(buf.len()))`
/// copies instead of `O(buf.len() / pattern.len())`.
pub fn fill(buf: &mut [u8], pattern: &[u8]) {
    if buf.is_empty() || pattern.is_empty() {
        return;
    }

    let initial = pattern.len().min(buf.len());
    buf[..initial].copy_from_slice(&pattern[..initial]);

    let mut filled = initial;
    while filled < buf.len() {
        let chunk = filled.min(buf.len() - filled);
        let (written, remaining) = buf.split_at_mut(filled);
        remaining[..chunk].copy_from_slice(&written[..chunk]);
        filled += chunk;
    }
}

/// Nonce and salt read off the wire.
#[derive(Debug, Clone)]
pub struct Header {
    pub nonce: Vec<u8>,
    pub salt: Vec<u8>,
}

/// Writes the header at the underlying stream's current position.
pub fn write<W: Write>(w: &mut W, nonce: &[u8], salt: &[u8]) -> Result<()> {
    let header_len = H_OV + nonce.len() + salt.len();
    if header_len > u16::MAX as usize {
        return Err(Error::SaltTooLarge);
    }
    write_u16_be(w, header_len as u16)?;
    write_u16_be(w, nonce.len() as u16)?;
    w.write_all(nonce)?;
    write_u16_be(w, salt.len() as u16)?;
    w.write_all(salt)?;
    Ok(())
}

/// Reads and validates the header. `block_len` bounds the legal nonce
/// length to `[block_len / 2, block_len]`.
pub fn read<R: Read>(r: &mut R, block_len: usize) -> Result<Header> {
    let header_len = read_u16_be(r)? as usize;
    let nonce_len = read_u16_be(r)? as usize;

    if nonce_len < block_len / 2 || nonce_len > block_len {
        log::warn!("header nonce length {nonce_len} is outside [{}, {block_len}]", block_len / 2);
        return Err(Error::InvalidNonceLength);
    }
    let nonce = read_exact_bytes(r, nonce_len)?;

    let salt_len = read_u16_be(r)? as usize;
    let salt = read_exact_bytes(r, salt_len)?;

    if header_len < H_OV + block_len / 2 {
        log::warn!("header length {header_len} is too small to hold the mandatory overhead");
        return Err(Error::HeaderTooShort);
    }
    if H_OV / 2 + nonce_len > header_len {
        log::warn!("header length {header_len} is inconsistent with nonce length {nonce_len}");
        return Err(Error::InconsistentHeader);
    }
    if H_OV + nonce_len + salt_len != header_len {
        log::warn!(
            "header length {header_len} does not match overhead + nonce ({nonce_len}) + salt ({salt_len})"
        );
        return Err(Error::InconsistentHeader);
    }

    Ok(Header { nonce, salt })
}
