//! Process-wide secure random number generation.
//!
//! The only globally shared resource in this crate (see spec §5):
//! nonce and salt generation both draw from the platform's secure RNG.
//! Swapping the source is a process-wide decision, not a per-call one.

use rand::RngCore;

pub fn fill_random(buf: &mut [u8]) {
    rand::rng().fill_bytes(buf);
}
