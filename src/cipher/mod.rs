//! Password-based CTR-mode stream cipher core.
//!
//! `key` stretches a password into key material (C1), `factory` binds a
//! concrete block cipher and hash (C2), `header` frames the nonce/salt
//! on the wire (C3), `ctr` generates the keystream (C4), and `stream`
//! glues all of it into a `Read + Write + Seek` filter (C5).

pub mod ctr;
pub mod factory;
pub mod header;
pub mod key;
pub mod password;
pub mod rng;
pub mod stream;

pub use factory::CipherFactory;
pub use key::KeyStretcher;
pub use password::Password;
pub use stream::{CipherStream, KeyMaterial};
