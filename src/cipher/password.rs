//! A password carried only long enough to derive a key from it.

use std::fmt;

use secrecy::{ExposeSecret, SecretSlice};

pub struct Password(SecretSlice<u8>);

impl Password {
    pub fn new<S: Into<String>>(password: S) -> Self {
        Self(SecretSlice::from(password.into().into_bytes()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Password")
            .field("len", &self.0.expose_secret().len())
            .finish()
    }
}

impl From<&str> for Password {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Password {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_bytes() {
        let password = Password::new("hunter2");
        assert_eq!(password.as_bytes(), b"hunter2");
    }

    #[test]
    fn debug_does_not_leak_bytes() {
        let password = Password::new("hunter2");
        let debug = format!("{password:?}");
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn empty_password_is_detected() {
        assert!(Password::new("").is_empty());
        assert!(!Password::new("x").is_empty());
    }
}
