//! Interactive password prompting, for when `-p` isn't given.

use rpassword::prompt_password;

use ctrveil::Password;

/// Prompts for a password with confirmation, since a typo here would
/// otherwise only surface as silently garbled output.
pub fn resolve_for_encrypt(provided: Option<String>, silent: bool) -> Option<Password> {
    if let Some(password) = provided {
        return Some(Password::new(password));
    }
    if silent {
        return None;
    }

    let first = prompt_password("Password: ").ok()?;
    if first.is_empty() {
        eprintln!("fatal: password cannot be empty.");
        return None;
    }

    let second = prompt_password("Confirm password: ").ok()?;
    if first != second {
        eprintln!("fatal: passwords do not match.");
        return None;
    }

    Some(Password::new(first))
}

pub fn resolve_for_decrypt(provided: Option<String>, silent: bool) -> Option<Password> {
    if let Some(password) = provided {
        return Some(Password::new(password));
    }
    if silent {
        return None;
    }

    match prompt_password("Password: ") {
        Ok(password) if !password.is_empty() => Some(Password::new(password)),
        _ => {
            eprintln!("fatal: password cannot be empty.");
            None
        }
    }
}
