//! Prompt-before-overwrite confirmation.

use std::path::Path;

use dialoguer::Confirm;

/// Asks before clobbering an existing output file. `-s` implies yes.
pub fn confirm(path: &Path, silent: bool) -> bool {
    if silent || !path.exists() {
        return true;
    }

    Confirm::new()
        .with_prompt(format!("'{}' already exists, overwrite?", path.display()))
        .default(false)
        .interact()
        .unwrap_or(false)
}
