//! CLI command wiring: argument parsing, password prompting, and the
//! encrypt/decrypt commands themselves.

pub mod args;
pub mod overwrite;
pub mod password;

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use ctrveil::{CipherFactory, CipherStream, KeyMaterial, Password};

use args::{Args, Mode};

/// Runs the parsed command and returns the process exit code.
pub fn run(args: Args) -> i32 {
    let Some(mode) = args.mode else {
        eprintln!("fatal: one of '-e' or '-d' is required.");
        return 2;
    };
    let Some(input) = args.input.as_deref() else {
        eprintln!("fatal: '-i <path>' is required.");
        return 2;
    };

    let input_path = PathBuf::from(input);
    let output_path = args
        .output
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output_path(&input_path, mode));

    let password = match mode {
        Mode::Encrypt => password::resolve_for_encrypt(args.password.clone(), args.silent),
        Mode::Decrypt => password::resolve_for_decrypt(args.password.clone(), args.silent),
    };
    let Some(password) = password else {
        eprintln!("fatal: no password provided.");
        return 2;
    };

    if !overwrite::confirm(&output_path, args.silent) {
        eprintln!("Aborted.");
        return 1;
    }

    let result = match mode {
        Mode::Encrypt => encrypt(&input_path, &output_path, password),
        Mode::Decrypt => decrypt(&input_path, &output_path, password),
    };

    match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("fatal: {err}.");
            2
        }
    }
}

fn default_output_path(input: &Path, mode: Mode) -> PathBuf {
    match mode {
        Mode::Encrypt => input.with_extension("secure"),
        Mode::Decrypt => input.with_extension("txt"),
    }
}

fn encrypt(input: &Path, output: &Path, password: Password) -> ctrveil::Result<()> {
    let mut plaintext = Vec::new();
    File::open(input)?.read_to_end(&mut plaintext)?;

    let file = File::create(output)?;
    let mut stream = CipherStream::create(file, KeyMaterial::Password(password), CipherFactory::default(), None, None)?;
    stream.write_all(&plaintext)?;
    stream.flush()?;
    Ok(())
}

fn decrypt(input: &Path, output: &Path, password: Password) -> ctrveil::Result<()> {
    let file = File::open(input)?;
    let mut stream = CipherStream::open(file, KeyMaterial::Password(password), CipherFactory::default())?;
    let mut plaintext = Vec::new();
    stream.read_to_end(&mut plaintext)?;

    File::create(output)?.write_all(&plaintext)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_path_for_encrypt() {
        let path = default_output_path(Path::new("/tmp/notes.txt"), Mode::Encrypt);
        assert_eq!(path, Path::new("/tmp/notes.secure"));
    }

    #[test]
    fn default_output_path_for_decrypt() {
        let path = default_output_path(Path::new("/tmp/notes.secure"), Mode::Decrypt);
        assert_eq!(path, Path::new("/tmp/notes.txt"));
    }

    #[test]
    fn encrypt_then_decrypt_round_trips_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.txt");
        let cipher = dir.path().join("plain.secure");
        let roundtrip = dir.path().join("roundtrip.txt");

        std::fs::write(&plain, b"some file contents").unwrap();

        encrypt(&plain, &cipher, Password::new("pw")).unwrap();
        decrypt(&cipher, &roundtrip, Password::new("pw")).unwrap();

        assert_eq!(std::fs::read(&roundtrip).unwrap(), b"some file contents");
    }
}
