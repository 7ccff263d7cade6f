mod utils;

use utils::{run, write_test_file};

#[test]
fn short_help() {
    let output = run(&["-h"]);
    dbg!(&output);

    assert_eq!(output.exit_code, 0);
    assert!(output.stdout.contains(env!("CARGO_PKG_DESCRIPTION")));
    assert!(output.stdout.contains("-i <path>"));
    assert!(output.stdout.contains("-e"));
    assert!(output.stdout.contains("-d"));
    assert!(output.stdout.contains("-p <password>"));
    assert!(output.stdout.contains("-s"));
    assert!(output.stdout.contains("`ctrveil --help`"));
}

#[test]
fn long_help() {
    let output = run(&["--help"]);
    dbg!(&output);

    assert_eq!(output.exit_code, 0);
    assert!(output.stdout.contains(env!("CARGO_PKG_DESCRIPTION")));
    assert!(output.stdout.contains("authentication"));
}

#[test]
fn version() {
    let output = run(&["--version"]);
    dbg!(&output);

    assert_eq!(output.exit_code, 0);
    assert!(output.stdout.contains(env!("CARGO_PKG_NAME")));
    assert!(output.stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_mode_flag_is_fatal() {
    let output = run(&["-i", "whatever.txt", "-p", "pw", "-s"]);
    dbg!(&output);

    assert_eq!(output.exit_code, 2);
    assert!(output.stderr.contains("-e"));
}

#[test]
fn missing_input_flag_is_fatal() {
    let output = run(&["-e", "-p", "pw", "-s"]);
    dbg!(&output);

    assert_eq!(output.exit_code, 2);
    assert!(output.stderr.contains("-i"));
}

#[test]
fn silent_without_password_is_fatal() {
    let output = run(&["-e", "-i", "whatever.txt", "-s"]);
    dbg!(&output);

    assert_eq!(output.exit_code, 2);
}

#[test]
fn encrypt_and_decrypt_round_trip_a_file() {
    let plain_in = write_test_file("round_trip_in.txt", b"The quick brown fox jumped over the lazy dog.");
    let cipher = plain_in.with_extension("secure");
    let plain_out = plain_in.with_extension("roundtrip.txt");

    let output = run(&[
        "-i",
        plain_in.to_str().unwrap(),
        "-o",
        cipher.to_str().unwrap(),
        "-e",
        "-p",
        "MyPassword123",
        "-s",
    ]);
    dbg!(&output);
    assert_eq!(output.exit_code, 0);

    let ciphertext = std::fs::read(&cipher).unwrap();
    assert_ne!(ciphertext, std::fs::read(&plain_in).unwrap());

    let output = run(&[
        "-i",
        cipher.to_str().unwrap(),
        "-o",
        plain_out.to_str().unwrap(),
        "-d",
        "-p",
        "MyPassword123",
        "-s",
    ]);
    dbg!(&output);
    assert_eq!(output.exit_code, 0);

    assert_eq!(std::fs::read(&plain_out).unwrap(), std::fs::read(&plain_in).unwrap());
}

#[test]
fn empty_file_round_trips() {
    let plain_in = write_test_file("empty_in.txt", b"");
    let cipher = plain_in.with_extension("secure");
    let plain_out = plain_in.with_extension("roundtrip.txt");

    assert_eq!(
        run(&[
            "-i",
            plain_in.to_str().unwrap(),
            "-o",
            cipher.to_str().unwrap(),
            "-e",
            "-p",
            "MyPassword123",
            "-s",
        ])
        .exit_code,
        0
    );

    // Header alone (u16 headerLength + u16 nonceLength + nonce + u16
    // saltLength + salt) must be present even for empty plaintext.
    let ciphertext = std::fs::read(&cipher).unwrap();
    assert!(ciphertext.len() >= 4 + 8 + 8);

    assert_eq!(
        run(&[
            "-i",
            cipher.to_str().unwrap(),
            "-o",
            plain_out.to_str().unwrap(),
            "-d",
            "-p",
            "MyPassword123",
            "-s",
        ])
        .exit_code,
        0
    );
    assert_eq!(std::fs::read(&plain_out).unwrap(), b"");
}

#[test]
fn wrong_password_decrypts_without_failing_but_garbles() {
    let plain_in = write_test_file("wrong_pw_in.txt", b"some secret payload");
    let cipher = plain_in.with_extension("secure");
    let plain_out = plain_in.with_extension("roundtrip.txt");

    assert_eq!(
        run(&[
            "-i",
            plain_in.to_str().unwrap(),
            "-o",
            cipher.to_str().unwrap(),
            "-e",
            "-p",
            "right",
            "-s",
        ])
        .exit_code,
        0
    );

    let output = run(&[
        "-i",
        cipher.to_str().unwrap(),
        "-o",
        plain_out.to_str().unwrap(),
        "-d",
        "-p",
        "wrong",
        "-s",
    ]);
    dbg!(&output);
    assert_eq!(output.exit_code, 0);

    let decrypted = std::fs::read(&plain_out).unwrap();
    assert_eq!(decrypted.len(), b"some secret payload".len());
    assert_ne!(decrypted, b"some secret payload");
}

#[test]
fn two_encryptions_of_the_same_input_differ() {
    let plain_in = write_test_file("nonce_diff_in.txt", b"hello");
    let cipher_a = plain_in.with_extension("a.secure");
    let cipher_b = plain_in.with_extension("b.secure");

    for cipher in [&cipher_a, &cipher_b] {
        assert_eq!(
            run(&[
                "-i",
                plain_in.to_str().unwrap(),
                "-o",
                cipher.to_str().unwrap(),
                "-e",
                "-p",
                "pw",
                "-s",
            ])
            .exit_code,
            0
        );
    }

    assert_ne!(std::fs::read(&cipher_a).unwrap(), std::fs::read(&cipher_b).unwrap());
}

#[test]
fn default_output_extensions_are_applied() {
    let plain_in = write_test_file("default_ext_in.txt", b"payload");

    let output = run(&["-i", plain_in.to_str().unwrap(), "-e", "-p", "pw", "-s"]);
    dbg!(&output);
    assert_eq!(output.exit_code, 0);
    assert!(plain_in.with_extension("secure").exists());
}
