mod cli;

use std::env;
use std::process;

use cli::args::Args;

fn main() {
    let args = match Args::build_from_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("fatal: {err}.");
            println!("Try '{bin} -h' for help.", bin = env!("CARGO_BIN_NAME"));
            process::exit(2);
        }
    };

    if args.long_help {
        long_help();
    } else if args.short_help {
        short_help();
    } else if args.version {
        version();
    } else {
        process::exit(cli::run(args));
    }
}

fn short_help_message() -> String {
    format!(
        "\
{description}

Usage: {bin} -i <path> (-e | -d) [-o <path>] [-p <password>] [-s]

Options:
  -i <path>              Input file (required)
  -o <path>              Output file (default: input with .secure/.txt)
  -e                     Encrypt
  -d                     Decrypt
  -p <password>          Password (for scripted/silent use)
  -s                     Silent: no prompts, requires -p

  -h, --help             Show this message and exit
  -V, --version          Show the version and exit
",
        description = env!("CARGO_PKG_DESCRIPTION"),
        bin = env!("CARGO_BIN_NAME"),
    )
}

fn short_help() {
    println!("{}", short_help_message());
    println!(
        "For full help, see `{bin} --help`.",
        bin = env!("CARGO_BIN_NAME")
    );
}

fn long_help() {
    println!(
        "\
{help}
A wrong password is never detected as such: there is no authentication
tag in this format, so the output just decrypts to garbage.
",
        help = short_help_message(),
    );
}

fn version() {
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
}
