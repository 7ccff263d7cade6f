#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    Encrypt,
    Decrypt,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Default)]
pub struct Args {
    pub input: Option<String>,
    pub output: Option<String>,
    pub mode: Option<Mode>,
    pub password: Option<String>,
    pub silent: bool,
    pub short_help: bool,
    pub long_help: bool,
    pub version: bool,
}

impl Args {
    pub fn build_from_args<I>(mut cli_args: I) -> Result<Self, String>
    where
        I: Iterator<Item: AsRef<str> + ToString>,
    {
        let mut args = Self::default();

        while let Some(arg) = cli_args.next() {
            match arg.as_ref() {
                "-i" => args.input = Some(Self::next_value(&mut cli_args, "-i")?),
                "-o" => args.output = Some(Self::next_value(&mut cli_args, "-o")?),
                "-e" if args.mode.is_none() => args.mode = Some(Mode::Encrypt),
                "-d" if args.mode.is_none() => args.mode = Some(Mode::Decrypt),
                "-e" | "-d" => return Err("'-e' and '-d' are mutually exclusive".to_string()),
                "-p" => args.password = Some(Self::next_value(&mut cli_args, "-p")?),
                "-s" => args.silent = true,
                "-h" => args.short_help = true,
                "--help" => args.long_help = true,
                "-V" | "--version" => args.version = true,
                unknown => return Err(format!("Unknown argument: '{unknown}'")),
            }
        }

        if args.silent && args.password.is_none() {
            return Err("'-s' (silent) requires '-p <password>'".to_string());
        }

        Ok(args)
    }

    fn next_value<I>(cli_args: &mut I, flag: &str) -> Result<String, String>
    where
        I: Iterator<Item: AsRef<str> + ToString>,
    {
        cli_args
            .next()
            .map(|value| value.to_string())
            .ok_or_else(|| format!("'{flag}' requires a value"))
    }
}
