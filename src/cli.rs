use clap::{Arg, ArgAction, CommandFactory, FromArgMatches, Parser};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tsort")]
#[command(version)]
#[command(about = "Write totally ordered list consistent with the partial ordering in FILE")]
#[command(
    long_about = "Write totally ordered list consistent with the partial ordering in FILE.\n\
                  With no FILE, or when FILE is -, read standard input."
)]
pub struct Cli {
    /// Whitespace-separated pairs of keys; each pair orders its first key before its second
    pub file: Option<PathBuf>,
}

impl Cli {
    /// Parse the process arguments, accepting `-v` as well as `-V` for the version.
    pub fn parse_args() -> Self {
        let matches = Self::command()
            .disable_version_flag(true)
            .arg(
                Arg::new("version")
                    .short('v')
                    .short_alias('V')
                    .long("version")
                    .action(ArgAction::Version)
                    .help("Print version"),
            )
            .get_matches();
        Self::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
    }

    pub fn input(&self) -> Input {
        Input::from_operand(self.file.clone())
    }
}

/// Where the pairs are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// No operand, or `-`, means standard input.
    pub fn from_operand(file: Option<PathBuf>) -> Self {
        match file {
            Some(path) if path.as_os_str() != "-" => Input::File(path),
            _ => Input::Stdin,
        }
    }

    pub fn open(&self) -> io::Result<Box<dyn BufRead>> {
        match self {
            Input::Stdin => Ok(Box::new(io::stdin().lock())),
            Input::File(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Stdin => write!(f, "-"),
            Input::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_operand_parsing() {
        let cli = Cli::try_parse_from(["tsort"]).unwrap();
        assert_eq!(cli.input(), Input::Stdin);

        let cli = Cli::try_parse_from(["tsort", "-"]).unwrap();
        assert_eq!(cli.input(), Input::Stdin);

        let cli = Cli::try_parse_from(["tsort", "deps.txt"]).unwrap();
        assert_eq!(cli.input(), Input::File(PathBuf::from("deps.txt")));
    }

    #[test]
    fn test_extra_operand_is_rejected() {
        assert!(Cli::try_parse_from(["tsort", "a", "b"]).is_err());
    }

    #[test]
    fn test_input_display() {
        assert_eq!(Input::Stdin.to_string(), "-");
        assert_eq!(Input::File(PathBuf::from("dir/f")).to_string(), "dir/f");
    }

    #[test]
    fn test_open_missing_file_fails() {
        let input = Input::File(PathBuf::from("/nonexistent/tsort/input"));
        assert!(input.open().is_err());
    }
}
