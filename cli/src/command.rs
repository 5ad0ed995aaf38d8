//! Parsing of the interactive command line.

use book_core::{Field, Mode};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mode(Mode),
    Set(Field, String),
    Clear,
    Submit,
    Refresh,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty input")]
    Empty,
    #[error("unknown command `{0}`, type `help`")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("{0}")]
    Invalid(String),
}

pub const HELP: &str = "\
commands:
  mode <add|update|delete>   switch the form mode
  set <field> [value...]     edit one field (id, title, author, genre, year, rating)
  clear                      empty every field
  submit                     send the form for the current mode
  refresh                    fetch the collection again
  show                       redraw form and table
  help                       this text
  quit                       leave";

impl std::str::FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));
        match word.to_ascii_lowercase().as_str() {
            "" => Err(ParseError::Empty),
            "mode" if rest.is_empty() => Err(ParseError::Usage("mode <add|update|delete>")),
            "mode" => rest.parse().map(Command::Mode).map_err(ParseError::Invalid),
            "set" => {
                let (name, value) = rest
                    .split_once(char::is_whitespace)
                    .map_or((rest, ""), |(n, v)| (n, v.trim()));
                if name.is_empty() {
                    return Err(ParseError::Usage("set <field> [value...]"));
                }
                let field = name.parse().map_err(ParseError::Invalid)?;
                Ok(Command::Set(field, value.to_string()))
            }
            "clear" => Ok(Command::Clear),
            "submit" => Ok(Command::Submit),
            "refresh" => Ok(Command::Refresh),
            "show" | "ls" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}
