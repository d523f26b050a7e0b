//! REPL command parsing
//!
//! Pure parsing, testable without a terminal.

use std::str::FromStr;

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add the catalog entry with this name (case-insensitive)
    Search(String),
    /// Remove by zero-based shortlist index
    Remove(usize),
    List,
    /// Detail of the entry at a zero-based shortlist index
    Show(usize),
    /// Catalog entries whose name contains the filter
    Catalog(Option<String>),
    Fetch,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("type a command, or `help`")]
    Empty,
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a list position (use 1, 2, ...)")]
    BadPosition(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "search" | "add" => {
                if rest.is_empty() {
                    Err(CommandError::MissingArgument("search"))
                } else {
                    Ok(Self::Search(rest.to_string()))
                }
            }
            "remove" | "rm" => position(rest, "remove").map(Self::Remove),
            "show" => position(rest, "show").map(Self::Show),
            "list" | "ls" => Ok(Self::List),
            "catalog" => Ok(Self::Catalog(
                (!rest.is_empty()).then(|| rest.to_string()),
            )),
            "fetch" | "refresh" => Ok(Self::Fetch),
            "status" => Ok(Self::Status),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Parse a 1-based position into a zero-based index.
fn position(raw: &str, verb: &'static str) -> Result<usize, CommandError> {
    if raw.is_empty() {
        return Err(CommandError::MissingArgument(verb));
    }
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(CommandError::BadPosition(raw.to_string())),
    }
}

pub const HELP: &str = "\
Commands:
  search <name>     add the country with this exact name (any case)
  add <name>        same as search
  remove <n>        remove entry n from the shortlist
  list              show the shortlist
  show <n>          details of shortlist entry n
  catalog [text]    list catalog countries, optionally filtered
  fetch             reload the catalog
  status            loading, connectivity and counts
  help              this text
  quit              leave";
