//! Line commands accepted by the interactive prompt.

use thiserror::Error;

/// One line of user input.
///
/// Entry numbers are typed 1-based; the parsed indices are 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Channels,
    Channel(String),
    /// Bookmark entry of the news list.
    Save(usize),
    /// Show the bookmark list.
    Saved,
    /// Remove entry of the bookmark list.
    Delete(usize),
    /// Open entry of the list shown last.
    Open(usize),
    Translate(bool),
    Limit(u32),
    Days(u32),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (type 'help')")]
    Unknown(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Not a valid number: {0}")]
    InvalidNumber(String),

    #[error("Expected 'on' or 'off', got: {0}")]
    InvalidToggle(String),
}

pub const HELP: &str = "\
Commands:
  refresh, r            fetch the selected channel
  channels              list channels
  channel <name|n>      select a channel
  save <n>              bookmark news entry n
  saved                 show bookmarks
  delete <n>            remove bookmark n
  open <n>              open entry n of the list shown last
  translate on|off      toggle title translation
  limit <n>             entries per refresh (10-50)
  days <n>              maximum entry age in days (1-30)
  help                  show this help
  quit, q               exit";

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "refresh" | "r" => Ok(Command::Refresh),
        "channels" => Ok(Command::Channels),
        "channel" | "c" => match rest {
            "" => Err(CommandError::MissingArgument("channel name or number")),
            name => Ok(Command::Channel(name.to_string())),
        },
        "save" | "s" => Ok(Command::Save(position(rest)?)),
        "saved" => Ok(Command::Saved),
        "delete" | "d" => Ok(Command::Delete(position(rest)?)),
        "open" | "o" => Ok(Command::Open(position(rest)?)),
        "translate" | "t" => match rest.to_ascii_lowercase().as_str() {
            "on" => Ok(Command::Translate(true)),
            "off" => Ok(Command::Translate(false)),
            "" => Err(CommandError::MissingArgument("on or off")),
            other => Err(CommandError::InvalidToggle(other.to_string())),
        },
        "limit" => Ok(Command::Limit(number(rest)?)),
        "days" => Ok(Command::Days(number(rest)?)),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn number(arg: &str) -> Result<u32, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument("number"));
    }
    arg.parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}

/// Parses a 1-based entry number into an index.
fn position(arg: &str) -> Result<usize, CommandError> {
    let n = number(arg)?;
    (n as usize)
        .checked_sub(1)
        .ok_or_else(|| CommandError::InvalidNumber(arg.to_string()))
}
