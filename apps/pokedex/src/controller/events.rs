//! User intents typed at the browse prompt.

use shared::route::Route;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Next,
    Prev,
    Page(u32),
    Search(String),
    /// `None` selects "All Types".
    Type(Option<String>),
    Reset,
    Open(OpenTarget),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenTarget {
    Name(String),
    /// 1-based position in the displayed list.
    Position(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntentError {
    #[error("unknown command '{0}'; type 'help' for a list of commands")]
    Unknown(String),
    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("'{0}' is not a page number")]
    InvalidPage(String),
}

pub const HELP_TEXT: &str = "\
commands:
  next | n              next page
  prev | p              previous page
  page <number>         jump to a page
  search <text>         filter the current page by name (empty text clears)
  type [name]           show every entry of a type (no name: all types)
  reset                 clear search and type filter
  open <name|#|path>    show details for an entry
  list | ls             redraw the list
  help                  this text
  quit | q              exit";

pub fn parse_intent(line: &str) -> Result<Intent, IntentError> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "" | "list" | "ls" => Ok(Intent::Show),
        "next" | "n" => Ok(Intent::Next),
        "prev" | "p" => Ok(Intent::Prev),
        "page" => {
            if rest.is_empty() {
                return Err(IntentError::MissingArgument {
                    command: "page",
                    expected: "a page number",
                });
            }
            rest.parse::<u32>()
                .ok()
                .filter(|page| *page > 0)
                .map(Intent::Page)
                .ok_or_else(|| IntentError::InvalidPage(rest.to_string()))
        }
        "search" | "s" => Ok(Intent::Search(rest.to_string())),
        "type" | "t" => Ok(Intent::Type(
            (!rest.is_empty()).then(|| rest.to_ascii_lowercase()),
        )),
        "reset" => Ok(Intent::Reset),
        "open" | "o" => parse_open_target(rest).map(Intent::Open),
        "help" | "h" | "?" => Ok(Intent::Help),
        "quit" | "q" | "exit" => Ok(Intent::Quit),
        other => Err(IntentError::Unknown(other.to_string())),
    }
}

fn parse_open_target(rest: &str) -> Result<OpenTarget, IntentError> {
    if rest.is_empty() {
        return Err(IntentError::MissingArgument {
            command: "open",
            expected: "a name, list position or /pokemon/<name> path",
        });
    }
    if let Ok(position) = rest.parse::<usize>() {
        return Ok(OpenTarget::Position(position));
    }
    if rest.starts_with('/') {
        return match Route::parse(rest) {
            Some(Route::Pokemon { name }) => Ok(OpenTarget::Name(name)),
            _ => Err(IntentError::Unknown(rest.to_string())),
        };
    }
    Ok(OpenTarget::Name(rest.to_ascii_lowercase()))
}
