//! Prompt command parsing.
//!
//! | Input                       | Command            |
//! |-----------------------------|--------------------|
//! | `search <text>`, `/<text>`  | [`Command::Search`] |
//! | `clear`                     | [`Command::Search`] with `""` |
//! | `sort <column>`             | [`Command::Sort`]  |
//! | `refresh`, `retry`, `r`     | [`Command::Refresh`] |
//! | `help`, `?`                 | [`Command::Help`]  |
//! | `quit`, `q`, `exit`         | [`Command::Quit`]  |
//! | empty line                  | [`Command::Redraw`] |

use std::str::FromStr;

use qb_core::SortField;
use qb_core::error::QbError;

/// One user action entered at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the search query (empty clears it).
    Search(String),
    /// Select a sort column; selecting the active one flips direction.
    Sort(SortField),
    /// Start a new acquisition cycle.
    Refresh,
    Help,
    Quit,
    /// Re-render the current screen.
    Redraw,
}

pub const HELP_TEXT: &str = "\
Commands:
  search <text>   filter by symbol or company (also: /<text>)
  clear           clear the search
  sort <column>   sort by symbol, price, change, percent or volume;
                  repeat to reverse the order
  refresh         fetch fresh quotes (also: retry, r)
  help            show this help (also: ?)
  quit            exit (also: q, exit)";

impl FromStr for Command {
    type Err = QbError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Self::Redraw);
        }
        if let Some(query) = line.strip_prefix('/') {
            return Ok(Self::Search(query.trim().to_string()));
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "search" | "find" => Ok(Self::Search(rest.to_string())),
            "clear" => Ok(Self::Search(String::new())),
            "sort" if rest.is_empty() => {
                Err(QbError::Parse("usage: sort <symbol|price|change|percent|volume>".to_string()))
            }
            "sort" => rest.parse().map(Self::Sort),
            "refresh" | "retry" | "r" => Ok(Self::Refresh),
            "help" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(QbError::Parse(format!("unknown command `{other}` (type `help`)"))),
        }
    }
}
