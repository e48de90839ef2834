//! The line-oriented command language of the interactive browser.

use crate::catalog::Generation;
use crate::error::{DexError, Result};

pub const HELP_TEXT: &str = "\
Commands:
  more                 show the next page of the list
  type <type>          toggle an element type filter (all selected must match)
  gen <1-9|I-IX>       toggle a generation filter (any selected may match)
  search <query>       filter by name, or by id with '#25' (alias: /<query>)
  clear                drop every filter and the query
  open <name|#id>      open the detail view of an entry
  close                return to the list
  go <path>            navigate to a location such as /item/pikachu
  back, forward        walk the navigation history
  peek <name>          show the summary card of an entry
  explain <target>     explain a move column, a cell ('power 3'), a move or an ability
  status               show load progress, filters and location
  help                 show this help
  quit                 leave the browser";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    More,
    Type(String),
    Gen(Generation),
    Search(String),
    Clear,
    Open(String),
    Close,
    Go(String),
    Back,
    Forward,
    Peek(String),
    Explain(String),
    Status,
    Help,
    Quit,
}

fn required(command: &str, arg: &str) -> Result<String> {
    if arg.is_empty() {
        Err(DexError::InvalidCommand(format!(
            "'{command}' needs an argument"
        )))
    } else {
        Ok(arg.to_string())
    }
}

impl BrowseCommand {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        if let Some(query) = line.strip_prefix('/') {
            return Ok(Some(BrowseCommand::Search(query.trim().to_string())));
        }

        let (word, arg) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "more" | "m" => BrowseCommand::More,
            "type" | "t" => BrowseCommand::Type(required("type", arg)?),
            "gen" | "g" => BrowseCommand::Gen(required("gen", arg)?.parse()?),
            "search" | "s" => BrowseCommand::Search(arg.to_string()),
            "clear" => BrowseCommand::Clear,
            "open" | "o" => BrowseCommand::Open(required("open", arg)?),
            "close" | "list" => BrowseCommand::Close,
            "go" => BrowseCommand::Go(required("go", arg)?),
            "back" | "b" => BrowseCommand::Back,
            "forward" | "f" => BrowseCommand::Forward,
            "peek" | "p" => BrowseCommand::Peek(required("peek", arg)?),
            "explain" | "x" => BrowseCommand::Explain(required("explain", arg)?),
            "status" => BrowseCommand::Status,
            "help" | "?" => BrowseCommand::Help,
            "quit" | "q" | "exit" => BrowseCommand::Quit,
            other => {
                return Err(DexError::InvalidCommand(format!(
                    "unknown command '{other}', type 'help' for a list"
                )));
            }
        };

        Ok(Some(command))
    }
}
