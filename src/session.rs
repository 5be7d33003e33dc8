//! Line-oriented driver around an [`AvlTree`] of integer keys.
//!
//! A [`Session`] owns the tree, turns raw text into validated [`Command`]s and
//! reports what each command did as an [`Outcome`]. Rejected input never
//! reaches the tree.

use std::fmt;
use std::str::FromStr;

use tracing::{info, warn};

use crate::error::CommandError;
use crate::render::Sideways;
use crate::AvlTree;

pub type Key = i64;

pub const HELP: &str = "\
commands:
  insert <key>   (add, i)        insert an integer key
  delete <key>   (remove, del, d) delete a key, showing the path to it
  search <key>   (find, s)       show the path a lookup takes
  inorder                        keys in ascending order
  preorder                       keys in root, left, right order
  show                           draw the tree
  clear                          remove every key
  help                           this text";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Insert(Key),
    Delete(Key),
    Search(Key),
    InOrder,
    PreOrder,
    Show,
    Clear,
    Help,
}

impl Command {
    /// Parses one input line. Blank lines and `#` comments yield `Ok(None)`.
    pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        line.parse().map(Some)
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words.next().unwrap_or_default().to_ascii_lowercase();

        let command = match verb.as_str() {
            "insert" | "add" | "i" => Command::Insert(parse_key("insert", words.next())?),
            "delete" | "remove" | "del" | "d" => {
                Command::Delete(parse_key("delete", words.next())?)
            }
            "search" | "find" | "s" => Command::Search(parse_key("search", words.next())?),
            "inorder" => Command::InOrder,
            "preorder" => Command::PreOrder,
            "show" => Command::Show,
            "clear" => Command::Clear,
            "help" | "?" => Command::Help,
            _ => return Err(CommandError::UnknownCommand(verb)),
        };

        if words.next().is_some() {
            let (name, expected) = match command {
                Command::Insert(_) => ("insert", 1),
                Command::Delete(_) => ("delete", 1),
                Command::Search(_) => ("search", 1),
                Command::InOrder => ("inorder", 0),
                Command::PreOrder => ("preorder", 0),
                Command::Show => ("show", 0),
                Command::Clear => ("clear", 0),
                Command::Help => ("help", 0),
            };
            return Err(CommandError::TrailingInput {
                command: name,
                expected,
            });
        }
        Ok(command)
    }
}

fn parse_key(command: &'static str, word: Option<&str>) -> Result<Key, CommandError> {
    let word = word.ok_or(CommandError::MissingKey { command })?;
    word.parse().map_err(|_| CommandError::InvalidKey(word.to_string()))
}

/// Parses a comma-separated key list such as `20,10,30`.
pub fn parse_keys(list: &str) -> Result<Vec<Key>, CommandError> {
    list.split(',')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(|word| word.parse().map_err(|_| CommandError::InvalidKey(word.to_string())))
        .collect()
}

/// What a command did to, or found in, the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Inserted(Key),
    AlreadyPresent(Key),
    Deleted { key: Key, path: Vec<Key> },
    Found { key: Key, path: Vec<Key> },
    NotFound { key: Key, path: Vec<Key> },
    Keys(Vec<Key>),
    Shape(String),
    Cleared,
    Help,
}

fn join(keys: &[Key], separator: &str) -> String {
    keys.iter()
        .map(Key::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Inserted(key) => write!(f, "inserted {key}"),
            Outcome::AlreadyPresent(key) => write!(f, "{key} is already in the tree"),
            Outcome::Deleted { key, path } => {
                write!(f, "deleted {key} (path: {})", join(path, " -> "))
            }
            Outcome::Found { key, path } => {
                write!(f, "found {key} (path: {})", join(path, " -> "))
            }
            Outcome::NotFound { key, path } if path.is_empty() => {
                write!(f, "{key} not found (tree is empty)")
            }
            Outcome::NotFound { key, path } => {
                write!(f, "{key} not found (path: {})", join(path, " -> "))
            }
            Outcome::Keys(keys) => write!(f, "{}", join(keys, " ")),
            Outcome::Shape(shape) => write!(f, "{}", shape.trim_end()),
            Outcome::Cleared => write!(f, "cleared"),
            Outcome::Help => write!(f, "{HELP}"),
        }
    }
}

/// Owns the tree for the lifetime of one interactive or scripted run.
#[derive(Debug, Default)]
pub struct Session {
    tree: AvlTree<Key>,
}

impl Session {
    pub fn new() -> Self {
        Session {
            tree: AvlTree::new(),
        }
    }

    pub fn with_keys<I: IntoIterator<Item = Key>>(keys: I) -> Self {
        Session {
            tree: keys.into_iter().collect(),
        }
    }

    pub fn tree(&self) -> &AvlTree<Key> {
        &self.tree
    }

    /// Parses and executes one line; `Ok(None)` for blank or comment lines.
    pub fn run_line(&mut self, line: &str) -> Result<Option<Outcome>, CommandError> {
        match Command::parse_line(line) {
            Ok(Some(command)) => Ok(Some(self.execute(command))),
            Ok(None) => Ok(None),
            Err(err) => {
                warn!(%err, line, "rejected input");
                Err(err)
            }
        }
    }

    pub fn execute(&mut self, command: Command) -> Outcome {
        match command {
            Command::Insert(key) => {
                if self.tree.insert(key) {
                    info!(key, "inserted");
                    Outcome::Inserted(key)
                } else {
                    Outcome::AlreadyPresent(key)
                }
            }
            Command::Delete(key) => {
                // The path is taken before the tree is restructured.
                let (path, found) = {
                    let trace = self.tree.search_path(&key);
                    let path: Vec<Key> = trace.keys().copied().collect();
                    (path, trace.found().is_some())
                };
                if found && self.tree.delete(&key) {
                    info!(key, "deleted");
                    Outcome::Deleted { key, path }
                } else {
                    info!(key, "delete of missing key");
                    Outcome::NotFound { key, path }
                }
            }
            Command::Search(key) => {
                let trace = self.tree.search_path(&key);
                let path = trace.keys().copied().collect();
                if trace.found().is_some() {
                    Outcome::Found { key, path }
                } else {
                    info!(key, "search miss");
                    Outcome::NotFound { key, path }
                }
            }
            Command::InOrder => Outcome::Keys(self.tree.in_order().copied().collect()),
            Command::PreOrder => {
                Outcome::Keys(self.tree.pre_order().into_iter().copied().collect())
            }
            Command::Show => Outcome::Shape(self.shape()),
            Command::Clear => {
                self.tree.clear();
                Outcome::Cleared
            }
            Command::Help => Outcome::Help,
        }
    }

    /// Sideways drawing of the current tree.
    pub fn shape(&self) -> String {
        Sideways::new(&self.tree).to_string()
    }

    /// Sideways drawing with the nodes a lookup of `key` visits bracketed.
    pub fn trace(&self, key: Key) -> String {
        let path = self.tree.search_path(&key);
        Sideways::with_path(&self.tree, &path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_verbs_and_aliases() {
        assert_eq!("insert 5".parse::<Command>(), Ok(Command::Insert(5)));
        assert_eq!("ADD -3".parse::<Command>(), Ok(Command::Insert(-3)));
        assert_eq!("d 7".parse::<Command>(), Ok(Command::Delete(7)));
        assert_eq!("find 9".parse::<Command>(), Ok(Command::Search(9)));
        assert_eq!("inorder".parse::<Command>(), Ok(Command::InOrder));
        assert_eq!("show".parse::<Command>(), Ok(Command::Show));
    }

    #[test]
    fn rejects_non_numeric_key() {
        assert_eq!(
            "insert ten".parse::<Command>(),
            Err(CommandError::InvalidKey("ten".to_string()))
        );
        assert_eq!(
            "search".parse::<Command>(),
            Err(CommandError::MissingKey { command: "search" })
        );
        assert_eq!(
            "insert 1 2".parse::<Command>(),
            Err(CommandError::TrailingInput {
                command: "insert",
                expected: 1
            })
        );
        assert_eq!(
            "rotate".parse::<Command>(),
            Err(CommandError::UnknownCommand("rotate".to_string()))
        );
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert_eq!(Command::parse_line("   "), Ok(None));
        assert_eq!(Command::parse_line("# setup"), Ok(None));
    }

    #[test]
    fn parses_key_lists() {
        assert_eq!(parse_keys("20, 10,30,"), Ok(vec![20, 10, 30]));
        assert_eq!(
            parse_keys("1,x"),
            Err(CommandError::InvalidKey("x".to_string()))
        );
    }

    #[test]
    fn rejected_line_leaves_tree_alone() {
        let mut session = Session::with_keys([1, 2, 3]);
        assert!(session.run_line("insert 4.5").is_err());
        assert_eq!(session.tree().len(), 3);
    }

    #[test]
    fn duplicate_insert_is_reported_not_applied() {
        let mut session = Session::new();
        assert_eq!(session.execute(Command::Insert(4)), Outcome::Inserted(4));
        assert_eq!(session.execute(Command::Insert(4)), Outcome::AlreadyPresent(4));
        assert_eq!(session.tree().len(), 1);
    }

    #[test]
    fn delete_reports_path_taken_before_removal() {
        let mut session = Session::with_keys([20, 10, 30, 5, 15]);
        assert_eq!(
            session.execute(Command::Delete(15)),
            Outcome::Deleted {
                key: 15,
                path: vec![20, 10, 15]
            }
        );
        assert!(!session.tree().contains(&15));
    }

    #[test]
    fn delete_of_missing_key_is_not_found() {
        let mut session = Session::with_keys([20, 10, 30]);
        assert_eq!(
            session.execute(Command::Delete(25)),
            Outcome::NotFound {
                key: 25,
                path: vec![20, 30]
            }
        );
        assert_eq!(session.tree().len(), 3);
    }

    #[test]
    fn search_reports_trace() {
        let mut session = Session::with_keys([20, 10, 30, 5, 15]);
        let outcome = session.run_line("search 15").expect("valid line");
        assert_eq!(
            outcome,
            Some(Outcome::Found {
                key: 15,
                path: vec![20, 10, 15]
            })
        );
        assert_eq!(
            outcome.map(|o| o.to_string()).as_deref(),
            Some("found 15 (path: 20 -> 10 -> 15)")
        );
    }

    #[test]
    fn search_on_empty_tree() {
        let mut session = Session::new();
        let outcome = session.execute(Command::Search(1));
        assert_eq!(outcome.to_string(), "1 not found (tree is empty)");
    }

    #[test]
    fn listing_and_clear() {
        let mut session = Session::with_keys([10, 20, 30]);
        assert_eq!(session.execute(Command::InOrder), Outcome::Keys(vec![10, 20, 30]));
        assert_eq!(session.execute(Command::PreOrder), Outcome::Keys(vec![20, 10, 30]));
        assert_eq!(session.execute(Command::Clear), Outcome::Cleared);
        assert!(session.tree().is_empty());
        assert_eq!(session.shape(), "(empty)\n");
    }

    #[test]
    fn trace_brackets_the_lookup() {
        let session = Session::with_keys([10, 20, 30]);
        assert_eq!(session.trace(10), "    30\n[20]\n    [10]\n");
    }
}
