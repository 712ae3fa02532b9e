//! Command parsing and name resolution.

mod command;
mod resolver;

pub use command::{Command, parse_command};
pub use resolver::{find_by_name, fuzzy_match, name_matches, suggest_command};
