//! Interactive shell command parsing.

use std::str::FromStr;

use strum_macros::{AsRefStr, EnumIter, EnumString};

/// First word of a shell line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ShellKeyword {
    /// `lookup <ip>`
    #[strum(serialize = "lookup", serialize = "l")]
    Lookup,
    /// `list`
    #[strum(serialize = "list", serialize = "ls")]
    List,
    /// `filter [text]`
    #[strum(serialize = "filter", serialize = "f")]
    Filter,
    /// `select <id>`
    #[strum(serialize = "select", serialize = "s")]
    Select,
    /// `delete <id>`
    #[strum(serialize = "delete", serialize = "rm")]
    Delete,
    /// `map`
    Map,
    /// `dismiss`
    Dismiss,
    /// `help`
    #[strum(serialize = "help", serialize = "?")]
    Help,
    /// `quit`
    #[strum(serialize = "quit", serialize = "exit", serialize = "q")]
    Quit,
}

impl ShellKeyword {
    /// One-line usage text.
    pub fn usage(&self) -> &'static str {
        match self {
            ShellKeyword::Lookup => "lookup <ip>    look up an address (a bare address works too)",
            ShellKeyword::List => "list           show the history",
            ShellKeyword::Filter => "filter [text]  only show matching records (no text clears)",
            ShellKeyword::Select => "select <id>    show a record on the map",
            ShellKeyword::Delete => "delete <id>    remove a record",
            ShellKeyword::Map => "map            show the map panel",
            ShellKeyword::Dismiss => "dismiss        clear the current message",
            ShellKeyword::Help => "help           show this help",
            ShellKeyword::Quit => "quit           leave the session",
        }
    }
}

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Look up an address (possibly empty, which is reported to the user)
    Lookup(String),
    /// Show the history
    List,
    /// Set the filter; empty clears it
    Filter(String),
    /// Select a record by id
    Select(u64),
    /// Delete a record by id
    Delete(u64),
    /// Show the map panel
    Map,
    /// Clear the current message
    Dismiss,
    /// Show usage
    Help,
    /// End the session
    Quit,
    /// Blank line
    Empty,
    /// Unparseable line, with the reason
    Invalid(String),
}

fn parse_id(keyword: ShellKeyword, rest: &str) -> Result<u64, String> {
    rest.parse::<u64>()
        .map_err(|_| format!("usage: {}", keyword.usage()))
}

impl ShellCommand {
    /// Parses one input line.
    ///
    /// A line whose first word is not a keyword is treated as an address to
    /// look up when it has no spaces, and as invalid otherwise.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ShellCommand::Empty;
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let keyword = match ShellKeyword::from_str(word) {
            Ok(keyword) => keyword,
            Err(_) if rest.is_empty() => return ShellCommand::Lookup(word.to_string()),
            Err(_) => {
                return ShellCommand::Invalid(format!(
                    "unknown command '{}' (type 'help')",
                    word
                ))
            }
        };

        let parsed = match keyword {
            ShellKeyword::Lookup => Ok(ShellCommand::Lookup(rest.to_string())),
            ShellKeyword::List => Ok(ShellCommand::List),
            ShellKeyword::Filter => Ok(ShellCommand::Filter(rest.to_string())),
            ShellKeyword::Select => parse_id(keyword, rest).map(ShellCommand::Select),
            ShellKeyword::Delete => parse_id(keyword, rest).map(ShellCommand::Delete),
            ShellKeyword::Map => Ok(ShellCommand::Map),
            ShellKeyword::Dismiss => Ok(ShellCommand::Dismiss),
            ShellKeyword::Help => Ok(ShellCommand::Help),
            ShellKeyword::Quit => Ok(ShellCommand::Quit),
        };
        parsed.unwrap_or_else(ShellCommand::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keywords_and_aliases() {
        assert_eq!(
            ShellCommand::parse("lookup 8.8.8.8"),
            ShellCommand::Lookup("8.8.8.8".to_string())
        );
        assert_eq!(ShellCommand::parse("LS"), ShellCommand::List);
        assert_eq!(ShellCommand::parse("select 17"), ShellCommand::Select(17));
        assert_eq!(ShellCommand::parse("rm 17"), ShellCommand::Delete(17));
        assert_eq!(ShellCommand::parse("exit"), ShellCommand::Quit);
        assert_eq!(ShellCommand::parse("?"), ShellCommand::Help);
    }

    #[test]
    fn test_bare_address_is_a_lookup() {
        assert_eq!(
            ShellCommand::parse("  1.1.1.1  "),
            ShellCommand::Lookup("1.1.1.1".to_string())
        );
        assert_eq!(
            ShellCommand::parse("2001:db8::1"),
            ShellCommand::Lookup("2001:db8::1".to_string())
        );
    }

    #[test]
    fn test_lookup_without_argument_is_empty_lookup() {
        assert_eq!(
            ShellCommand::parse("lookup"),
            ShellCommand::Lookup(String::new())
        );
    }

    #[test]
    fn test_filter_keeps_spaces_and_may_be_empty() {
        assert_eq!(
            ShellCommand::parse("filter united states"),
            ShellCommand::Filter("united states".to_string())
        );
        assert_eq!(ShellCommand::parse("filter"), ShellCommand::Filter(String::new()));
    }

    #[test]
    fn test_bad_ids_and_unknown_words() {
        assert!(matches!(ShellCommand::parse("delete abc"), ShellCommand::Invalid(m) if m.contains("delete <id>")));
        assert!(matches!(ShellCommand::parse("select"), ShellCommand::Invalid(_)));
        assert!(matches!(ShellCommand::parse("frobnicate now"), ShellCommand::Invalid(m) if m.contains("frobnicate")));
        assert_eq!(ShellCommand::parse("   "), ShellCommand::Empty);
    }
}
