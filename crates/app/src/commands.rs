//! Input line parsing.
//!
//! Plain lines are search queries. Lines starting with `:` are commands.

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the search query.
    Query(String),
    /// Add a card from the current results to the collection.
    Add(String),
    /// Remove a card from the collection.
    Remove(String),
    /// Empty the collection.
    Clear,
    /// Show card details.
    Show(String),
    /// Show the collection and its statistics.
    Stats,
    /// Dump Prometheus metrics.
    Metrics,
    Help,
    Quit,
    /// Command that could not be parsed; carries the message to print.
    Invalid(String),
}

impl Command {
    /// Metric label for this command.
    pub fn label(&self) -> &'static str {
        match self {
            Command::Query(_) => "query",
            Command::Add(_) => "add",
            Command::Remove(_) => "remove",
            Command::Clear => "clear",
            Command::Show(_) => "show",
            Command::Stats => "stats",
            Command::Metrics => "metrics",
            Command::Help => "help",
            Command::Quit => "quit",
            Command::Invalid(_) => "invalid",
        }
    }
}

pub const HELP: &str = "\
Type to search cards by name. Commands:
  :add <id>    add a card from the results to your collection
  :rm <id>     remove a card from your collection
  :clear       empty your collection
  :show <id>   show card details
  :stats       show your collection and its statistics
  :metrics     dump metrics
  :help        show this help
  :quit        exit";

/// Parse one line of input.
///
/// The trailing newline is stripped but the query is otherwise kept as typed,
/// so an empty line searches for the default term.
pub fn parse(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);

    let Some(rest) = line.trim_start().strip_prefix(':') else {
        return Command::Query(line.to_string());
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or("");
    let arg = parts.next();
    let extra = parts.next();

    let with_id = |make: fn(String) -> Command| match (arg, extra) {
        (Some(id), None) => make(id.to_string()),
        _ => Command::Invalid(format!(":{} takes exactly one card id", name)),
    };
    let bare = |cmd: Command| match arg {
        None => cmd,
        Some(_) => Command::Invalid(format!(":{} takes no arguments", name)),
    };

    match name {
        "add" | "a" => with_id(Command::Add),
        "rm" | "remove" => with_id(Command::Remove),
        "show" | "s" => with_id(Command::Show),
        "clear" => bare(Command::Clear),
        "stats" => bare(Command::Stats),
        "metrics" => bare(Command::Metrics),
        "help" | "h" | "?" => bare(Command::Help),
        "quit" | "q" | "exit" => bare(Command::Quit),
        "" => Command::Invalid("empty command; try :help".to_string()),
        other => Command::Invalid(format!("unknown command :{}; try :help", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_is_query() {
        assert_eq!(parse("pikachu\n"), Command::Query("pikachu".to_string()));
        assert_eq!(parse("mr. mime"), Command::Query("mr. mime".to_string()));
    }

    #[test]
    fn test_empty_line_is_empty_query() {
        assert_eq!(parse("\n"), Command::Query(String::new()));
        assert_eq!(parse("   "), Command::Query("   ".to_string()));
    }

    #[test]
    fn test_commands_with_id() {
        assert_eq!(parse(":add base1-4"), Command::Add("base1-4".to_string()));
        assert_eq!(parse(":rm base1-4\r\n"), Command::Remove("base1-4".to_string()));
        assert_eq!(parse("  :show xy1-1"), Command::Show("xy1-1".to_string()));
    }

    #[test]
    fn test_commands_without_args() {
        assert_eq!(parse(":clear"), Command::Clear);
        assert_eq!(parse(":stats"), Command::Stats);
        assert_eq!(parse(":metrics"), Command::Metrics);
        assert_eq!(parse(":help"), Command::Help);
        assert_eq!(parse(":q"), Command::Quit);
    }

    #[test]
    fn test_invalid_commands() {
        assert!(matches!(parse(":add"), Command::Invalid(_)));
        assert!(matches!(parse(":add a b"), Command::Invalid(_)));
        assert!(matches!(parse(":clear now"), Command::Invalid(_)));
        assert!(matches!(parse(":"), Command::Invalid(_)));

        match parse(":fly") {
            Command::Invalid(msg) => assert!(msg.contains(":fly")),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(parse(":add x").label(), "add");
        assert_eq!(parse("x").label(), "query");
        assert_eq!(parse(":nope").label(), "invalid");
    }
}
