use clap::Parser;
use std::path::PathBuf;

/// Bind a sample mixer panel to a property model and print the result
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Model configuration (JSON)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Update a property from the model side (can be specified multiple times)
    #[arg(short = 's', long = "set", value_name = "NAME=VALUE")]
    pub set: Vec<String>,

    /// Simulate a user edit on the widget linked to NAME (can be specified multiple times)
    #[arg(short = 'e', long = "edit", value_name = "NAME=VALUE")]
    pub edit: Vec<String>,

    /// Reset every property to its default after applying updates
    #[arg(short = 'r', long = "reset")]
    pub reset: bool,

    /// Create properties for every bindable widget in the panel
    #[arg(short = 'a', long = "auto-link")]
    pub auto_link: bool,

    /// Do not warn about unsupported widgets
    #[arg(long = "no-warnings")]
    pub no_warnings: bool,

    /// Enable debug logging to file (default: propbind.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

/// Split a `NAME=VALUE` assignment. The value may itself contain `=`.
pub fn parse_assignment(arg: &str) -> Option<(&str, &str)> {
    let (name, value) = arg.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("volume=40"), Some(("volume", "40")));
        assert_eq!(parse_assignment("label=a=b"), Some(("label", "a=b")));
        assert_eq!(parse_assignment(" muted =true"), Some(("muted", "true")));
        assert_eq!(parse_assignment("=1"), None);
        assert_eq!(parse_assignment("volume"), None);
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from([
            "propbind", "-vv", "--set", "volume=10", "-s", "muted=true", "--auto-link", "-l",
        ]);
        assert_eq!(args.verbosity, 2);
        assert_eq!(args.set, vec!["volume=10", "muted=true"]);
        assert!(args.auto_link);
        assert_eq!(args.log_file, Some(None));
        assert!(!args.reset);
    }
}
