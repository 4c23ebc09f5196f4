//! Command-line argument definition.

use std::path::PathBuf;

use clap::Parser;
use msgtree::i18n::Arg;

use crate::args::utils::parse_value_arg;

/// msgtree - look up a dotted key in a message catalog and render it for a locale
#[derive(Parser, Debug)]
#[command(name = "msgtree")]
#[command(version)]
#[command(about = "Look up a dotted key in a nested message catalog and render it for a locale", long_about = None)]
pub struct Args {
    /// Dotted translation key (e.g., app.titles.search)
    #[arg(required_unless_present = "list_keys")]
    pub key: Option<String>,

    /// Locale to format with (default: config, then system locale, then en-US)
    #[arg(short = 'L', long)]
    pub locale: Option<String>,

    /// Substitution value as NAME=VALUE; numeric values are passed as numbers
    #[arg(short = 'a', long = "arg", value_name = "NAME=VALUE", value_parser = parse_value_arg)]
    pub args: Vec<(String, Arg)>,

    /// Load this catalog file instead of {locale}.yml from the locales directory
    #[arg(short, long, conflicts_with = "locales_dir")]
    pub catalog: Option<PathBuf>,

    /// Directory holding {locale}.yml|yaml|json catalogs
    #[arg(long)]
    pub locales_dir: Option<PathBuf>,

    /// Path to i18n.yml (default: $MSGTREE_CONFIG, then the bundled config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print every key that resolves to a message and exit
    #[arg(long)]
    pub list_keys: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Key, locale and repeated `--arg` values parse together.
    fn parses_key_and_values() {
        let args = Args::try_parse_from([
            "msgtree",
            "app.results",
            "--locale",
            "de-DE",
            "--arg",
            "count=3",
            "-a",
            "name=World",
        ])
        .expect("valid args");
        assert_eq!(args.key.as_deref(), Some("app.results"));
        assert_eq!(args.locale.as_deref(), Some("de-DE"));
        assert_eq!(
            args.args,
            vec![
                ("count".to_string(), Arg::Number(3.0)),
                ("name".to_string(), Arg::from("World")),
            ]
        );
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    /// What: A key is required unless listing keys; catalog and locales dir conflict.
    fn argument_constraints() {
        assert!(Args::try_parse_from(["msgtree"]).is_err());
        assert!(Args::try_parse_from(["msgtree", "--list-keys"]).is_ok());
        assert!(
            Args::try_parse_from([
                "msgtree",
                "k",
                "--catalog",
                "a.yml",
                "--locales-dir",
                "dir"
            ])
            .is_err()
        );
        assert!(Args::try_parse_from(["msgtree", "k", "--arg", "novalue"]).is_err());
    }
}
