//! Shared utilities for argument processing.

use msgtree::config::DEFAULT_LOCALE;
use msgtree::i18n::{Arg, Values};

/// What: Determine the log level based on command-line arguments.
///
/// Details:
/// - Verbose flag overrides the `--log-level` argument
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Parse a `NAME=VALUE` substitution argument.
///
/// Output:
/// - `(name, Arg::Number)` when the value is a finite number written in its
///   shortest form, `(name, Arg::Str)` otherwise
///
/// Details:
/// - Values whose digits would change when printed back (`02134`, `1e3`,
///   `1.50`) stay text so nothing is lost
///
/// # Errors
/// - Returns a message when `=` is missing or the name is empty
pub fn parse_value_arg(raw: &str) -> Result<(String, Arg), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing placeholder name in '{raw}'"));
    }
    let trimmed = value.trim();
    let arg = match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() && Arg::Number(n).to_string() == trimmed => Arg::Number(n),
        _ => Arg::Str(value.to_string()),
    };
    Ok((name.to_string(), arg))
}

/// What: Collect parsed `--arg` pairs into substitution values.
///
/// Output:
/// - `None` when no values were given, so templates see "no values"
pub fn collect_values(pairs: &[(String, Arg)]) -> Option<Values> {
    if pairs.is_empty() {
        return None;
    }
    Some(pairs.iter().cloned().collect())
}

/// What: Pick the single locale for this run.
///
/// Details:
/// - Order: command line, config `default_locale`, detected system locale, `en-US`
/// - No fallback chain: exactly one locale is used for every lookup
pub fn pick_locale(
    cli: Option<&str>,
    configured: Option<&str>,
    detect: impl FnOnce() -> Option<String>,
) -> String {
    cli.or(configured)
        .map(str::to_string)
        .or_else(detect)
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}
