//! System locale detection from POSIX environment variables.

use std::env;

use crate::i18n::locale::is_valid_locale_format;

/// Environment variables consulted, highest priority first.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// What: Detect system locale from environment variables.
///
/// Output:
/// - `Option<String>` containing locale code (e.g., "de-DE") or None if not detectable
///
/// Details:
/// - Checks `LC_ALL`, `LC_MESSAGES` and `LANG` in order
/// - Parses strings like "de_DE.UTF-8" -> "de-DE"
/// - `C` and `POSIX` carry no language and are skipped
#[must_use]
pub fn detect_system_locale() -> Option<String> {
    detect_locale_with(|name| env::var(name).ok())
}

/// What: Detection against an arbitrary variable source.
///
/// Inputs:
/// - `lookup`: Returns the value of an environment variable by name
pub fn detect_locale_with(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    LOCALE_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find_map(|value| parse_locale_string(&value))
}

/// What: Normalize a POSIX locale string to a hyphenated tag.
///
/// Inputs:
/// - `locale_str`: e.g. "de_DE.UTF-8", "sr_RS@latin", "zh_Hans_CN"
///
/// Output:
/// - Normalized tag ("de-DE", "sr-RS", "zh-Hans-CN") or None
///
/// Details:
/// - Drops the encoding (`.UTF-8`) and modifier (`@euro`) suffixes
/// - Lowercases the language, title-cases a 4-letter script, uppercases the region
fn parse_locale_string(locale_str: &str) -> Option<String> {
    let trimmed = locale_str.trim();
    let base = trimmed.split(['.', '@']).next()?;
    if base.is_empty() || base.eq_ignore_ascii_case("C") || base.eq_ignore_ascii_case("POSIX") {
        return None;
    }

    let mut parts = base.split(['_', '-']);
    let mut tag = parts.next()?.to_ascii_lowercase();
    for part in parts {
        tag.push('-');
        if part.len() == 4 {
            let (head, tail) = part.split_at(1);
            tag.push_str(&head.to_ascii_uppercase());
            tag.push_str(&tail.to_ascii_lowercase());
        } else {
            tag.push_str(&part.to_ascii_uppercase());
        }
    }

    is_valid_locale_format(&tag).then_some(tag)
}
