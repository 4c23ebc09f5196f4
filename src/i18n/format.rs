//! Formatting service boundary: argument values, formatter output and errors.
//!
//! The translator hands a resolved template to a [`MessageFormatter`]. The
//! bundled implementation is [`IcuFormatter`]; any other backend can be
//! plugged in by implementing the trait (closures work too).

mod icu;
mod parser;

use std::collections::HashMap;
use std::fmt;

pub use icu::IcuFormatter;

use crate::i18n::locale::Locale;

/// Substitution value supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Text value, inserted verbatim.
    Str(String),
    /// Numeric value, usable by `number`, `plural` and `selectordinal`.
    Number(f64),
}

impl Arg {
    /// What: Numeric view of the value, if it is a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Str(_) => None,
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Number(n) => f.write_str(&number_to_string(*n)),
        }
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for Arg {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

/// Per-call substitution values keyed by placeholder name.
pub type Values = HashMap<String, Arg>;

/// One piece of multi-part formatter output.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    /// Literal or already-rendered text.
    Text(String),
    /// Raw substitution value, rendered through its `Display`.
    Value(Arg),
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Value(arg) => arg.fmt(f),
        }
    }
}

/// Formatter output: a single string or a sequence of parts.
#[derive(Debug, Clone, PartialEq)]
pub enum Formatted {
    /// Whole message as one string.
    Scalar(String),
    /// Message split into ordered parts.
    Parts(Vec<Part>),
}

impl Formatted {
    /// What: Collapse the output into one string.
    ///
    /// Details:
    /// - Parts are concatenated in order using each part's string form
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Scalar(text) => text,
            Self::Parts(parts) => parts.iter().map(ToString::to_string).collect(),
        }
    }
}

impl fmt::Display for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(text) => f.write_str(text),
            Self::Parts(parts) => parts.iter().try_for_each(|part| part.fmt(f)),
        }
    }
}

/// Error raised while formatting a resolved template.
#[derive(Debug)]
pub enum FormatError {
    /// The template is malformed.
    Syntax {
        /// Character offset where parsing failed.
        offset: usize,
        /// What the parser expected or found.
        reason: String,
    },
    /// A referenced argument was not supplied.
    MissingValue {
        /// Placeholder name.
        name: String,
    },
    /// A supplied argument has the wrong type for its placeholder.
    InvalidValue {
        /// Placeholder name.
        name: String,
        /// Expected value kind.
        expected: &'static str,
    },
    /// The template uses an argument type this formatter does not render.
    UnsupportedType {
        /// Placeholder name.
        name: String,
        /// Argument type keyword (e.g., "spellout").
        kind: String,
    },
    /// The bound locale cannot be interpreted where locale data is required.
    InvalidLocale {
        /// Locale tag as given.
        locale: String,
        /// Underlying parse or lookup failure.
        reason: String,
    },
    /// Failure reported by locale data or a custom formatter backend.
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax { offset, reason } => {
                write!(f, "malformed message template at offset {offset}: {reason}")
            }
            Self::MissingValue { name } => {
                write!(f, "no value was provided for placeholder \"{name}\"")
            }
            Self::InvalidValue { name, expected } => {
                write!(f, "value for placeholder \"{name}\" must be {expected}")
            }
            Self::UnsupportedType { name, kind } => {
                write!(
                    f,
                    "placeholder \"{name}\" uses unsupported argument type \"{kind}\""
                )
            }
            Self::InvalidLocale { locale, reason } => {
                write!(f, "locale \"{locale}\" cannot be used for formatting: {reason}")
            }
            Self::Backend(err) => write!(f, "formatter error: {err}"),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Backend(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

/// Locale-aware template formatting service.
pub trait MessageFormatter: Send + Sync {
    /// What: Render `template` for `locale` with optional substitution values.
    ///
    /// # Errors
    /// - Returns `FormatError` when the template is malformed or values do not fit it
    fn format(
        &self,
        template: &str,
        locale: &Locale,
        values: Option<&Values>,
    ) -> Result<Formatted, FormatError>;
}

impl<F> MessageFormatter for F
where
    F: Fn(&str, &Locale, Option<&Values>) -> Result<Formatted, FormatError> + Send + Sync,
{
    fn format(
        &self,
        template: &str,
        locale: &Locale,
        values: Option<&Values>,
    ) -> Result<Formatted, FormatError> {
        self(template, locale, values)
    }
}

/// Shortest string form of a number (`1`, `1.5`, `-0.25`).
pub(crate) fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Parts join in order using each part's string form.
    fn parts_join_in_order() {
        let formatted = Formatted::Parts(vec![
            Part::Text("You have ".to_string()),
            Part::Value(Arg::Number(3.0)),
            Part::Text(" new ".to_string()),
            Part::Value(Arg::from("messages")),
        ]);
        assert_eq!(formatted.to_string(), "You have 3 new messages");
        assert_eq!(formatted.into_string(), "You have 3 new messages");
        assert_eq!(Formatted::Scalar("x".to_string()).into_string(), "x");
    }

    #[test]
    /// What: Numbers render in their shortest form.
    fn numbers_render_shortest() {
        assert_eq!(Arg::from(42).to_string(), "42");
        assert_eq!(Arg::from(1.5).to_string(), "1.5");
        assert_eq!(Arg::from(-0.0).to_string(), "0");
        assert_eq!(Arg::from(f64::INFINITY).to_string(), "Infinity");
    }

    #[test]
    /// What: Backend failures keep their cause as the error source.
    fn backend_error_exposes_source() {
        use std::error::Error;

        let err = FormatError::Backend("decimal data unavailable".into());
        assert_eq!(err.to_string(), "formatter error: decimal data unavailable");
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("decimal data unavailable")
        );
        assert!(FormatError::MissingValue { name: "n".to_string() }.source().is_none());
    }

    #[test]
    /// What: Closures act as formatters.
    fn closures_are_formatters() {
        let upper = |template: &str, _: &Locale, _: Option<&Values>| {
            Ok::<_, FormatError>(Formatted::Scalar(template.to_uppercase()))
        };
        let out = upper
            .format("hi", &Locale::new("en"), None)
            .expect("closure formatter");
        assert_eq!(out.into_string(), "HI");
    }
}
