//! Parser for the ICU MessageFormat subset understood by `IcuFormatter`.

use crate::i18n::format::FormatError;

/// Parsed message element.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Element {
    /// Literal text with quoting already resolved.
    Literal(String),
    /// `{name}`.
    Argument(String),
    /// `{name, number[, style]}`.
    Number {
        /// Placeholder name.
        name: String,
        /// Requested style.
        style: NumberStyle,
    },
    /// `{name, date[, style]}` or `{name, time[, style]}`.
    DateTime {
        /// Placeholder name.
        name: String,
        /// Date or time of day.
        kind: DateTimeKind,
        /// Requested length.
        style: DateTimeStyle,
    },
    /// `{name, plural, ...}` or `{name, selectordinal, ...}`.
    Plural {
        /// Placeholder name.
        name: String,
        /// Cardinal or ordinal rules.
        ordinal: bool,
        /// Value subtracted before category selection and `#`.
        offset: f64,
        /// Branches in source order.
        options: Vec<(PluralSelector, Vec<Element>)>,
    },
    /// `{name, select, ...}`.
    Select {
        /// Placeholder name.
        name: String,
        /// Branches in source order.
        options: Vec<(String, Vec<Element>)>,
    },
    /// `#` inside a plural branch.
    Pound,
}

/// Number argument style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum NumberStyle {
    /// Up to three fraction digits.
    Decimal,
    /// Rounded to a whole number.
    Integer,
    /// Multiplied by 100, rounded, suffixed with `%`.
    Percent,
}

/// Which half of a timestamp a `date`/`time` argument shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum DateTimeKind {
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
}

/// `date`/`time` argument style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum DateTimeStyle {
    /// `short`.
    Short,
    /// `medium`, also used when no style is given.
    Medium,
    /// `long`.
    Long,
    /// `full`.
    Full,
}

/// Plural branch selector.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum PluralSelector {
    /// `=N`.
    Exact(f64),
    /// CLDR category keyword (`one`, `few`, `other`, ...).
    Category(String),
}

/// Enclosing argument kind, which decides whether `#` is special.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parent {
    /// Top level or a `select` branch.
    Plain,
    /// A `plural` or `selectordinal` branch.
    Plural,
}

/// What: Parse a template into elements.
///
/// # Errors
/// - Returns `FormatError::Syntax` for unbalanced braces and malformed arguments
/// - Returns `FormatError::UnsupportedType` for the ICU4J-only `spellout`,
///   `ordinal` and `duration` argument types
pub(super) fn parse(template: &str) -> Result<Vec<Element>, FormatError> {
    let mut parser = Parser {
        chars: template.chars().collect(),
        pos: 0,
    };
    parser.message(0, Parent::Plain)
}

/// Cursor over the template characters.
struct Parser {
    /// Template as characters so offsets are character positions.
    chars: Vec<char>,
    /// Current position.
    pos: usize,
}

impl Parser {
    /// Current character.
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Character after the current one.
    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    /// Build a syntax error at the current position.
    fn error(&self, reason: impl Into<String>) -> FormatError {
        FormatError::Syntax {
            offset: self.pos,
            reason: reason.into(),
        }
    }

    /// Skip whitespace.
    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    /// Consume `expected` or fail.
    fn expect(&mut self, expected: char) -> Result<(), FormatError> {
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(format!("expected '{expected}'")))
        }
    }

    /// Read a run of characters that are not whitespace or in `stop`.
    fn token(&mut self, stop: &[char]) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| !c.is_whitespace() && !stop.contains(&c))
        {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    /// Parse a message body until end of input or a closing brace at `depth > 0`.
    fn message(&mut self, depth: usize, parent: Parent) -> Result<Vec<Element>, FormatError> {
        let mut elements = Vec::new();
        let mut text = String::new();
        loop {
            match self.peek() {
                None => {
                    if depth > 0 {
                        return Err(self.error("unclosed argument, expected '}'"));
                    }
                    break;
                }
                Some('}') if depth > 0 => break,
                Some('{') => {
                    flush(&mut text, &mut elements);
                    elements.push(self.argument(depth)?);
                }
                Some('#') if parent == Parent::Plural => {
                    flush(&mut text, &mut elements);
                    self.pos += 1;
                    elements.push(Element::Pound);
                }
                Some('\'') => self.apostrophe(parent, &mut text),
                Some(c) => {
                    self.pos += 1;
                    text.push(c);
                }
            }
        }
        flush(&mut text, &mut elements);
        Ok(elements)
    }

    /// Resolve apostrophe quoting starting at the current `'`.
    fn apostrophe(&mut self, parent: Parent, text: &mut String) {
        match self.peek_next() {
            Some('\'') => {
                self.pos += 2;
                text.push('\'');
            }
            Some('{' | '}') => self.quoted(text),
            Some('#') if parent == Parent::Plural => self.quoted(text),
            _ => {
                self.pos += 1;
                text.push('\'');
            }
        }
    }

    /// Copy a quoted run verbatim up to the closing `'` (or end of input).
    fn quoted(&mut self, text: &mut String) {
        self.pos += 1;
        while let Some(c) = self.peek() {
            if c == '\'' {
                if self.peek_next() == Some('\'') {
                    text.push('\'');
                    self.pos += 2;
                    continue;
                }
                self.pos += 1;
                return;
            }
            text.push(c);
            self.pos += 1;
        }
    }

    /// Parse `{name[, type[, style]]}` starting at `{`.
    fn argument(&mut self, depth: usize) -> Result<Element, FormatError> {
        self.expect('{')?;
        self.skip_ws();
        let name = self.token(&['{', '}', ',', '#', '\'']);
        if name.is_empty() {
            return Err(self.error("expected argument name"));
        }
        self.skip_ws();
        match self.peek() {
            Some('}') => {
                self.pos += 1;
                return Ok(Element::Argument(name));
            }
            Some(',') => self.pos += 1,
            _ => return Err(self.error("expected ',' or '}' after argument name")),
        }
        self.skip_ws();
        let kind = self.token(&['{', '}', ',']);
        if matches!(kind.as_str(), "spellout" | "ordinal" | "duration") {
            return Err(FormatError::UnsupportedType { name, kind });
        }
        self.skip_ws();
        match kind.as_str() {
            "number" => self.number(name),
            "date" => self.date_time(name, DateTimeKind::Date),
            "time" => self.date_time(name, DateTimeKind::Time),
            "plural" => self.plural(name, false, depth),
            "selectordinal" => self.plural(name, true, depth),
            "select" => self.select(name, depth),
            "" => Err(self.error("expected argument type")),
            other => Err(self.error(format!("unknown argument type \"{other}\""))),
        }
    }

    /// Read the optional `, style` tail of a simple argument and its `}`.
    fn style(&mut self) -> Result<Option<String>, FormatError> {
        let style = if self.peek() == Some(',') {
            self.pos += 1;
            self.skip_ws();
            let start = self.pos;
            while self.peek().is_some_and(|c| c != '}' && c != '{') {
                self.pos += 1;
            }
            let raw: String = self.chars[start..self.pos].iter().collect();
            let raw = raw.trim();
            if raw.is_empty() {
                return Err(self.error("expected argument style"));
            }
            Some(raw.to_string())
        } else {
            None
        };
        self.expect('}')?;
        Ok(style)
    }

    /// Parse the tail of a `number` argument.
    fn number(&mut self, name: String) -> Result<Element, FormatError> {
        let style = match self.style()?.as_deref() {
            Some("integer") => NumberStyle::Integer,
            Some("percent") => NumberStyle::Percent,
            _ => NumberStyle::Decimal,
        };
        Ok(Element::Number { name, style })
    }

    /// Parse the tail of a `date` / `time` argument.
    ///
    /// Unknown styles and skeletons render like `medium`.
    fn date_time(&mut self, name: String, kind: DateTimeKind) -> Result<Element, FormatError> {
        let style = match self.style()?.as_deref() {
            Some("short") => DateTimeStyle::Short,
            Some("long") => DateTimeStyle::Long,
            Some("full") => DateTimeStyle::Full,
            _ => DateTimeStyle::Medium,
        };
        Ok(Element::DateTime { name, kind, style })
    }

    /// Parse the tail of a `plural` / `selectordinal` argument.
    fn plural(&mut self, name: String, ordinal: bool, depth: usize) -> Result<Element, FormatError> {
        self.expect(',')?;
        self.skip_ws();
        let mut offset = 0.0;
        if self.chars[self.pos..].starts_with(&['o', 'f', 'f', 's', 'e', 't', ':']) {
            self.pos += "offset:".len();
            self.skip_ws();
            let raw = self.token(&['{', '}']);
            offset = raw
                .parse::<f64>()
                .map_err(|_| self.error(format!("invalid plural offset \"{raw}\"")))?;
        }
        let mut options: Vec<(PluralSelector, Vec<Element>)> = Vec::new();
        let mut has_other = false;
        loop {
            self.skip_ws();
            if self.peek() == Some('}') {
                self.pos += 1;
                break;
            }
            let raw = self.token(&['{', '}']);
            if raw.is_empty() {
                return Err(self.error("expected plural selector"));
            }
            let selector = if let Some(exact) = raw.strip_prefix('=') {
                PluralSelector::Exact(
                    exact
                        .parse::<f64>()
                        .map_err(|_| self.error(format!("invalid plural selector \"{raw}\"")))?,
                )
            } else {
                has_other |= raw == "other";
                PluralSelector::Category(raw.clone())
            };
            if options.iter().any(|(existing, _)| *existing == selector) {
                return Err(self.error(format!("duplicate plural selector \"{raw}\"")));
            }
            let body = self.branch(depth, Parent::Plural)?;
            options.push((selector, body));
        }
        if !has_other {
            return Err(self.error("plural argument requires an \"other\" branch"));
        }
        Ok(Element::Plural {
            name,
            ordinal,
            offset,
            options,
        })
    }

    /// Parse the tail of a `select` argument.
    fn select(&mut self, name: String, depth: usize) -> Result<Element, FormatError> {
        self.expect(',')?;
        let mut options: Vec<(String, Vec<Element>)> = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some('}') {
                self.pos += 1;
                break;
            }
            let key = self.token(&['{', '}']);
            if key.is_empty() {
                return Err(self.error("expected select key"));
            }
            if options.iter().any(|(existing, _)| *existing == key) {
                return Err(self.error(format!("duplicate select key \"{key}\"")));
            }
            let body = self.branch(depth, Parent::Plain)?;
            options.push((key, body));
        }
        if !options.iter().any(|(key, _)| key == "other") {
            return Err(self.error("select argument requires an \"other\" branch"));
        }
        Ok(Element::Select { name, options })
    }

    /// Parse `{ message }` for one plural/select branch.
    fn branch(&mut self, depth: usize, parent: Parent) -> Result<Vec<Element>, FormatError> {
        self.skip_ws();
        self.expect('{')?;
        let body = self.message(depth + 1, parent)?;
        self.expect('}')?;
        Ok(body)
    }
}

/// Move pending literal text into the element list.
fn flush(text: &mut String, elements: &mut Vec<Element>) {
    if !text.is_empty() {
        elements.push(Element::Literal(std::mem::take(text)));
    }
}
