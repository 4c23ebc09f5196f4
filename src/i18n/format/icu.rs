//! Default formatter: ICU MessageFormat subset with CLDR plural rules and
//! ICU4X number and date formatting.

use std::fmt;

use chrono::{Datelike, Timelike};
use fixed_decimal::{Decimal, FloatPrecision};
use icu::calendar::{Date, Iso};
use icu::datetime::DateTimeFormatter;
use icu::datetime::fieldsets::{
    self,
    enums::{DateFieldSet, TimeFieldSet},
};
use icu::datetime::input::{DateTime, Time};
use icu::datetime::options::Length;
use icu::decimal::DecimalFormatter;
use icu::decimal::options::DecimalFormatterOptions;
use icu::locale::Locale as IcuLocale;
use intl_pluralrules::{PluralCategory, PluralRuleType, PluralRules};
use unic_langid::LanguageIdentifier;

use super::parser::{self, DateTimeKind, DateTimeStyle, Element, NumberStyle, PluralSelector};
use super::{Arg, FormatError, Formatted, MessageFormatter, Part, Values, number_to_string};
use crate::i18n::locale::Locale;

/// ICU-style message formatter.
///
/// Understands `{name}`, `{name, number[, integer|percent]}`,
/// `{name, plural, ...}`, `{name, selectordinal, ...}`, `{name, select, ...}`
/// and `{name, date|time[, short|medium|long|full]}` with apostrophe quoting.
/// Plural categories come from `intl_pluralrules`; numbers, `#`, dates and
/// times are rendered with the locale's CLDR symbols through `icu`. Dates
/// and times take a Unix timestamp in milliseconds and are shown in UTC.
/// Each call parses the template afresh and keeps no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct IcuFormatter;

impl IcuFormatter {
    /// What: Create the formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl MessageFormatter for IcuFormatter {
    fn format(
        &self,
        template: &str,
        locale: &Locale,
        values: Option<&Values>,
    ) -> Result<Formatted, FormatError> {
        let elements = parser::parse(template)?;
        let mut render = Render {
            locale,
            values,
            cardinal: None,
            ordinal: None,
            decimal: None,
            parts: Vec::new(),
        };
        render.elements(&elements, None)?;
        Ok(match <[Part; 1]>::try_from(render.parts) {
            Ok([Part::Text(text)]) => Formatted::Scalar(text),
            Ok([part]) => Formatted::Parts(vec![part]),
            Err(parts) if parts.is_empty() => Formatted::Scalar(String::new()),
            Err(parts) => Formatted::Parts(parts),
        })
    }
}

/// Per-call rendering state.
struct Render<'a> {
    /// Bound locale.
    locale: &'a Locale,
    /// Caller-supplied values.
    values: Option<&'a Values>,
    /// Cardinal rules, created on first use.
    cardinal: Option<PluralRules>,
    /// Ordinal rules, created on first use.
    ordinal: Option<PluralRules>,
    /// Decimal formatter, created on first use.
    decimal: Option<DecimalFormatter>,
    /// Output parts with adjacent text merged.
    parts: Vec<Part>,
}

impl Render<'_> {
    /// Render a sequence of elements; `pound` is the value `#` prints.
    fn elements(&mut self, elements: &[Element], pound: Option<f64>) -> Result<(), FormatError> {
        for element in elements {
            match element {
                Element::Literal(text) => self.push_text(text),
                Element::Argument(name) => {
                    let arg = self.value(name)?.clone();
                    self.parts.push(Part::Value(arg));
                }
                Element::Number { name, style } => {
                    let n = self.number(name)?;
                    let text = self.number_text(n, *style)?;
                    self.push_text(&text);
                }
                Element::DateTime { name, kind, style } => {
                    let text = self.date_time(name, *kind, *style)?;
                    self.push_text(&text);
                }
                Element::Pound => {
                    if let Some(n) = pound {
                        let text = self.number_text(n, NumberStyle::Decimal)?;
                        self.push_text(&text);
                    }
                }
                Element::Plural {
                    name,
                    ordinal,
                    offset,
                    options,
                } => {
                    let n = self.number(name)?;
                    let shifted = n - offset;
                    let branch = match options.iter().find(|(selector, _)| {
                        matches!(selector, PluralSelector::Exact(exact) if exact.total_cmp(&n).is_eq())
                    }) {
                        Some((_, body)) => body.as_slice(),
                        None => {
                            let category = self.category(name, shifted, *ordinal)?;
                            select_category(options, category)
                        }
                    };
                    self.elements(branch, Some(shifted))?;
                }
                Element::Select { name, options } => {
                    let key = self.value(name)?.to_string();
                    let branch = options
                        .iter()
                        .find(|(option, _)| *option == key)
                        .or_else(|| options.iter().find(|(option, _)| option == "other"))
                        .map_or(&[][..], |(_, body)| body.as_slice());
                    self.elements(branch, pound)?;
                }
            }
        }
        Ok(())
    }

    /// Append text, merging with a preceding text part.
    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Part::Text(last)) = self.parts.last_mut() {
            last.push_str(text);
        } else {
            self.parts.push(Part::Text(text.to_string()));
        }
    }

    /// Look up a supplied value.
    fn value(&self, name: &str) -> Result<&Arg, FormatError> {
        self.values
            .and_then(|values| values.get(name))
            .ok_or_else(|| FormatError::MissingValue {
                name: name.to_string(),
            })
    }

    /// Look up a supplied value that must be numeric.
    fn number(&self, name: &str) -> Result<f64, FormatError> {
        self.value(name)?
            .as_number()
            .ok_or_else(|| FormatError::InvalidValue {
                name: name.to_string(),
                expected: "a number",
            })
    }

    /// What: Render a number in the requested style with the locale's symbols.
    ///
    /// Details:
    /// - `Decimal` keeps at most three fraction digits
    /// - `Integer` rounds half away from zero
    /// - `Percent` scales by 100, rounds to a whole number and appends `%`
    /// - Grouping follows the locale (`1,234.5` in `en`, `1.234,5` in `de`)
    fn number_text(&mut self, n: f64, style: NumberStyle) -> Result<String, FormatError> {
        let (value, suffix) = match style {
            NumberStyle::Decimal => ((n * 1000.0).round() / 1000.0, ""),
            NumberStyle::Integer => (n.round(), ""),
            NumberStyle::Percent => ((n * 100.0).round(), "%"),
        };
        if !value.is_finite() {
            return Ok(format!("{}{suffix}", number_to_string(value)));
        }
        // Drop the sign of negative zero.
        let value = if value == 0.0 { 0.0 } else { value };
        let decimal = Decimal::try_from_f64(value, FloatPrecision::RoundTrip)
            .map_err(|err| backend(format!("{value} is out of range: {err:?}")))?;
        let formatter = match self.decimal.take() {
            Some(formatter) => formatter,
            None => DecimalFormatter::try_new(
                icu_locale(self.locale)?.into(),
                DecimalFormatterOptions::default(),
            )
            .map_err(backend)?,
        };
        let text = format!("{}{suffix}", formatter.format(&decimal));
        self.decimal = Some(formatter);
        Ok(text)
    }

    /// What: Render a millisecond timestamp as a date or a time of day.
    ///
    /// Details:
    /// - `full` dates add the weekday; `long` and `full` times match `medium`
    ///   because no time zone is shown
    fn date_time(
        &self,
        name: &str,
        kind: DateTimeKind,
        style: DateTimeStyle,
    ) -> Result<String, FormatError> {
        let millis = self.number(name)?;
        let stamp = timestamp(millis).ok_or_else(|| FormatError::InvalidValue {
            name: name.to_string(),
            expected: "a timestamp in milliseconds",
        })?;
        let locale = icu_locale(self.locale)?;
        let text = match kind {
            DateTimeKind::Date => {
                let fields = match style {
                    DateTimeStyle::Short => date_fields(Length::Short),
                    DateTimeStyle::Medium => date_fields(Length::Medium),
                    DateTimeStyle::Long => date_fields(Length::Long),
                    DateTimeStyle::Full => {
                        DateFieldSet::YMDE(fieldsets::YMDE::for_length(Length::Long))
                    }
                };
                DateTimeFormatter::<DateFieldSet>::try_new(locale.into(), fields)
                    .map_err(backend)?
                    .format(&stamp)
                    .to_string()
            }
            DateTimeKind::Time => {
                let fields = match style {
                    DateTimeStyle::Short => fieldsets::T::hm().with_length(Length::Short),
                    DateTimeStyle::Medium | DateTimeStyle::Long | DateTimeStyle::Full => {
                        fieldsets::T::hms().with_length(Length::Medium)
                    }
                };
                DateTimeFormatter::<TimeFieldSet>::try_new(locale.into(), TimeFieldSet::T(fields))
                    .map_err(backend)?
                    .format(&stamp)
                    .to_string()
            }
        };
        Ok(text)
    }

    /// CLDR plural category of `n` for the bound locale.
    fn category(
        &mut self,
        name: &str,
        n: f64,
        ordinal: bool,
    ) -> Result<PluralCategory, FormatError> {
        let slot = if ordinal {
            &mut self.ordinal
        } else {
            &mut self.cardinal
        };
        if slot.is_none() {
            let kind = if ordinal {
                PluralRuleType::ORDINAL
            } else {
                PluralRuleType::CARDINAL
            };
            *slot = Some(plural_rules(self.locale, kind)?);
        }
        let Some(rules) = slot.as_ref() else {
            return Err(FormatError::InvalidLocale {
                locale: self.locale.to_string(),
                reason: "plural rules unavailable".to_string(),
            });
        };
        rules
            .select(number_to_string(n).as_str())
            .map_err(|_| FormatError::InvalidValue {
                name: name.to_string(),
                expected: "a finite number",
            })
    }
}

/// Pick the branch for `category`, falling back to `other`.
fn select_category(
    options: &[(PluralSelector, Vec<Element>)],
    category: PluralCategory,
) -> &[Element] {
    let wanted = category_name(category);
    options
        .iter()
        .find(|(selector, _)| matches!(selector, PluralSelector::Category(c) if c == wanted))
        .or_else(|| {
            options
                .iter()
                .find(|(selector, _)| matches!(selector, PluralSelector::Category(c) if c == "other"))
        })
        .map_or(&[][..], |(_, body)| body.as_slice())
}

/// CLDR keyword for a plural category.
const fn category_name(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::ZERO => "zero",
        PluralCategory::ONE => "one",
        PluralCategory::TWO => "two",
        PluralCategory::FEW => "few",
        PluralCategory::MANY => "many",
        PluralCategory::OTHER => "other",
    }
}

/// What: Build plural rules for a locale.
///
/// Details:
/// - Tries the full tag, then its language subtag, then English
/// - Only an unparsable tag is an error
fn plural_rules(locale: &Locale, kind: PluralRuleType) -> Result<PluralRules, FormatError> {
    let invalid = |reason: String| FormatError::InvalidLocale {
        locale: locale.to_string(),
        reason,
    };
    let langid: LanguageIdentifier = locale
        .as_str()
        .parse()
        .map_err(|err| invalid(format!("{err}")))?;
    if let Ok(rules) = PluralRules::create(langid.clone(), kind) {
        return Ok(rules);
    }
    let language: LanguageIdentifier = langid
        .language
        .as_str()
        .parse()
        .map_err(|err| invalid(format!("{err}")))?;
    if let Ok(rules) = PluralRules::create(language, kind) {
        return Ok(rules);
    }
    tracing::debug!(
        "No plural rules for locale '{}', using English rules",
        locale
    );
    let english: LanguageIdentifier = "en".parse().map_err(|err| invalid(format!("{err}")))?;
    PluralRules::create(english, kind).map_err(|reason| invalid(reason.to_string()))
}

/// Year, month and day at the given length.
fn date_fields(length: Length) -> DateFieldSet {
    DateFieldSet::YMD(fieldsets::YMD::for_length(length))
}

/// Largest timestamp magnitude accepted by `date`/`time` (ECMAScript's range).
const MAX_TIMESTAMP_MILLIS: f64 = 8.64e15;

/// UTC date and time for a Unix timestamp in milliseconds.
fn timestamp(millis: f64) -> Option<DateTime<Iso>> {
    if !millis.is_finite() || millis.abs() > MAX_TIMESTAMP_MILLIS {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let utc = chrono::DateTime::from_timestamp_millis(millis.trunc() as i64)?;
    let date = Date::try_new_iso(
        utc.year(),
        u8::try_from(utc.month()).ok()?,
        u8::try_from(utc.day()).ok()?,
    )
    .ok()?;
    let time = Time::try_new(
        u8::try_from(utc.hour()).ok()?,
        u8::try_from(utc.minute()).ok()?,
        u8::try_from(utc.second()).ok()?,
        0,
    )
    .ok()?;
    Some(DateTime { date, time })
}

/// Parse the bound locale for ICU data lookups.
fn icu_locale(locale: &Locale) -> Result<IcuLocale, FormatError> {
    locale
        .as_str()
        .parse()
        .map_err(|err| FormatError::InvalidLocale {
            locale: locale.to_string(),
            reason: format!("{err}"),
        })
}

/// Wrap an ICU data or range failure.
fn backend(err: impl fmt::Display) -> FormatError {
    FormatError::Backend(err.to_string().into())
}
