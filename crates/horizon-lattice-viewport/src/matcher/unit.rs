//! Finding numeric literals that carry a given unit.

use std::borrow::Cow;
use std::ops::Range;

use regex::{Captures, Regex};

use crate::{Error, Result};

/// A numeric literal followed by the unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitMatch<'t> {
    /// The whole token, sign and unit included (`-0.5px`).
    pub full: &'t str,
    /// The unsigned number (`0.5`).
    pub number: &'t str,
    /// Whether a `-` sign preceded the number.
    pub negative: bool,
    /// Byte range of `full` in the searched text.
    pub range: Range<usize>,
}

impl<'t> UnitMatch<'t> {
    fn from_captures(caps: &Captures<'t>) -> Option<Self> {
        let number = caps.name("number")?;
        let full = caps.get(0)?;
        Some(Self {
            full: full.as_str(),
            number: number.as_str(),
            negative: caps.name("sign").is_some(),
            range: full.range(),
        })
    }
}

/// Matcher for `<number><unit>` tokens in declaration values.
///
/// Numbers may have a leading `-` and a leading `.` but no exponent. The
/// unit is matched case-sensitively and must not run on into more word
/// characters, so `16PX` and `16pixels` are not `px` tokens. Quoted strings
/// and `url(...)` arguments are skipped.
///
/// # Example
///
/// ```
/// use horizon_lattice_viewport::matcher::UnitPattern;
///
/// let pattern = UnitPattern::new("px").unwrap();
/// let numbers: Vec<_> = pattern
///     .matches("0 0 20px url(16px.jpg) '3px' -.5px 14PX")
///     .map(|m| m.full)
///     .collect();
/// assert_eq!(numbers, ["20px", "-.5px"]);
/// ```
#[derive(Debug, Clone)]
pub struct UnitPattern {
    unit: String,
    regex: Regex,
}

impl UnitPattern {
    /// Build the matcher for a unit.
    pub fn new(unit: &str) -> Result<Self> {
        if unit.is_empty() {
            return Err(Error::config("source unit must not be empty"));
        }

        let boundary = match unit.chars().last() {
            Some(c) if c.is_alphanumeric() || c == '_' => r"\b",
            _ => "",
        };
        let source = format!(
            r#""[^"]+"|'[^']+'|url\([^)]+\)|(?P<sign>-)?(?P<number>\d*\.?\d+){}{}"#,
            regex::escape(unit),
            boundary
        );
        let regex = Regex::new(&source).map_err(|e| Error::invalid_pattern(source.clone(), e))?;

        Ok(Self {
            unit: unit.to_string(),
            regex,
        })
    }

    /// The unit this matcher looks for.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Iterate over the unit tokens in `text`, left to right.
    pub fn matches<'p, 't>(&'p self, text: &'t str) -> impl Iterator<Item = UnitMatch<'t>> + 'p
    where
        't: 'p,
    {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| UnitMatch::from_captures(&caps))
    }

    /// Replace every unit token in `text`.
    ///
    /// The callback returns the replacement, or `None` to keep the token as
    /// written. Skipped strings and urls are always kept.
    pub fn replace_all<'t, F>(&self, text: &'t str, mut replace: F) -> Cow<'t, str>
    where
        F: FnMut(&UnitMatch<'_>) -> Option<String>,
    {
        self.regex.replace_all(text, |caps: &Captures<'_>| {
            match UnitMatch::from_captures(caps) {
                Some(token) => replace(&token).unwrap_or_else(|| token.full.to_string()),
                None => caps[0].to_string(),
            }
        })
    }
}
