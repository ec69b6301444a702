//! Property name filtering.

use super::wildcard::{WildcardKind, WildcardPattern};

/// Decides which declaration properties are eligible for conversion.
///
/// Tokens are partitioned once into exact, contains, prefix and suffix
/// groups, each with an include and an exclude side. For a property:
///
/// 1. an exact exclude rejects it
/// 2. an exact include accepts it
/// 3. any wildcard exclude rejects it
/// 4. any wildcard include, or a bare `*`, accepts it
///
/// An empty list accepts everything.
///
/// # Example
///
/// ```
/// use horizon_lattice_viewport::matcher::PropList;
///
/// let list = PropList::new(["*", "!margin-left", "!*padding*", "!font*"]);
/// assert!(list.matches("margin"));
/// assert!(!list.matches("margin-left"));
/// assert!(!list.matches("padding-right"));
/// assert!(!list.matches("font-size"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropList {
    match_any: bool,
    exact: Vec<WildcardPattern>,
    contains: Vec<WildcardPattern>,
    prefixes: Vec<WildcardPattern>,
    suffixes: Vec<WildcardPattern>,
    not_exact: Vec<WildcardPattern>,
    not_contains: Vec<WildcardPattern>,
    not_prefixes: Vec<WildcardPattern>,
    not_suffixes: Vec<WildcardPattern>,
}

impl PropList {
    /// Compile a list of tokens.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::default();
        let mut empty = true;

        for token in tokens {
            empty = false;
            let token = token.as_ref();
            let Some(pattern) = WildcardPattern::parse(token) else {
                tracing::debug!("Ignoring prop list token '{}'", token);
                continue;
            };

            let bucket = match (pattern.kind, pattern.negated) {
                (WildcardKind::Any, false) => {
                    list.match_any = true;
                    continue;
                }
                (WildcardKind::Any, true) => {
                    tracing::debug!("Ignoring negated wildcard in prop list");
                    continue;
                }
                (WildcardKind::Exact, false) => &mut list.exact,
                (WildcardKind::Contains, false) => &mut list.contains,
                (WildcardKind::Prefix, false) => &mut list.prefixes,
                (WildcardKind::Suffix, false) => &mut list.suffixes,
                (WildcardKind::Exact, true) => &mut list.not_exact,
                (WildcardKind::Contains, true) => &mut list.not_contains,
                (WildcardKind::Prefix, true) => &mut list.not_prefixes,
                (WildcardKind::Suffix, true) => &mut list.not_suffixes,
            };
            bucket.push(pattern);
        }

        if empty {
            list.match_any = true;
        }
        list
    }

    /// Check whether a property is eligible.
    pub fn matches(&self, prop: &str) -> bool {
        if any_match(&self.not_exact, prop) {
            return false;
        }
        if any_match(&self.exact, prop) {
            return true;
        }

        let excluded = any_match(&self.not_contains, prop)
            || any_match(&self.not_prefixes, prop)
            || any_match(&self.not_suffixes, prop);
        if excluded {
            return false;
        }

        self.match_any
            || any_match(&self.contains, prop)
            || any_match(&self.prefixes, prop)
            || any_match(&self.suffixes, prop)
    }

    /// Returns true when every property is accepted.
    pub fn matches_everything(&self) -> bool {
        self.match_any
            && self.not_exact.is_empty()
            && self.not_contains.is_empty()
            && self.not_prefixes.is_empty()
            && self.not_suffixes.is_empty()
    }

    /// Exact include names.
    pub fn exact(&self) -> Vec<&str> {
        texts(&self.exact)
    }

    /// Texts of `*name*` includes.
    pub fn contains(&self) -> Vec<&str> {
        texts(&self.contains)
    }

    /// Texts of `name*` includes.
    pub fn prefixes(&self) -> Vec<&str> {
        texts(&self.prefixes)
    }

    /// Texts of `*name` includes.
    pub fn suffixes(&self) -> Vec<&str> {
        texts(&self.suffixes)
    }

    /// Exact exclude names.
    pub fn not_exact(&self) -> Vec<&str> {
        texts(&self.not_exact)
    }

    /// Texts of `!*name*` excludes.
    pub fn not_contains(&self) -> Vec<&str> {
        texts(&self.not_contains)
    }

    /// Texts of `!name*` excludes.
    pub fn not_prefixes(&self) -> Vec<&str> {
        texts(&self.not_prefixes)
    }

    /// Texts of `!*name` excludes.
    pub fn not_suffixes(&self) -> Vec<&str> {
        texts(&self.not_suffixes)
    }
}

fn any_match(bucket: &[WildcardPattern], prop: &str) -> bool {
    bucket.iter().any(|pattern| pattern.matches(prop))
}

fn texts(bucket: &[WildcardPattern]) -> Vec<&str> {
    bucket.iter().map(|pattern| pattern.text.as_str()).collect()
}
