//! Wildcard tokens: `name`, `name*`, `*name`, `*name*`, `*`, and their
//! `!`-negated forms.

/// Where the literal text of a wildcard token has to appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WildcardKind {
    /// `*` alone: matches everything.
    Any,
    /// No wildcard: the whole subject.
    Exact,
    /// `name*`: start of the subject.
    Prefix,
    /// `*name`: end of the subject.
    Suffix,
    /// `*name*`: anywhere in the subject.
    Contains,
}

/// A compiled wildcard token.
///
/// # Example
///
/// ```
/// use horizon_lattice_viewport::matcher::{WildcardKind, WildcardPattern};
///
/// let pattern = WildcardPattern::parse("!*padding*").unwrap();
/// assert_eq!(pattern.kind, WildcardKind::Contains);
/// assert!(pattern.negated);
/// assert_eq!(pattern.text, "padding");
/// assert!(pattern.matches("padding-right"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WildcardPattern {
    /// Match position.
    pub kind: WildcardKind,
    /// Whether the token started with `!`.
    pub negated: bool,
    /// Literal text with `!` and `*` stripped.
    pub text: String,
}

impl WildcardPattern {
    /// Compile a token. Returns `None` for tokens with a `*` in the middle
    /// or no literal text (`**`, `!`, empty), which match nothing.
    pub fn parse(token: &str) -> Option<Self> {
        let (negated, body) = match token.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, token),
        };

        let (kind, text) = if body == "*" {
            (WildcardKind::Any, "")
        } else if let Some(inner) = body
            .strip_prefix('*')
            .and_then(|rest| rest.strip_suffix('*'))
            .filter(|inner| !inner.is_empty())
        {
            (WildcardKind::Contains, inner)
        } else if let Some(rest) = body.strip_prefix('*') {
            (WildcardKind::Suffix, rest)
        } else if let Some(rest) = body.strip_suffix('*') {
            (WildcardKind::Prefix, rest)
        } else {
            (WildcardKind::Exact, body)
        };

        if kind != WildcardKind::Any && (text.is_empty() || text.contains('*')) {
            return None;
        }

        Some(Self {
            kind,
            negated,
            text: text.to_string(),
        })
    }

    /// Check whether the subject matches, ignoring negation.
    pub fn matches(&self, subject: &str) -> bool {
        match self.kind {
            WildcardKind::Any => true,
            WildcardKind::Exact => subject == self.text,
            WildcardKind::Prefix => subject.starts_with(&self.text),
            WildcardKind::Suffix => subject.ends_with(&self.text),
            WildcardKind::Contains => subject.contains(&self.text),
        }
    }
}
