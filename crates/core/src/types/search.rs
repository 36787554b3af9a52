//! Customer search term.

use serde::Serialize;

/// Escape character used in `LIKE ... ESCAPE` clauses built from a [`SearchTerm`].
pub const LIKE_ESCAPE: char = '\\';

/// A trimmed, non-empty search string.
///
/// The term is matched as a literal substring: `LIKE` wildcards typed by the
/// user are escaped by [`SearchTerm::like_pattern`], so `50%` finds the text
/// "50%" rather than everything starting with "50".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Parse raw input. Whitespace-only or empty input means "no filter".
    ///
    /// ```rust
    /// # use customer_insights_core::SearchTerm;
    /// assert!(SearchTerm::parse("   ").is_none());
    /// assert_eq!(SearchTerm::parse("  john ").unwrap().as_str(), "john");
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    /// The trimmed term as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A `%term%` pattern with `%`, `_` and the escape character escaped.
    #[must_use]
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for c in self.0.chars() {
            if matches!(c, '%' | '_' | LIKE_ESCAPE) {
                pattern.push(LIKE_ESCAPE);
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}

impl std::fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let term = SearchTerm::parse("\tSmith \n");
        assert_eq!(term.map(|t| t.to_string()), Some("Smith".to_string()));
    }

    #[test]
    fn test_parse_empty_is_none() {
        assert!(SearchTerm::parse("").is_none());
        assert!(SearchTerm::parse(" \t ").is_none());
    }

    #[test]
    fn test_like_pattern_wraps_term() {
        let term = SearchTerm::parse("john").map(|t| t.like_pattern());
        assert_eq!(term.as_deref(), Some("%john%"));
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        let term = SearchTerm::parse(r"a%b_c\d").map(|t| t.like_pattern());
        assert_eq!(term.as_deref(), Some(r"%a\%b\_c\\d%"));
    }

    #[test]
    fn test_like_pattern_leaves_quotes_alone() {
        // Quotes are harmless because the pattern is always bound, never interpolated.
        let term = SearchTerm::parse("o'brien").map(|t| t.like_pattern());
        assert_eq!(term.as_deref(), Some("%o'brien%"));
    }
}
