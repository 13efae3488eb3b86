//! Category scope patterns.
//!
//! A reading agent requests a scoped slice of the profile by listing
//! category patterns like `a2p:travel.*`. Enforcement is the profile
//! service's job; these types exist so requests can be expressed and so
//! test doubles can filter the way the real service does.

use serde::{Deserialize, Serialize};

use std::fmt;

/// A single category pattern: either an exact category or a prefix
/// wildcard ending in `.*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopePattern(String);

impl ScopePattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a concrete category falls under this pattern.
    ///
    /// `a2p:travel.*` matches `a2p:travel.seats` and `a2p:travel`
    /// itself; `a2p:preferences` matches only exactly.
    pub fn matches(&self, category: &str) -> bool {
        match self.0.strip_suffix(".*") {
            Some(prefix) => {
                category == prefix
                    || category
                        .strip_prefix(prefix)
                        .is_some_and(|rest| rest.starts_with('.'))
            }
            None => category == self.0,
        }
    }
}

impl fmt::Display for ScopePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ScopePattern {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Ordered set of scope patterns defining the maximum visible slice of
/// a profile for one read.
///
/// An empty or denied result under any scope set is a valid outcome,
/// never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeSet(Vec<ScopePattern>);

impl ScopeSet {
    pub fn new(patterns: impl IntoIterator<Item = impl Into<ScopePattern>>) -> Self {
        Self(patterns.into_iter().map(Into::into).collect())
    }

    pub fn patterns(&self) -> &[ScopePattern] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any pattern in the set covers the given category.
    pub fn covers(&self, category: &str) -> bool {
        self.0.iter().any(|p| p.matches(category))
    }

    /// Comma-separated form for query-string transport.
    pub fn to_query_value(&self) -> String {
        self.0
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl From<&str> for ScopeSet {
    fn from(s: &str) -> Self {
        Self::new(s.split(',').map(str::trim).filter(|p| !p.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_matches_subcategories() {
        let pattern = ScopePattern::new("a2p:travel.*");
        assert!(pattern.matches("a2p:travel.seats"));
        assert!(pattern.matches("a2p:travel.hotels"));
        assert!(pattern.matches("a2p:travel"));
        assert!(!pattern.matches("a2p:food.cuisines"));
    }

    #[test]
    fn wildcard_does_not_match_sibling_prefix() {
        // "a2p:travel.*" must not match "a2p:travels.extra"
        let pattern = ScopePattern::new("a2p:travel.*");
        assert!(!pattern.matches("a2p:travels.extra"));
    }

    #[test]
    fn exact_pattern_matches_only_exactly() {
        let pattern = ScopePattern::new("a2p:preferences");
        assert!(pattern.matches("a2p:preferences"));
        assert!(!pattern.matches("a2p:preferences.color"));
    }

    #[test]
    fn scope_set_covers_any_pattern() {
        let scopes = ScopeSet::new(["a2p:travel.*", "a2p:preferences"]);
        assert!(scopes.covers("a2p:travel.dietary"));
        assert!(scopes.covers("a2p:preferences"));
        assert!(!scopes.covers("a2p:food.budget"));
    }

    #[test]
    fn empty_scope_set_covers_nothing() {
        let scopes = ScopeSet::default();
        assert!(scopes.is_empty());
        assert!(!scopes.covers("a2p:travel.seats"));
    }

    #[test]
    fn query_value_roundtrip() {
        let scopes = ScopeSet::new(["a2p:travel.*", "a2p:food.*"]);
        assert_eq!(scopes.to_query_value(), "a2p:travel.*,a2p:food.*");
        let parsed = ScopeSet::from("a2p:travel.*, a2p:food.*");
        assert_eq!(parsed, scopes);
    }
}
