use std::fmt::Display;

/// Normalizes a tag the way it is stored: trimmed and lower-cased.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// A normalized single-tag filter for list queries.
///
/// Matching is exact containment in the tag list: the filter `a` matches a
/// bookmark tagged `["a", "b"]` but not one tagged `["cat"]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TagFilter(String);

impl TagFilter {
    /// Builds a filter from raw query input.
    ///
    /// Returns `None` when the input is empty after trimming, which callers
    /// treat the same as an absent filter.
    pub fn parse(raw: &str) -> Option<Self> {
        let tag = normalize_tag(raw);
        if tag.is_empty() {
            None
        } else {
            Some(Self(tag))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TagFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize_tag("  Rust "), "rust");
        assert_eq!(normalize_tag("WEB-Dev"), "web-dev");
    }

    #[test]
    fn filter_is_normalized() {
        let filter = TagFilter::parse(" Seed ").unwrap();
        assert_eq!(filter.as_str(), "seed");
    }

    #[test]
    fn blank_filter_is_absent() {
        assert!(TagFilter::parse("").is_none());
        assert!(TagFilter::parse("   ").is_none());
    }
}
