//! Free-text search box semantics.
//!
//! A query is either a case-insensitive name substring, or, when it starts with
//! [`ID_MARKER`], an exact id lookup.

use crate::catalog::CatalogItem;

/// Prefix switching the query from name search to id lookup
pub const ID_MARKER: char = '#';

/// A parsed search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Empty input: no constraint
    Any,
    /// Just the marker: id mode with nothing typed yet, no constraint
    AnyId,
    /// Exact id match
    Id(i64),
    /// Marker followed by something that is not a number
    NoMatch,
    /// Lowercased name substring
    Name(String),
}

impl SearchQuery {
    pub fn parse(raw: &str) -> Self {
        let query = raw.to_lowercase();
        if query.is_empty() {
            return SearchQuery::Any;
        }

        match query.strip_prefix(ID_MARKER) {
            Some("") => SearchQuery::AnyId,
            Some(rest) => parse_leading_int(rest).map_or(SearchQuery::NoMatch, SearchQuery::Id),
            None => SearchQuery::Name(query),
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        matches!(self, SearchQuery::Any | SearchQuery::AnyId)
    }

    pub fn matches(&self, item: &CatalogItem) -> bool {
        match self {
            SearchQuery::Any | SearchQuery::AnyId => true,
            SearchQuery::Id(id) => i64::from(item.id) == *id,
            SearchQuery::NoMatch => false,
            SearchQuery::Name(needle) => item.name.to_lowercase().contains(needle.as_str()),
        }
    }
}

/// Integer prefix of `s`: leading whitespace skipped, optional sign, then the
/// run of ASCII digits. Anything after the digits is ignored.
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Overflowing input names no real id; saturate so it matches nothing.
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_and_marker() {
        assert_eq!(SearchQuery::parse(""), SearchQuery::Any);
        assert_eq!(SearchQuery::parse("#"), SearchQuery::AnyId);
        assert!(SearchQuery::parse("#").is_unconstrained());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(SearchQuery::parse("#25"), SearchQuery::Id(25));
        assert_eq!(SearchQuery::parse("#007"), SearchQuery::Id(7));
        assert_eq!(SearchQuery::parse("# 12"), SearchQuery::Id(12));
        assert_eq!(SearchQuery::parse("#25abc"), SearchQuery::Id(25));
        assert_eq!(SearchQuery::parse("#-3"), SearchQuery::Id(-3));
    }

    #[test]
    fn test_parse_id_without_digits() {
        assert_eq!(SearchQuery::parse("#xyz"), SearchQuery::NoMatch);
        assert_eq!(SearchQuery::parse("# "), SearchQuery::NoMatch);
        assert_eq!(SearchQuery::parse("#-"), SearchQuery::NoMatch);
    }

    #[test]
    fn test_parse_name_is_lowercased() {
        assert_eq!(
            SearchQuery::parse("PikA"),
            SearchQuery::Name("pika".to_string())
        );
        assert_eq!(
            SearchQuery::parse("mr 25"),
            SearchQuery::Name("mr 25".to_string())
        );
    }

    #[test]
    fn test_overflowing_id_matches_nothing() {
        let query = SearchQuery::parse("#99999999999999999999999");
        assert_eq!(query, SearchQuery::Id(i64::MAX));
        let item = CatalogItem {
            id: u32::MAX,
            ..Default::default()
        };
        assert!(!query.matches(&item));
    }

    #[test]
    fn test_matches_name_case_insensitively() {
        let item = CatalogItem {
            id: 25,
            name: "Pikachu".to_string(),
            ..Default::default()
        };
        assert!(SearchQuery::parse("kach").matches(&item));
        assert!(SearchQuery::parse("PIKA").matches(&item));
        assert!(!SearchQuery::parse("raichu").matches(&item));
        assert!(SearchQuery::parse("#25").matches(&item));
        assert!(!SearchQuery::parse("#26").matches(&item));
        assert!(!SearchQuery::parse("#xyz").matches(&item));
    }
}
