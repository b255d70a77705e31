//! Offset pagination shared by every list endpoint.
//!
//! The API's `page` parameter is 0-indexed. UI page selectors are 1-indexed;
//! the client translates at the call site.

use serde::{Deserialize, Serialize};

/// Page size used when the caller does not send one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a requested page size into `1..=max`.
pub fn clamp_size(size: Option<i64>, default: i64, max: i64) -> i64 {
    size.unwrap_or(default).max(1).min(max)
}

/// Clamp a requested 0-indexed page to non-negative.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(0).max(0)
}

/// Row offset for a 0-indexed page.
pub fn offset(page: i64, size: i64) -> i64 {
    page.saturating_mul(size)
}

/// Number of pages needed for `total` rows. Zero rows still render one page.
pub fn page_count(total: i64, size: i64) -> i64 {
    if size <= 0 {
        return 1;
    }
    ((total + size - 1) / size).max(1)
}

/// `{ "items": [...], "totalCount": n }` list envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(rename = "totalCount")]
    pub total_count: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: i64) -> Self {
        Self { items, total_count }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_size_uses_default_when_none() {
        assert_eq!(clamp_size(None, 10, 100), 10);
    }

    #[test]
    fn clamp_size_respects_bounds() {
        assert_eq!(clamp_size(Some(500), 10, 100), 100);
        assert_eq!(clamp_size(Some(0), 10, 100), 1);
        assert_eq!(clamp_size(Some(-3), 10, 100), 1);
    }

    #[test]
    fn clamp_page_floors_at_zero() {
        assert_eq!(clamp_page(None), 0);
        assert_eq!(clamp_page(Some(-1)), 0);
        assert_eq!(clamp_page(Some(4)), 4);
    }

    #[test]
    fn offset_is_page_times_size() {
        assert_eq!(offset(0, 10), 0);
        assert_eq!(offset(3, 10), 30);
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
    }

    #[test]
    fn envelope_uses_camel_case_total() {
        let json = serde_json::to_value(Page::new(vec![1, 2], 2)).unwrap();
        assert_eq!(json["totalCount"], 2);
        assert_eq!(json["items"].as_array().unwrap().len(), 2);
    }
}
