//! Shared query parameter types for API handlers.

use serde::Deserialize;
use vitalflow_core::blood_group::BloodGroup;
use vitalflow_core::error::CoreError;
use vitalflow_core::pagination::{clamp_page, clamp_size, offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// `?page=&size=&filter=` for paged list screens. `page` is 0-indexed.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub filter: Option<String>,
}

impl ListParams {
    /// Clamped `(limit, offset)` for the repository call.
    pub fn window(&self) -> (i64, i64) {
        let size = clamp_size(self.size, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        (size, offset(clamp_page(self.page), size))
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }
}

/// `?limit=` for short, unpaged lists.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

/// `?bloodGroup=` on the urgent list.
#[derive(Debug, Deserialize)]
pub struct BloodGroupParams {
    #[serde(rename = "bloodGroup")]
    pub blood_group: Option<String>,
}

/// `?bloodGroup=&district=&upazila=` on the public donor search.
#[derive(Debug, Deserialize)]
pub struct DonorSearchParams {
    #[serde(rename = "bloodGroup")]
    pub blood_group: Option<String>,
    pub district: Option<String>,
    pub upazila: Option<String>,
}

/// Parse a blood group sent as a query parameter.
///
/// An unencoded `+` arrives as a space (`A+` becomes `A `), so spaces are read
/// back as `+`. Blank values mean "any group".
pub fn parse_blood_group_param(raw: Option<&str>) -> Result<Option<BloodGroup>, CoreError> {
    match raw.map(str::trim_start) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => value.replace(' ', "+").parse().map(Some),
    }
}

/// Empty strings from cleared search inputs behave like absent filters.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
