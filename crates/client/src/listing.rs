//! Paginated list view-models (My Requests, All Requests, All Users, Fundings).
//!
//! Screens count pages from 1. The API counts from 0. [`ListQuery::from_ui_page`]
//! is the one place the two meet.

use std::collections::BTreeMap;

use serde::Serialize;
use vitalflow_core::pagination::{page_count, Page, DEFAULT_PAGE_SIZE};
use vitalflow_core::request_status::RequestStatus;
use vitalflow_core::roles::AccountStatus;
use vitalflow_core::workflow::{Actor, RequestAction};

use crate::models::{DonationRequestView, DonorView};

/// Query string of every list endpoint: `?page=&size=&filter=`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    /// 0-indexed.
    pub page: i64,
    pub size: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl ListQuery {
    /// Build the API query for a 1-indexed UI page. Pages below 1 read as 1.
    pub fn from_ui_page(ui_page: i64, size: i64, filter: Option<&str>) -> Self {
        Self {
            page: ui_page.max(1) - 1,
            size: if size > 0 { size } else { DEFAULT_PAGE_SIZE },
            filter: filter
                .map(str::trim)
                .filter(|f| !f.is_empty() && !f.eq_ignore_ascii_case("all"))
                .map(str::to_string),
        }
    }

    /// The UI page this query was built from.
    pub fn ui_page(&self) -> i64 {
        self.page + 1
    }
}

/// Rows that can be tallied by a status label.
pub trait StatusKeyed {
    fn status_key(&self) -> &'static str;
}

impl StatusKeyed for DonationRequestView {
    fn status_key(&self) -> &'static str {
        self.status.as_str()
    }
}

impl StatusKeyed for DonorView {
    fn status_key(&self) -> &'static str {
        self.status.as_str()
    }
}

/// One rendered page of a list screen.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    pub items: Vec<T>,
    pub total: i64,
    /// 1-indexed.
    pub ui_page: i64,
    pub page_count: i64,
    /// Status tallies over the rows on this page only.
    pub counts: BTreeMap<&'static str, usize>,
}

impl<T: StatusKeyed> ListView<T> {
    pub fn from_page(page: Page<T>, query: &ListQuery) -> Self {
        let mut counts = BTreeMap::new();
        for item in &page.items {
            *counts.entry(item.status_key()).or_insert(0) += 1;
        }
        Self {
            total: page.total_count,
            ui_page: query.ui_page(),
            page_count: page_count(page.total_count, query.size),
            counts,
            items: page.items,
        }
    }

    pub fn count(&self, status: &str) -> usize {
        self.counts.get(status).copied().unwrap_or(0)
    }

    pub fn has_next(&self) -> bool {
        self.ui_page < self.page_count
    }

    pub fn has_previous(&self) -> bool {
        self.ui_page > 1
    }
}

impl ListView<DonationRequestView> {
    pub fn pending(&self) -> usize {
        self.count(RequestStatus::Pending.as_str())
    }

    /// Row menu per request, in display order.
    pub fn row_actions(&self, actor: &Actor) -> Vec<Vec<RequestAction>> {
        self.items.iter().map(|r| r.actions_for(actor)).collect()
    }
}

impl ListView<DonorView> {
    pub fn blocked(&self) -> usize {
        self.count(AccountStatus::Blocked.as_str())
    }
}
