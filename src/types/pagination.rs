//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Resolved `page` / `limit` pair for a list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: usize,
    pub limit: usize,
}

impl PaginationParams {
    /// Resolve raw query values. Missing, non-numeric or non-positive values
    /// fall back to the defaults; `limit` is capped at `MAX_PAGE_SIZE`.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE_NUMBER),
            limit: parse_positive(limit)
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .min(MAX_PAGE_SIZE),
        }
    }

    /// Number of items to skip
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|v| *v > 0)
}

/// One page of a filtered collection
#[derive(Debug)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub pages: usize,
}

impl<T> Paginated<T> {
    /// Slice the full filtered set down to the requested page.
    pub fn from_items(items: Vec<T>, params: PaginationParams) -> Self {
        let total = items.len();
        let limit = params.limit.max(1);
        let data = items
            .into_iter()
            .skip(params.offset())
            .take(limit)
            .collect();

        Self {
            data,
            meta: PaginationMeta {
                page: params.page,
                limit,
                total,
                pages: total.div_ceil(limit),
            },
        }
    }

    /// Convert each item, keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
