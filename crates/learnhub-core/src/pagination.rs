//! Pagination utilities for list endpoints.
//!
//! List endpoints accept page-based query parameters:
//!
//! - `page`: Page number (1-indexed, default: 1)
//! - `limit`: Items per page (1-100, default: 10)
//! - `sortBy`: Field to sort by (endpoint specific)
//! - `sortOrder`: `asc` or `desc` (default: `desc`)
//!
//! # Example
//!
//! ```ignore
//! use learnhub_core::{Paginated, PaginationParams};
//!
//! async fn list_courses(Query(params): Query<PaginationParams>) -> ApiResponse<Paginated<Course>> {
//!     let courses = store.courses().await;
//!     ApiResponse::ok("Courses retrieved successfully", Paginated::from_items(courses, &params))
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Deserializes an optional string into an optional i64.
///
/// Query parameters may arrive as empty strings, which are treated as `None`.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Metadata about a paginated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Total number of items across all pages
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Items per page (the limit that was applied)
    pub limit: i64,
    /// Number of pages available
    pub total_pages: i64,
}

/// A page of items together with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Paginated<T> {
    pub meta: PaginationMeta,
    pub data: Vec<T>,
}

/// Query parameters for pagination and sorting.
///
/// `limit` is clamped to [1, 100] and `page` to a minimum of 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Maximum number of items per page (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    /// Field to sort by
    #[serde(default)]
    pub sort_by: Option<String>,
    /// Sort direction
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
}

impl PaginationParams {
    /// Returns the effective limit, clamped to [1, 100].
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    /// Returns the effective page, clamped to a minimum of 1.
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Number of items before the requested page. Saturates instead of
    /// overflowing for absurd page numbers.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    #[must_use]
    pub fn sort_order(&self) -> SortOrder {
        self.sort_order.unwrap_or_default()
    }
}

impl<T> Paginated<T> {
    /// Slices an already filtered and sorted list into the requested page.
    pub fn from_items(items: Vec<T>, params: &PaginationParams) -> Self {
        let total = i64::try_from(items.len()).unwrap_or(i64::MAX);
        let limit = params.limit();
        let offset = usize::try_from(params.offset()).unwrap_or(usize::MAX);

        let data = items
            .into_iter()
            .skip(offset)
            .take(usize::try_from(limit).unwrap_or(1))
            .collect();

        Self {
            meta: PaginationMeta {
                total,
                page: params.page(),
                limit,
                total_pages: total.saturating_add(limit - 1) / limit,
            },
            data,
        }
    }
}
