//! Listing request and response types for the paginated user search.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumString, IntoStaticStr};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Columns a listing may be ordered by.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, AsRefStr, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortColumn {
    #[default]
    CreatedAt,
    Name,
    Email,
}

impl SortColumn {
    /// Parses an allow-listed column name. Anything else, including the
    /// empty string, falls back to `created_at`.
    pub fn parse_or_default(value: &str) -> Self {
        value.trim().parse().unwrap_or_default()
    }

    /// Column name as it appears in the `users` table.
    pub fn column_name(self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Only a case-insensitive `asc` selects ascending order.
    pub fn parse_or_default(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("asc") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Raw listing parameters as received from a caller.
///
/// Query-string keys: `q`, `page`, `page_size`, `sort_by`, `sort_dir`.
/// `page` and `page_size` stay raw strings; values that are not integers
/// fall back to the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub page_size: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_dir: Option<String>,
}

impl ListQuery {
    pub fn normalize(&self) -> PageRequest {
        PageRequest::new(
            self.q.as_deref().unwrap_or_default(),
            parse_number(self.page.as_deref()).unwrap_or(1),
            parse_number(self.page_size.as_deref()).unwrap_or(DEFAULT_PAGE_SIZE),
            self.sort_by.as_deref().unwrap_or_default(),
            self.sort_dir.as_deref().unwrap_or_default(),
        )
    }
}

fn parse_number(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse().ok())
}

/// A listing request with every coercion already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Trimmed search term; empty matches everything.
    pub search: String,
    pub page: i64,
    pub page_size: i64,
    pub sort_column: SortColumn,
    pub sort_direction: SortDirection,
}

impl PageRequest {
    /// `page < 1` becomes 1, `page_size <= 0` becomes 10 and anything above
    /// 100 is clamped to 100.
    pub fn new(search: &str, page: i64, page_size: i64, sort_by: &str, sort_dir: &str) -> Self {
        let page = page.max(1);
        let page_size = if page_size <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size.min(MAX_PAGE_SIZE)
        };

        Self {
            search: search.trim().to_string(),
            page,
            page_size,
            sort_column: SortColumn::parse_or_default(sort_by),
            sort_direction: SortDirection::parse_or_default(sort_dir),
        }
    }

    pub fn offset(&self) -> i64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .max(0)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new("", 1, DEFAULT_PAGE_SIZE, "", "")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, request: &PageRequest, total: i64) -> Self {
        let total_pages = if total <= 0 {
            0
        } else {
            (total + request.page_size - 1) / request.page_size
        };

        Self {
            items,
            page: request.page,
            page_size: request.page_size,
            total,
            total_pages,
            has_next: request.page < total_pages,
        }
    }
}
