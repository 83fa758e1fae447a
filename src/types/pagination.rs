//! Pagination and sorting types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Page number and size, both 1-based and clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: u64,
    pub limit: u64,
}

impl PaginationParams {
    /// Clamp to page >= 1 and 1 <= limit <= MAX_PAGE_SIZE
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Zero-based page index for the paginator
    pub fn page_index(&self) -> u64 {
        self.page - 1
    }

    /// Calculate offset for database query
    pub fn offset(&self) -> u64 {
        self.page_index() * self.limit
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum UserSortField {
    FirstName,
    #[default]
    LastName,
    Email,
    CreatedAt,
    IsActive,
}

/// Query string of the admin user listing.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    /// Page number (1-based)
    #[validate(range(min = 1, message = "La página debe ser mayor o igual a 1"))]
    pub page: Option<u64>,
    /// Items per page (max 100)
    #[validate(range(min = 1, max = 100, message = "El límite debe estar entre 1 y 100"))]
    pub limit: Option<u64>,
    #[serde(default)]
    #[param(inline)]
    pub sort_by: UserSortField,
    #[serde(default)]
    #[param(inline)]
    pub sort_order: SortOrder,
    /// Case-insensitive match on first name, last name or email
    pub search: Option<String>,
    pub is_active: Option<bool>,
}

impl UserListQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(
            self.page.unwrap_or(DEFAULT_PAGE_NUMBER),
            self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }

    /// Trimmed search text, if any
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Paginated response wrapper
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub current_page: u64,
    pub items_per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PaginationMeta {
    pub fn new(params: PaginationParams, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(params.limit);
        Self {
            current_page: params.page,
            items_per_page: params.limit,
            total_items,
            total_pages,
            has_next_page: params.page < total_pages,
            has_previous_page: params.page > 1,
        }
    }
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, params: PaginationParams, total_items: u64) -> Self {
        Self {
            data,
            meta: PaginationMeta::new(params, total_items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_middle_page() {
        let meta = PaginationMeta::new(PaginationParams::new(2, 10), 35);

        assert_eq!(meta.total_pages, 4);
        assert!(meta.has_next_page);
        assert!(meta.has_previous_page);
    }

    #[test]
    fn test_meta_empty_result() {
        let meta = PaginationMeta::new(PaginationParams::default(), 0);

        assert_eq!(meta.current_page, 1);
        assert_eq!(meta.items_per_page, 10);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next_page);
        assert!(!meta.has_previous_page);
    }

    #[test]
    fn test_params_are_clamped() {
        let params = PaginationParams::new(0, 500);
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, MAX_PAGE_SIZE);
        assert_eq!(params.offset(), 0);
        assert_eq!(PaginationParams::new(3, 20).offset(), 40);
    }

    #[test]
    fn test_query_defaults() {
        let query = UserListQuery {
            search: Some("   ".into()),
            ..Default::default()
        };

        assert_eq!(query.sort_by, UserSortField::LastName);
        assert_eq!(query.sort_order, SortOrder::Asc);
        assert_eq!(query.pagination(), PaginationParams::default());
        assert_eq!(query.search_term(), None);
    }
}
