//! Shared types for list endpoints and response envelopes.

mod pagination;
mod response;

pub use pagination::{
    Paginated, PaginationMeta, PaginationParams, SortOrder, UserListQuery, UserSortField,
};
pub use response::{ApiResponse, Created, NoContent};
