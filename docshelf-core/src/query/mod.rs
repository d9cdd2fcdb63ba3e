//! Share-list filtering and pagination.

pub mod pagination;
pub mod share_filter;

pub use pagination::{
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageOrder, PageParams, Pagination,
    ShareSortField, SortDirection,
};
pub use share_filter::{END_OF_DAY_SECONDS, ShareListFilter};
