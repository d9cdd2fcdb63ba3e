use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Share columns a caller may order by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareSortField {
    Id,
    CreateTime,
    ExpireTime,
    AccessCount,
}

impl ShareSortField {
    pub fn column(self) -> &'static str {
        match self {
            ShareSortField::Id => "id",
            ShareSortField::CreateTime => "create_time",
            ShareSortField::ExpireTime => "expire_time",
            ShareSortField::AccessCount => "access_count",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "id" => Some(ShareSortField::Id),
            "create_time" => Some(ShareSortField::CreateTime),
            "expire_time" => Some(ShareSortField::ExpireTime),
            "access_count" => Some(ShareSortField::AccessCount),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOrder {
    pub field: ShareSortField,
    pub direction: SortDirection,
}

impl PageOrder {
    pub const ID_DESC: PageOrder = PageOrder {
        field: ShareSortField::Id,
        direction: SortDirection::Desc,
    };
}

/// Raw pagination parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Normalized pagination: page is 1-based, size clamped, order optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub order: Option<PageOrder>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            order: None,
        }
    }
}

impl Pagination {
    /// Normalize raw parameters. Unknown sort fields are ignored rather than
    /// rejected; an unknown direction falls back to descending.
    pub fn from_params(params: &PageParams, default_page_size: u32) -> Self {
        let page = params.page.unwrap_or(1).max(1);
        let page_size = params
            .page_size
            .unwrap_or(default_page_size)
            .clamp(1, MAX_PAGE_SIZE);
        let order = params
            .sort_by
            .as_deref()
            .and_then(ShareSortField::parse)
            .map(|field| PageOrder {
                field,
                direction: params
                    .sort_order
                    .as_deref()
                    .and_then(SortDirection::parse)
                    .unwrap_or(SortDirection::Desc),
            });

        Self {
            page,
            page_size,
            order,
        }
    }

    /// Explicit order, or id descending when the caller gave none.
    pub fn order_or_default(&self) -> PageOrder {
        self.order.unwrap_or(PageOrder::ID_DESC)
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

/// One page of results plus the metadata clients need to page further.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, pagination: &Pagination, total: u64) -> Self {
        Self {
            items,
            page: pagination.page,
            page_size: pagination.page_size,
            total,
        }
    }
}
