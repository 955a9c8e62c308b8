use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PaginationRequest {
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub search: String,
}

impl PaginationRequest {
    /// Page and limit with non-positive values replaced by the defaults and
    /// the limit capped at [`MAX_LIMIT`].
    pub fn normalized(&self) -> (i64, i64) {
        self.normalized_with(DEFAULT_LIMIT)
    }

    pub fn normalized_with(&self, default_limit: i64) -> (i64, i64) {
        let page = if self.page <= 0 { DEFAULT_PAGE } else { self.page };
        let limit = if self.limit <= 0 {
            default_limit
        } else {
            self.limit.min(MAX_LIMIT)
        };
        (page, limit)
    }

    /// Number of items to skip for a normalized page and limit.
    pub fn offset(page: i64, limit: i64) -> usize {
        usize::try_from(page.saturating_sub(1).saturating_mul(limit)).unwrap_or(usize::MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaPagination {
    pub page: i64,
    pub limit: i64,
    pub total_page: i64,
    pub total_data: i64,
}

impl MetaPagination {
    pub fn new(page: i64, limit: i64, total_data: i64) -> Self {
        MetaPagination {
            page,
            limit,
            total_page: if limit > 0 {
                total_data / limit + i64::from(total_data % limit != 0)
            } else {
                0
            },
            total_data,
        }
    }
}
