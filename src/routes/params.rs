use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::Region;

/// Page window for admin listings. Out-of-range values are clamped,
/// never rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

/// Optional `d.m.yyyy` date; endpoints fall back to the current admin
/// window when it is missing.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RouteQuery {
    pub date: Option<String>,
    /// Defaults to the region whose route runs on the chosen date.
    pub region: Option<Region>,
}

/// Filters for the admin order listing. `page` and `per_page` stay inline;
/// behind a `#[serde(flatten)]` pagination struct they reach serde as
/// strings and fail to parse as numbers.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminOrdersQuery {
    pub date: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl AdminOrdersQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}
