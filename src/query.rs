//! Serde-facing query struct for framework extractors.

use serde::Deserialize;

#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

use crate::paginate::Pagination;

/// The five conventional pagination parameters, as a deserializable struct.
///
/// Drop this into a framework's query extractor (e.g. axum's `Query<PageQuery>`)
/// and call [`into_pagination`] to run the same normalization the
/// [`Paginator`](crate::Paginator) applies:
///
/// ```
/// use pagekit::PageQuery;
///
/// let query = PageQuery {
///     limit: Some(0),
///     page: Some(-1),
///     q: Some("abc;?123".to_string()),
///     order_by: Some("na?.;me".to_string()),
///     ordering: Some("?abc".to_string()),
/// };
///
/// let params = query.into_pagination();
/// assert_eq!(params.limit(), 10);
/// assert_eq!(params.page(), 1);
/// assert_eq!(params.search(), "%abc123%");
/// assert_eq!(params.order_by(), "name");
/// ```
///
/// Parameter-name overrides and filter capture are not expressible through a
/// static derive; routes needing those go through
/// [`Paginator::parse`](crate::Paginator::parse) instead.
///
/// [`into_pagination`]: PageQuery::into_pagination
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub page: Option<i64>,
    pub q: Option<String>,
    #[serde(rename = "orderBy")]
    pub order_by: Option<String>,
    #[serde(rename = "order")]
    pub ordering: Option<String>,
}

impl PageQuery {
    /// Normalize into a [`Pagination`], applying the usual defaulting,
    /// clamping, and sanitization. Fields left `None` keep their defaults.
    pub fn into_pagination(self) -> Pagination {
        let mut params = Pagination::new();
        if let Some(limit) = self.limit {
            params.set_limit(limit);
        }
        if let Some(page) = self.page {
            params.set_page(page);
        }
        if let Some(q) = &self.q {
            params.set_search(q);
        }
        if let Some(ordering) = &self.ordering {
            params.set_ordering(ordering);
        }
        if let Some(order_by) = &self.order_by {
            params.set_order_by(order_by);
        }
        params
    }
}
