//! # Pagination Parameter Normalization
//!
//! This module turns raw, untrusted query parameters into an invariant-respecting
//! [`Pagination`] bundle:
//!
//! - `limit` is always positive (default 10, optional configurable ceiling)
//! - `page` is always ≥ 1
//! - `offset` is derived from `page` and `limit` on every read, never stored
//! - the search term is stripped and wrapped into a `LIKE` pattern
//! - the order-by field is stripped down to letters and underscores
//! - the sort direction only ever holds one of two canonical values
//! - extra filters are captured only when explicitly allow-listed
//!
//! Malformed input never errors: a value that fails validation is treated the
//! same as an absent value, and the prior (or default) value is retained. List
//! endpoints should not 4xx over a junk `?limit=`.
//!
//! One [`Paginator`] per route, one [`Pagination`] per request. The paginator is
//! cheap to clone and immutable once built; the pagination value is owned by the
//! request handler and is not meant to be shared across requests or tasks.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

use crate::errors::ParseOrderingError;
use crate::sanitize::{like_pattern, strip_field_name};

/// Limit used when the request supplies none, and the floor a stored limit is
/// raised to when a junk value arrives on top of an out-of-range prior one.
const DEFAULT_LIMIT: u64 = 10;
const DEFAULT_PAGE: u64 = 1;

/// Sort direction, stored canonically.
///
/// Input is accepted case-insensitively (`asc`, `DeSc`, ...); [`as_str`]
/// renders the uppercase SQL tokens `ASC` / `DESC`.
///
/// [`as_str`]: Ordering::as_str
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Ordering {
    #[default]
    Asc,
    Desc,
}

impl Ordering {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Ordering::Asc => "ASC",
            Ordering::Desc => "DESC",
        }
    }
}

impl FromStr for Ordering {
    type Err = ParseOrderingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Ordering::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Ordering::Desc)
        } else {
            Err(ParseOrderingError(s.to_string()))
        }
    }
}

/// Value captured for an allow-listed filter parameter.
///
/// `Absent` records that the name was allow-listed but missing from the
/// request — deliberately distinct from `Present("")`, which records an
/// explicitly empty `?name=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// Raw value exactly as found in the query string.
    Present(String),
    /// Allow-listed name with no occurrence in the request.
    Absent,
}

impl FilterValue {
    /// The raw value, or `None` when absent.
    #[inline]
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            FilterValue::Present(value) => Some(value),
            FilterValue::Absent => None,
        }
    }

    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, FilterValue::Absent)
    }
}

/// Query-parameter names the normalizer reads, each overridable per route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamNames {
    pub limit: Cow<'static, str>,
    pub page: Cow<'static, str>,
    pub search: Cow<'static, str>,
    pub order_by: Cow<'static, str>,
    pub ordering: Cow<'static, str>,
}

impl Default for ParamNames {
    /// The conventional names: `limit`, `page`, `q`, `orderBy`, `order`.
    fn default() -> Self {
        Self {
            limit: Cow::Borrowed("limit"),
            page: Cow::Borrowed("page"),
            search: Cow::Borrowed("q"),
            order_by: Cow::Borrowed("orderBy"),
            ordering: Cow::Borrowed("order"),
        }
    }
}

/// Read-only view over a request's query parameters.
///
/// The normalizer needs nothing beyond `get(name) -> Option<&str>`, so any
/// request framework can feed it: collect the query pairs into a map or a
/// `Vec<(String, String)>` and pass a reference.
pub trait QuerySource {
    /// The raw value for `name`, or `None` when the parameter is absent.
    fn get(&self, name: &str) -> Option<&str>;
}

impl QuerySource for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<&str> {
        HashMap::get(self, name).map(String::as_str)
    }
}

impl QuerySource for BTreeMap<String, String> {
    fn get(&self, name: &str) -> Option<&str> {
        BTreeMap::get(self, name).map(String::as_str)
    }
}

/// Pair lists (the shape produced by `query_pairs`-style parsers).
/// A repeated key resolves to its first occurrence.
impl QuerySource for [(String, String)] {
    fn get(&self, name: &str) -> Option<&str> {
        self.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }
}

impl QuerySource for Vec<(String, String)> {
    fn get(&self, name: &str) -> Option<&str> {
        QuerySource::get(self.as_slice(), name)
    }
}

/// Per-route normalizer configuration: parameter names, the extra-filter
/// allow-list, and an optional ceiling on the requested limit.
///
/// Build one per route (or share one immutably) and call [`parse`] once per
/// request:
///
/// ```
/// use pagekit::Paginator;
/// use std::collections::HashMap;
///
/// let paginator = Paginator::new()
///     .limit_param("l")
///     .allow_filter("is_active")
///     .max_limit(100);
///
/// let query: HashMap<String, String> =
///     [("l".to_string(), "500".to_string())].into();
/// let params = paginator.parse(&query);
/// assert_eq!(params.limit(), 100);
/// ```
///
/// [`parse`]: Paginator::parse
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    names: ParamNames,
    filters: BTreeSet<String>,
    max_limit: Option<u64>,
}

impl Paginator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rename the query key read for the limit (default `limit`).
    #[inline]
    pub fn limit_param(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.names.limit = name.into();
        self
    }

    /// Rename the query key read for the page number (default `page`).
    #[inline]
    pub fn page_param(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.names.page = name.into();
        self
    }

    /// Rename the query key read for the search term (default `q`).
    #[inline]
    pub fn search_param(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.names.search = name.into();
        self
    }

    /// Rename the query key read for the order-by field (default `orderBy`).
    #[inline]
    pub fn order_by_param(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.names.order_by = name.into();
        self
    }

    /// Rename the query key read for the sort direction (default `order`).
    #[inline]
    pub fn ordering_param(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.names.ordering = name.into();
        self
    }

    /// Replace all five parameter names at once.
    #[inline]
    pub fn param_names(mut self, names: ParamNames) -> Self {
        self.names = names;
        self
    }

    /// Allow-list an extra filter parameter to capture verbatim.
    ///
    /// Only allow-listed names ever reach [`Pagination::filters`]; anything
    /// else in the query string is ignored. Note that a typo here silently
    /// drops the filter — the name must match the query key exactly.
    pub fn allow_filter(mut self, name: impl Into<String>) -> Self {
        self.filters.insert(name.into());
        self
    }

    /// Allow-list several extra filter parameters.
    pub fn allow_filters<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.extend(names.into_iter().map(Into::into));
        self
    }

    /// Cap the requested limit. Without this, any positive limit is accepted.
    ///
    /// Values below the default limit of 10 are raised to it, keeping the cap
    /// consistent with the floor the setters maintain.
    #[inline]
    pub fn max_limit(mut self, value: u64) -> Self {
        self.max_limit = Some(value.max(DEFAULT_LIMIT));
        self
    }

    /// Run the single normalization pass over a request's query parameters.
    ///
    /// Setter order is fixed (limit, page, search, ordering, order-by) and
    /// numeric values that fail to parse as integers are treated as absent.
    /// Afterwards every allow-listed filter is captured, present or not.
    pub fn parse<Q>(&self, query: &Q) -> Pagination
    where
        Q: QuerySource + ?Sized,
    {
        let mut params = Pagination::with_max_limit(self.max_limit);

        if let Some(limit) = parse_int(query.get(&self.names.limit)) {
            params.set_limit(limit);
        }
        if let Some(page) = parse_int(query.get(&self.names.page)) {
            params.set_page(page);
        }
        if let Some(q) = query.get(&self.names.search) {
            params.set_search(q);
        }
        if let Some(ordering) = query.get(&self.names.ordering) {
            params.set_ordering(ordering);
        }
        if let Some(order_by) = query.get(&self.names.order_by) {
            params.set_order_by(order_by);
        }

        for name in &self.filters {
            let value = match query.get(name) {
                Some(raw) => FilterValue::Present(raw.to_string()),
                None => FilterValue::Absent,
            };
            params.filters.insert(name.clone(), value);
        }

        params
    }
}

/// Integers are parsed leniently: surrounding whitespace is trimmed and
/// anything unparseable counts as absent.
fn parse_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse().ok())
}

/// The normalized parameter bundle for one request.
///
/// Usually produced by [`Paginator::parse`], but the setters are public so a
/// handler can populate (or adjust) one by hand:
///
/// ```
/// use pagekit::{Ordering, Pagination};
///
/// let mut params = Pagination::new();
/// params.set_limit(25).set_page(3).set_ordering("desc").set_order_by("created_at");
///
/// assert_eq!(params.offset(), 50);
/// assert_eq!(params.ordering(), Ordering::Desc);
/// ```
///
/// Every setter clamps or rejects rather than failing, is safe to call in any
/// order, and returns `&mut Self` for chaining. The offset is computed from
/// `page` and `limit` on every read, so it can never go stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    limit: u64,
    page: u64,
    q: String,
    search: String,
    order_by: String,
    ordering: Ordering,
    filters: BTreeMap<String, FilterValue>,
    max_limit: Option<u64>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new()
    }
}

impl Pagination {
    /// A bundle holding the defaults: limit 10, page 1, empty search
    /// (`"%%"` pattern), no order-by field, ascending, no filters.
    pub fn new() -> Self {
        Self::with_max_limit(None)
    }

    fn with_max_limit(max_limit: Option<u64>) -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
            q: String::new(),
            search: like_pattern(""),
            order_by: String::new(),
            ordering: Ordering::Asc,
            filters: BTreeMap::new(),
            max_limit,
        }
    }

    /// Maximum number of records to fetch. Always positive.
    #[inline]
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// 1-based page number. Always ≥ 1.
    #[inline]
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Records to skip: `(page - 1) * limit`, derived on every read.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// The raw search string exactly as supplied. For display/echo only —
    /// never interpolate this into a query; use [`search`](Self::search).
    #[inline]
    pub fn q(&self) -> &str {
        &self.q
    }

    /// The sanitized `LIKE` pattern: `%` + stripped term + `%`.
    #[inline]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Sanitized order-by field name; empty when none was accepted.
    #[inline]
    pub fn order_by(&self) -> &str {
        &self.order_by
    }

    /// Sort direction.
    #[inline]
    pub fn ordering(&self) -> Ordering {
        self.ordering
    }

    /// Captured allow-listed filters, keyed by parameter name.
    #[inline]
    pub fn filters(&self) -> &BTreeMap<String, FilterValue> {
        &self.filters
    }

    /// A single captured filter. `None` means the name was never
    /// allow-listed; `Some(FilterValue::Absent)` means it was allow-listed
    /// but missing from the request.
    #[inline]
    pub fn filter(&self, name: &str) -> Option<&FilterValue> {
        self.filters.get(name)
    }

    /// Store a limit. Non-positive values keep the prior limit, except that a
    /// prior limit below 10 is raised to 10. A configured ceiling (see
    /// [`Paginator::max_limit`]) caps accepted values.
    pub fn set_limit(&mut self, value: i64) -> &mut Self {
        if value > 0 {
            let mut limit = value.unsigned_abs();
            if let Some(max) = self.max_limit {
                limit = limit.min(max);
            }
            self.limit = limit;
        } else if self.limit < DEFAULT_LIMIT {
            self.limit = DEFAULT_LIMIT;
        }
        self
    }

    /// Store a page number. Non-positive values keep the prior page.
    pub fn set_page(&mut self, value: i64) -> &mut Self {
        if value > 0 {
            self.page = value.unsigned_abs();
        }
        self
    }

    /// Store the raw search string and derive the sanitized `LIKE` pattern
    /// from it.
    pub fn set_search(&mut self, raw: &str) -> &mut Self {
        self.search = like_pattern(raw);
        self.q = raw.to_string();
        self
    }

    /// Store an order-by field, stripped to `[A-Za-z_]`. Input that strips
    /// down to nothing keeps the prior field — a junk value never clears a
    /// previously valid order.
    pub fn set_order_by(&mut self, raw: &str) -> &mut Self {
        let field = strip_field_name(raw);
        if !field.is_empty() {
            self.order_by = field;
        }
        self
    }

    /// Store a sort direction. Accepts `asc` / `desc` case-insensitively;
    /// anything else keeps the prior direction.
    pub fn set_ordering(&mut self, raw: &str) -> &mut Self {
        if let Ok(ordering) = raw.parse() {
            self.ordering = ordering;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_seed() {
        let params = Pagination::new();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.page(), 1);
        assert_eq!(params.offset(), 0);
        assert_eq!(params.q(), "");
        assert_eq!(params.search(), "%%");
        assert_eq!(params.order_by(), "");
        assert_eq!(params.ordering(), Ordering::Asc);
        assert!(params.filters().is_empty());
    }

    #[test]
    fn set_limit_ignores_non_positive_values() {
        let mut params = Pagination::new();
        params.set_limit(25).set_limit(0).set_limit(-3);
        assert_eq!(params.limit(), 25);
    }

    #[test]
    fn set_limit_raises_an_out_of_range_prior_value_to_the_floor() {
        let mut params = Pagination::new();
        params.set_limit(5);
        assert_eq!(params.limit(), 5);
        params.set_limit(0);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn set_limit_applies_the_configured_ceiling() {
        let mut params = Pagination::with_max_limit(Some(100));
        params.set_limit(500);
        assert_eq!(params.limit(), 100);
        params.set_limit(40);
        assert_eq!(params.limit(), 40);
    }

    #[test]
    fn set_page_ignores_non_positive_values() {
        let mut params = Pagination::new();
        params.set_page(4).set_page(0).set_page(-1);
        assert_eq!(params.page(), 4);
    }

    #[test]
    fn offset_is_derived_on_every_read() {
        let mut params = Pagination::new();
        params.set_page(3).set_limit(20);
        assert_eq!(params.offset(), 40);

        // No recompute step: changing either input is immediately visible.
        params.set_limit(7);
        assert_eq!(params.offset(), 14);
        params.set_page(1);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn set_search_keeps_raw_and_derives_pattern() {
        let mut params = Pagination::new();
        params.set_search("abc;?123");
        assert_eq!(params.q(), "abc;?123");
        assert_eq!(params.search(), "%abc123%");
    }

    #[test]
    fn set_order_by_strips_disallowed_characters() {
        let mut params = Pagination::new();
        params.set_order_by("na?.;me");
        assert_eq!(params.order_by(), "name");
    }

    #[test]
    fn set_order_by_retains_prior_value_on_fully_stripped_input() {
        let mut params = Pagination::new();
        params.set_order_by("email");
        params.set_order_by("123;?");
        assert_eq!(params.order_by(), "email");
        params.set_order_by("");
        assert_eq!(params.order_by(), "email");
    }

    #[test]
    fn set_ordering_accepts_case_insensitive_tokens() {
        let mut params = Pagination::new();
        params.set_ordering("DeSc");
        assert_eq!(params.ordering(), Ordering::Desc);
        params.set_ordering("ASC");
        assert_eq!(params.ordering(), Ordering::Asc);
    }

    #[test]
    fn set_ordering_retains_prior_value_on_junk() {
        let mut params = Pagination::new();
        params.set_ordering("banana");
        assert_eq!(params.ordering(), Ordering::Asc);
        params.set_ordering("desc");
        params.set_ordering("?abc");
        assert_eq!(params.ordering(), Ordering::Desc);
    }

    #[test]
    fn ordering_parses_strictly_and_renders_sql_tokens() {
        assert_eq!("asc".parse::<Ordering>().expect("asc should parse"), Ordering::Asc);
        assert_eq!("DESC".parse::<Ordering>().expect("DESC should parse"), Ordering::Desc);
        assert_eq!(Ordering::Asc.as_str(), "ASC");
        assert_eq!(Ordering::Desc.as_str(), "DESC");

        let err = "ascending".parse::<Ordering>().expect_err("junk should not parse");
        assert_eq!(err.0, "ascending");
    }

    #[test]
    fn filter_value_accessors() {
        assert_eq!(FilterValue::Present("1".to_string()).as_deref(), Some("1"));
        assert_eq!(FilterValue::Present(String::new()).as_deref(), Some(""));
        assert_eq!(FilterValue::Absent.as_deref(), None);
        assert!(FilterValue::Absent.is_absent());
        assert!(!FilterValue::Present(String::new()).is_absent());
    }

    #[test]
    fn pair_list_sources_resolve_the_first_occurrence() {
        let pairs = vec![
            ("page".to_string(), "2".to_string()),
            ("page".to_string(), "9".to_string()),
        ];
        assert_eq!(QuerySource::get(&pairs, "page"), Some("2"));
        assert_eq!(QuerySource::get(&pairs, "limit"), None);
    }

    #[test]
    fn numeric_parsing_is_lenient() {
        assert_eq!(parse_int(Some(" 42 ")), Some(42));
        assert_eq!(parse_int(Some("-1")), Some(-1));
        assert_eq!(parse_int(Some("ten")), None);
        assert_eq!(parse_int(Some("")), None);
        assert_eq!(parse_int(None), None);
    }
}
