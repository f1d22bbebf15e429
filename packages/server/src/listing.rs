//! The shared machinery behind every `/list/*` endpoint: lenient query
//! parameter parsing, page clamping, filter expression helpers, and the
//! count-plus-window execution that keeps `totalPages` consistent with the
//! returned page.

use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, IntoColumnRef, LikeExpr, SimpleExpr};
use sea_orm::{
    DatabaseConnection, DbErr, EntityTrait, FromQueryResult, Order, PaginatorTrait, QuerySelect,
    Select,
};
use serde::Serialize;

/// Hard upper bound on page size, whatever the client asks for.
pub const MAX_LIMIT: u64 = 100;

/// Leniently parse an optional numeric query parameter.
///
/// Absent, empty, whitespace-only, and unparseable values all mean "the
/// client did not send this filter". Never an error.
pub fn parse_i64(raw: &Option<String>) -> Option<i64> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

/// See [`parse_i64`]; for `i32` foreign keys.
pub fn parse_i32(raw: &Option<String>) -> Option<i32> {
    parse_i64(raw).and_then(|v| i32::try_from(v).ok())
}

/// A boolean query flag adds a predicate only for the literal `"true"`.
/// `"false"` and absent are both "no filter" — the asymmetry is inherited
/// behavior, kept until the product decides what "not featured" means.
pub fn flag_is_true(raw: &Option<String>) -> bool {
    raw.as_deref().map(str::trim) == Some("true")
}

/// A clamped page request. `page` and `limit` are always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u64,
    pub limit: u64,
}

impl Page {
    /// Resolve raw `page`/`limit` parameters.
    ///
    /// Unparseable input falls back to the default; zero and negative
    /// values clamp to 1; `limit` is capped at [`MAX_LIMIT`].
    pub fn from_params(page: &Option<String>, limit: &Option<String>, default_limit: u64) -> Self {
        let page = match parse_i64(page) {
            Some(p) => p.max(1) as u64,
            None => 1,
        };
        let limit = match parse_i64(limit) {
            Some(l) => l.clamp(1, MAX_LIMIT as i64) as u64,
            None => default_limit.clamp(1, MAX_LIMIT),
        };
        Self { page, limit }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

/// Pagination metadata included in every list response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Total number of matching rows across all pages.
    #[schema(example = 47)]
    pub total_items: u64,
    /// Total number of pages.
    #[schema(example = 3)]
    pub total_pages: u64,
    /// Current page number (1-based).
    #[schema(example = 1)]
    pub current_page: u64,
    /// Page size in effect.
    #[schema(example = 20)]
    pub items_per_page: u64,
}

impl PageMeta {
    pub fn new(total_items: u64, page: &Page) -> Self {
        Self {
            total_items,
            total_pages: total_items.div_ceil(page.limit.max(1)),
            current_page: page.page,
            items_per_page: page.limit,
        }
    }
}

/// The `{data, metadata}` contract shared by all list endpoints.
#[derive(Serialize, utoipa::ToSchema)]
pub struct Envelope<T> {
    pub data: Vec<T>,
    pub metadata: PageMeta,
}

/// Escape LIKE wildcard characters in a search string.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Case-insensitive substring predicate: `LOWER(col) LIKE '%term%'` with
/// the term escaped and bound, never interpolated. Returns `None` for an
/// empty term so blank search boxes add no predicate.
pub fn contains_ci<C>(col: C, term: &str) -> Option<SimpleExpr>
where
    C: IntoColumnRef,
{
    let term = escape_like(term.trim());
    if term.is_empty() {
        return None;
    }
    Some(
        Expr::expr(Func::lower(Expr::col(col)))
            .like(LikeExpr::new(format!("%{}%", term.to_lowercase())).escape('\\')),
    )
}

/// Sort direction parameter: `"asc"` is ascending, anything else descends.
pub fn sort_order(raw: &Option<String>) -> Order {
    if raw.as_deref().map(str::trim) == Some("asc") {
        Order::Asc
    } else {
        Order::Desc
    }
}

/// Inclusive sale-window bounds, defaulting to `window_days` either side
/// of `now` when the client sends nothing usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: i64,
    pub to: i64,
}

impl TimeWindow {
    pub fn resolve(from: &Option<String>, to: &Option<String>, window_days: i64, now: i64) -> Self {
        let span = window_days * 24 * 60 * 60;
        Self {
            from: parse_i64(from).unwrap_or(now - span),
            to: parse_i64(to).unwrap_or(now + span),
        }
    }
}

/// Execute a fully filtered, joined, and ordered select as a count query
/// plus a windowed query, returning the rows and the derived metadata.
///
/// The count wraps the identical select in a subquery, so both round-trips
/// see the same FROM/JOIN/WHERE. A write landing between the two can still
/// skew `totalPages` by one; accepted for an admin tool.
pub async fn run_paged<E, M>(
    db: &DatabaseConnection,
    select: Select<E>,
    page: &Page,
) -> Result<(Vec<M>, PageMeta), DbErr>
where
    E: EntityTrait,
    M: FromQueryResult + Send + Sync,
{
    let total = select.clone().count(db).await?;

    let rows = select
        .offset(Some(page.offset()))
        .limit(Some(page.limit))
        .into_model::<M>()
        .all(db)
        .await?;

    Ok((rows, PageMeta::new(total, page)))
}
