//! Cursor pagination for list endpoints.
//!
//! List endpoints answer with `{ "data": [...], "next_cursor": "..." }`. A
//! missing, `null` or empty `next_cursor` marks the last page; otherwise the
//! token is sent back verbatim as the `cursor` query parameter.
//!
//! - [`Page`] - one fetched page with an index-based cursor over its items
//! - [`Pager`] - a forward-only walk over every page, also usable as a `Stream`

mod page;
mod pager;

pub use page::{ListResponse, Page, PageRequest};
pub use pager::Pager;

/// Query parameter carrying the continuation token.
pub const CURSOR_PARAM: &str = "cursor";

/// Largest page size the API accepts; also its default.
pub const MAX_LIMIT: u32 = 100;
