//! URL construction: path substitution and query serialization.
//!
//! Nothing in this module performs network I/O.

mod builder;
pub(crate) mod query;

pub use builder::{RouteUrl, UrlBuilder};
