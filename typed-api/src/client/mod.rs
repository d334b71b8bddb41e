//! The typed request factory.
//!
//! [`TypedApi`] binds a [`RouteSchema`](crate::RouteSchema) to a
//! [`Transport`](crate::Transport) and hands out one request function per
//! (route, method) pair.

mod endpoint;
mod request;
mod typed_api;

pub use endpoint::{Endpoint, EndpointFn};
pub use request::{PreparedRequest, RequestFn};
pub use typed_api::TypedApi;
