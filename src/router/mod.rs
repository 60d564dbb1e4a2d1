//! Path routing for segroute
//!
//! Routes are kept in a segment trie ([`RouteNode`]) keyed by the output of
//! [`segment`]. [`Router`] owns the trie, times every dispatch, and feeds the
//! lossy metrics pipeline.
//!
//! # Lifecycle
//!
//! Registration needs `&mut Router`; serving goes through a shared
//! `Arc<Router>`. Once the router is shared no further routes can be added,
//! so lookups during serving run without locks.

pub mod dispatch;
pub mod segment;
pub mod trie;

pub use dispatch::Router;
pub use segment::segment;
pub use trie::RouteNode;

use axum::{extract::Request, response::Response};
use futures::future::BoxFuture;
use std::sync::Arc;

/// Type-erased request handler bound to a route
pub type Handler = Arc<dyn Fn(Request) -> BoxFuture<'static, Response> + Send + Sync>;
