//! Abstract interface for nodes of a cache routing tree.
//!
//! A routing tree is built out of [`Route`] implementations. Leaf routes talk
//! to cache nodes, inner routes rewrite requests and forward them to their
//! children. Every route answers a [`Request`] with a [`Reply`] or with its
//! own associated error type.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod operation;
mod reply;
mod request;

pub use operation::{Operation, OperationCategory};
pub use reply::{Reply, ReplyResult};
pub use request::Request;

use std::error::Error;
use std::fmt::Debug;

use async_trait::async_trait;

/// Marker trait for `Route` errors
pub trait RouteError: Debug + Error + Send + Sync + 'static {}

/// Object-safe description of a route, used by traversers.
pub trait RouteInfo {
    /// Diagnostic name of the route, stable for the lifetime of the route.
    fn route_name(&self) -> String;
}

/// Visitor invoked on every route a request would reach.
pub trait Traverser {
    /// Called once for each route with the request as that route would see it.
    fn visit(&mut self, route: &dyn RouteInfo, request: &Request);
}

/// A trait representing a node of the routing tree.
///
/// Implementations must be safe to invoke concurrently: a single route is
/// shared by every in-flight request, including background work spawned by
/// parent routes.
#[async_trait]
pub trait Route: RouteInfo + Send + Sync + 'static {
    /// The error type returned when the request could not be served.
    type Error: RouteError;

    /// Routes the request and returns the reply of the operation.
    async fn route(&self, request: &Request) -> Result<Reply, Self::Error>;

    /// Walks the children this request would reach.
    ///
    /// Leaf routes have no children, so the default does nothing.
    fn traverse(&self, _request: &Request, _traverser: &mut dyn Traverser) {}
}

/// Visits `child` with `request` and then descends into the child's own
/// children.
pub fn traverse_child<R: Route>(child: &R, request: &Request, traverser: &mut dyn Traverser) {
    traverser.visit(child, request);
    child.traverse(request, traverser);
}
