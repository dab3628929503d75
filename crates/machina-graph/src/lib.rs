//! Graph values and cached derived connectivity metrics.
//!
//! [`GraphValue`] joins the element universe as a custom element.
//! Connectivity analysis is expensive relative to a single function
//! application, so it is computed once per graph *identity* and memoized
//! in a [`ConnectivityCache`] whose validity window is one step: the
//! host clears it at every step boundary, because aggregate values are
//! immutable snapshots reconstructed fresh each step.

mod connectivity;
mod functions;
mod graph;

pub use connectivity::{ConnectivityCache, ConnectivityIndex};
pub use functions::{ConnectedSetFn, IsConnectedFn};
pub use graph::{GraphValue, GRAPH_BACKGROUND};

use machina_storage::FunctionTable;
use std::sync::Arc;

/// Register the derived graph metric functions, all reading through the
/// given cache.
pub fn register_graph_functions(table: &mut FunctionTable, cache: Arc<ConnectivityCache>) {
    table.register(Arc::new(ConnectedSetFn::new(cache.clone())));
    table.register(Arc::new(IsConnectedFn::new(cache)));
}
