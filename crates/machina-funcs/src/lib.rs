//! Derived list function elements for the Machina engine.
//!
//! Every function here follows the persistent-update discipline: a
//! "mutating" operation builds and returns a *new* list value and leaves
//! its arguments untouched, because elements are immutable snapshots
//! shared across the global state of a step. Every precondition failure
//! resolves to `undef`, never an error.

mod list;

pub use list::{DropFn, NthFn, ReverseFn, SetNthFn, TakeFn};

use machina_storage::FunctionTable;
use std::sync::Arc;

/// Register the whole list function family on a table.
pub fn register_list_functions(table: &mut FunctionTable) {
    table.register(Arc::new(SetNthFn::new()));
    table.register(Arc::new(NthFn::new()));
    table.register(Arc::new(TakeFn::new()));
    table.register(Arc::new(DropFn::new()));
    table.register(Arc::new(ReverseFn::new()));
}
