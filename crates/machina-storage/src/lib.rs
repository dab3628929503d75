//! Abstract storage contracts for the Machina engine.
//!
//! This crate defines the value universe the interpreter evaluates over:
//! immutable [`Element`] values with a distinguished undefined value, the
//! [`Enumerable`] domain capability, and the typed function-element
//! framework ([`Signature`], [`FunctionClass`], [`FunctionElement`],
//! [`FunctionTable`]).
//!
//! Elements are treated as immutable snapshots shared across the global
//! state of one step; nothing in this crate mutates a value in place.

mod element;
mod enumerable;
mod function;

pub use element::{
    CustomElement, Element, ListValue, SetValue, BOOLEAN_BACKGROUND, ELEMENT_BACKGROUND,
    LIST_BACKGROUND, NUMBER_BACKGROUND, SET_BACKGROUND, STRING_BACKGROUND,
};
pub use enumerable::Enumerable;
pub use function::{FunctionClass, FunctionElement, FunctionTable, Signature};
