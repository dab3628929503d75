//! The [`Enumerable`] capability: values that are finite domains.

use crate::element::{Element, ListValue, SetValue};

/// Capability of a value that represents a finite domain.
///
/// `enumerate` returns a fresh snapshot on every call; callers own the
/// vector and may consume it freely. Implementations with a native
/// insertion order additionally offer an *indexed view*: a stable,
/// randomly-indexable ordering. Callers that consume a domain across
/// several micro-steps must prefer the indexed view when offered,
/// because plain enumeration order is implementation-defined for
/// unordered domains.
pub trait Enumerable {
    /// Number of elements in the domain.
    fn size(&self) -> usize;

    /// Membership under value equality.
    fn contains(&self, e: &Element) -> bool;

    /// A fresh snapshot of the domain's elements.
    fn enumerate(&self) -> Vec<Element>;

    /// Whether this domain offers a stable indexed ordering.
    fn supports_indexed_view(&self) -> bool {
        false
    }

    /// The stable indexed ordering. Defaults to enumeration order for
    /// domains without one; check [`supports_indexed_view`](Self::supports_indexed_view)
    /// before relying on stability.
    fn indexed_view(&self) -> Vec<Element> {
        self.enumerate()
    }
}

impl Enumerable for ListValue {
    fn size(&self) -> usize {
        self.len()
    }

    fn contains(&self, e: &Element) -> bool {
        self.items().contains(e)
    }

    fn enumerate(&self) -> Vec<Element> {
        self.items().to_vec()
    }

    fn supports_indexed_view(&self) -> bool {
        true
    }

    fn indexed_view(&self) -> Vec<Element> {
        self.items().to_vec()
    }
}

impl Enumerable for SetValue {
    fn size(&self) -> usize {
        self.len()
    }

    fn contains(&self, e: &Element) -> bool {
        self.items().contains(e)
    }

    fn enumerate(&self) -> Vec<Element> {
        self.items().to_vec()
    }
}
