//! The element model: immutable values in the machine's universe.
//!
//! [`Element`] is a cheap-to-clone value enum. Aggregates sit behind
//! [`Arc`] so cloning a list never copies its items, and the same
//! allocation can be referenced from many places in one state snapshot.
//! Equality is value-based throughout; identity only matters to caches
//! that key on `Arc::as_ptr`.

use crate::enumerable::Enumerable;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Background (type) names used in function signatures and diagnostics.
pub const ELEMENT_BACKGROUND: &str = "ELEMENT";
pub const BOOLEAN_BACKGROUND: &str = "BOOLEAN";
pub const NUMBER_BACKGROUND: &str = "NUMBER";
pub const STRING_BACKGROUND: &str = "STRING";
pub const LIST_BACKGROUND: &str = "LIST";
pub const SET_BACKGROUND: &str = "SET";

/// An extension point for plugin-defined values (graphs, maps, ...).
///
/// Implementors join the element universe through [`Element::Custom`]
/// without this crate knowing their concrete type.
pub trait CustomElement: fmt::Debug + Send + Sync {
    /// Background name of this value (e.g. `"GRAPH"`).
    fn background(&self) -> &'static str;

    /// Human-readable rendering, used in diagnostics.
    fn denotation(&self) -> String;

    /// Value-based equality against another custom element.
    ///
    /// Callers guarantee `other` has the same [`background`](Self::background).
    fn value_eq(&self, other: &dyn CustomElement) -> bool;

    /// Expose the [`Enumerable`] capability, if this value is a domain.
    fn as_enumerable(&self) -> Option<&dyn Enumerable> {
        None
    }

    /// Downcast hook for concrete consumers (function elements).
    fn as_any(&self) -> &dyn Any;
}

/// An immutable value in the machine's universe.
///
/// `Undef` is a first-class value, not an error: it is what function
/// elements return on any precondition violation, and what undefined
/// operands propagate through advisory operators.
#[derive(Debug, Clone, Default)]
pub enum Element {
    /// The distinguished "no value" value.
    #[default]
    Undef,
    Boolean(bool),
    Number(f64),
    String(Arc<str>),
    List(Arc<ListValue>),
    Set(Arc<SetValue>),
    /// A plugin-defined value (e.g. a graph).
    Custom(Arc<dyn CustomElement>),
}

impl Element {
    pub fn boolean(b: bool) -> Self {
        Element::Boolean(b)
    }

    pub fn number(n: f64) -> Self {
        Element::Number(n)
    }

    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Element::String(s.into())
    }

    pub fn list(items: impl Into<Vec<Element>>) -> Self {
        Element::List(Arc::new(ListValue::new(items.into())))
    }

    pub fn set(items: impl IntoIterator<Item = Element>) -> Self {
        Element::Set(Arc::new(SetValue::new(items)))
    }

    pub fn is_undef(&self) -> bool {
        matches!(self, Element::Undef)
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Element::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Element::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListValue> {
        match self {
            Element::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&SetValue> {
        match self {
            Element::Set(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret this element as a natural-number index, if it is one.
    ///
    /// Naturals are non-negative whole numbers; anything else is `None`.
    pub fn as_natural(&self) -> Option<usize> {
        match self {
            Element::Number(n) if n.fract() == 0.0 && *n >= 0.0 && *n <= usize::MAX as f64 => {
                Some(*n as usize)
            }
            _ => None,
        }
    }

    /// Surface the [`Enumerable`] capability of this value, if any.
    pub fn as_enumerable(&self) -> Option<&dyn Enumerable> {
        match self {
            Element::List(l) => Some(l.as_ref() as &dyn Enumerable),
            Element::Set(s) => Some(s.as_ref() as &dyn Enumerable),
            Element::Custom(c) => c.as_enumerable(),
            _ => None,
        }
    }

    /// Background name of this value.
    pub fn background(&self) -> &'static str {
        match self {
            Element::Undef => ELEMENT_BACKGROUND,
            Element::Boolean(_) => BOOLEAN_BACKGROUND,
            Element::Number(_) => NUMBER_BACKGROUND,
            Element::String(_) => STRING_BACKGROUND,
            Element::List(_) => LIST_BACKGROUND,
            Element::Set(_) => SET_BACKGROUND,
            Element::Custom(c) => c.background(),
        }
    }

    /// Human-readable rendering, used in diagnostics.
    pub fn denotation(&self) -> String {
        match self {
            Element::Undef => "undef".to_string(),
            Element::Boolean(b) => b.to_string(),
            Element::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Element::String(s) => format!("\"{s}\""),
            Element::List(l) => {
                let parts: Vec<String> = l.items().iter().map(Element::denotation).collect();
                format!("[{}]", parts.join(", "))
            }
            Element::Set(s) => {
                let parts: Vec<String> = s.items().iter().map(Element::denotation).collect();
                format!("{{{}}}", parts.join(", "))
            }
            Element::Custom(c) => c.denotation(),
        }
    }
}

/// Value-based equality. `Custom` values compare through
/// [`CustomElement::value_eq`]; cross-background comparisons are `false`.
impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Element::Undef, Element::Undef) => true,
            (Element::Boolean(a), Element::Boolean(b)) => a == b,
            (Element::Number(a), Element::Number(b)) => a == b,
            (Element::String(a), Element::String(b)) => a == b,
            (Element::List(a), Element::List(b)) => a.items() == b.items(),
            (Element::Set(a), Element::Set(b)) => a.set_eq(b),
            (Element::Custom(a), Element::Custom(b)) => {
                a.background() == b.background() && a.value_eq(b.as_ref())
            }
            _ => false,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.denotation())
    }
}

/// A list value: ordered, duplicates allowed, native insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListValue {
    items: Vec<Element>,
}

impl ListValue {
    pub fn new(items: Vec<Element>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Element] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 0-based access; list function elements translate from 1-based.
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.items.get(index)
    }
}

/// A set value: unordered, no duplicates under value equality.
///
/// Backed by a vector in first-occurrence order so enumeration is
/// deterministic for a given construction, but no indexed view is
/// offered: callers must not rely on the internal order.
#[derive(Debug, Clone, Default)]
pub struct SetValue {
    items: Vec<Element>,
}

impl SetValue {
    /// Build a set, dropping duplicates (first occurrence wins).
    pub fn new(items: impl IntoIterator<Item = Element>) -> Self {
        let mut deduped: Vec<Element> = Vec::new();
        for item in items {
            if !deduped.contains(&item) {
                deduped.push(item);
            }
        }
        Self { items: deduped }
    }

    pub fn items(&self) -> &[Element] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Set equality: same cardinality, mutual containment.
    pub fn set_eq(&self, other: &SetValue) -> bool {
        self.items.len() == other.items.len()
            && self.items.iter().all(|e| other.items.contains(e))
    }
}

impl PartialEq for SetValue {
    fn eq(&self, other: &Self) -> bool {
        self.set_eq(other)
    }
}
