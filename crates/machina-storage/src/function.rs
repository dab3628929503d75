//! The function-element framework: typed, signature-tagged operations.
//!
//! Function elements never raise: arity mismatches, type mismatches and
//! domain-constraint violations all resolve to [`Element::Undef`], and
//! surfacing the failure is the caller's concern.

use crate::element::Element;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Function class taxonomy.
///
/// Only `Derived` matters to this engine core (functions computed on
/// demand from other state, never directly updated); the rest of the
/// taxonomy is carried for the update machinery around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionClass {
    Derived,
    Basic,
    Controlled,
    Monitored,
    Out,
}

/// Declared typing of a function element: ordered argument background
/// names plus one range background name.
///
/// Signatures are declarative only — nothing enforces them at the
/// element level; `FunctionElement::value` does its own checking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    domain: Vec<String>,
    range: String,
}

impl Signature {
    pub fn new<I, S>(domain: I, range: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domain: domain.into_iter().map(Into::into).collect(),
            range: range.into(),
        }
    }

    /// Declared argument count.
    pub fn arity(&self) -> usize {
        self.domain.len()
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn range(&self) -> &str {
        &self.range
    }
}

/// A named operation over elements.
pub trait FunctionElement: Send + Sync {
    /// The name this function is registered under.
    fn name(&self) -> &str;

    fn fclass(&self) -> FunctionClass {
        FunctionClass::Basic
    }

    fn signature(&self) -> Option<&Signature> {
        None
    }

    /// Apply the function. Any precondition violation yields
    /// [`Element::Undef`]; implementations must not panic on bad input.
    fn value(&self, args: &[Element]) -> Element;
}

/// The read-only function namespace one step evaluates against.
///
/// Built by the host before a step starts and shared across agents;
/// nothing mutates it while a step is in flight.
#[derive(Default)]
pub struct FunctionTable {
    entries: HashMap<String, Arc<dyn FunctionElement>>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function under its own name. Last registration wins.
    pub fn register(&mut self, f: Arc<dyn FunctionElement>) {
        self.entries.insert(f.name().to_string(), f);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn FunctionElement>> {
        self.entries.get(name)
    }

    /// Registered names, sorted for deterministic listings.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
