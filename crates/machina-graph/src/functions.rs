//! Derived graph metric function elements.
//!
//! Both functions read through a shared [`ConnectivityCache`], so the
//! expensive analysis happens once per graph identity per step no
//! matter how many times a rule asks.

use crate::connectivity::ConnectivityCache;
use crate::graph::GRAPH_BACKGROUND;
use machina_storage::{
    Element, FunctionClass, FunctionElement, Signature, BOOLEAN_BACKGROUND, ELEMENT_BACKGROUND,
    SET_BACKGROUND,
};
use std::sync::Arc;

/// `connectedSet(graph, v)` — the set of vertices reachable from `v`.
pub struct ConnectedSetFn {
    sig: Signature,
    cache: Arc<ConnectivityCache>,
}

impl ConnectedSetFn {
    pub fn new(cache: Arc<ConnectivityCache>) -> Self {
        Self {
            sig: Signature::new([GRAPH_BACKGROUND, ELEMENT_BACKGROUND], SET_BACKGROUND),
            cache,
        }
    }
}

impl FunctionElement for ConnectedSetFn {
    fn name(&self) -> &str {
        "connectedSet"
    }

    fn fclass(&self) -> FunctionClass {
        FunctionClass::Derived
    }

    fn signature(&self) -> Option<&Signature> {
        Some(&self.sig)
    }

    fn value(&self, args: &[Element]) -> Element {
        let [graph, vertex] = args else {
            return Element::Undef;
        };
        let Some(index) = self.cache.index_for(graph) else {
            return Element::Undef;
        };
        match index.connected_set_of(vertex) {
            Some(component) => Element::set(component.iter().cloned()),
            None => Element::Undef,
        }
    }
}

/// `isConnected(graph)` — whether the graph is one component.
pub struct IsConnectedFn {
    sig: Signature,
    cache: Arc<ConnectivityCache>,
}

impl IsConnectedFn {
    pub fn new(cache: Arc<ConnectivityCache>) -> Self {
        Self {
            sig: Signature::new([GRAPH_BACKGROUND], BOOLEAN_BACKGROUND),
            cache,
        }
    }
}

impl FunctionElement for IsConnectedFn {
    fn name(&self) -> &str {
        "isConnected"
    }

    fn fclass(&self) -> FunctionClass {
        FunctionClass::Derived
    }

    fn signature(&self) -> Option<&Signature> {
        Some(&self.sig)
    }

    fn value(&self, args: &[Element]) -> Element {
        let [graph] = args else {
            return Element::Undef;
        };
        match self.cache.index_for(graph) {
            Some(index) => Element::boolean(index.is_connected()),
            None => Element::Undef,
        }
    }
}
