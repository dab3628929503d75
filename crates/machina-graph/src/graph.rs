//! The graph value: an immutable undirected graph over elements.

use machina_storage::{CustomElement, Element};
use std::any::Any;
use std::sync::Arc;

pub const GRAPH_BACKGROUND: &str = "GRAPH";

/// An immutable undirected graph whose vertices are elements.
///
/// Construction deduplicates vertices under value equality and keeps
/// only edges whose endpoints are vertices. Like every element, a graph
/// is a snapshot: "modifying" one means building another.
#[derive(Debug, Clone)]
pub struct GraphValue {
    vertices: Vec<Element>,
    edges: Vec<(Element, Element)>,
}

impl GraphValue {
    pub fn new(
        vertices: impl IntoIterator<Item = Element>,
        edges: impl IntoIterator<Item = (Element, Element)>,
    ) -> Self {
        let mut vs: Vec<Element> = Vec::new();
        for v in vertices {
            if !vs.contains(&v) {
                vs.push(v);
            }
        }
        let es = edges
            .into_iter()
            .filter(|(a, b)| vs.contains(a) && vs.contains(b))
            .collect();
        Self {
            vertices: vs,
            edges: es,
        }
    }

    pub fn vertices(&self) -> &[Element] {
        &self.vertices
    }

    pub fn edges(&self) -> &[(Element, Element)] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn has_vertex(&self, v: &Element) -> bool {
        self.vertices.contains(v)
    }

    /// Wrap this graph as an element.
    pub fn into_element(self) -> Element {
        Element::Custom(Arc::new(self))
    }

    /// View an element as a graph, if it is one.
    pub fn from_element(e: &Element) -> Option<&GraphValue> {
        match e {
            Element::Custom(c) => c.as_any().downcast_ref::<GraphValue>(),
            _ => None,
        }
    }

    /// Edge membership, ignoring direction.
    fn has_edge(&self, a: &Element, b: &Element) -> bool {
        self.edges
            .iter()
            .any(|(x, y)| (x == a && y == b) || (x == b && y == a))
    }
}

impl CustomElement for GraphValue {
    fn background(&self) -> &'static str {
        GRAPH_BACKGROUND
    }

    fn denotation(&self) -> String {
        let vs: Vec<String> = self.vertices.iter().map(Element::denotation).collect();
        let es: Vec<String> = self
            .edges
            .iter()
            .map(|(a, b)| format!("({}, {})", a.denotation(), b.denotation()))
            .collect();
        format!("({{{}}}, {{{}}})", vs.join(", "), es.join(", "))
    }

    fn value_eq(&self, other: &dyn CustomElement) -> bool {
        let Some(other) = other.as_any().downcast_ref::<GraphValue>() else {
            return false;
        };
        self.vertices.len() == other.vertices.len()
            && self.vertices.iter().all(|v| other.has_vertex(v))
            && self.edges.len() == other.edges.len()
            && self.edges.iter().all(|(a, b)| other.has_edge(a, b))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
