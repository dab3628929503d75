//! Connectivity analysis and its identity-keyed memo.

use crate::graph::GraphValue;
use machina_storage::Element;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Precomputed connected components of one graph value.
///
/// Built once per graph identity with a union-find pass over the edge
/// list; queries are then lookups.
#[derive(Debug)]
pub struct ConnectivityIndex {
    components: Vec<Vec<Element>>,
}

impl ConnectivityIndex {
    /// Analyze a graph.
    pub fn build(graph: &GraphValue) -> Self {
        let vertices = graph.vertices();
        let mut parent: Vec<usize> = (0..vertices.len()).collect();

        fn find(parent: &mut [usize], mut i: usize) -> usize {
            while parent[i] != i {
                parent[i] = parent[parent[i]];
                i = parent[i];
            }
            i
        }

        let index_of = |v: &Element| vertices.iter().position(|u| u == v);
        for (a, b) in graph.edges() {
            // constructor guarantees both endpoints are vertices
            if let (Some(i), Some(j)) = (index_of(a), index_of(b)) {
                let (ri, rj) = (find(&mut parent, i), find(&mut parent, j));
                if ri != rj {
                    parent[ri] = rj;
                }
            }
        }

        let mut by_root: HashMap<usize, Vec<Element>> = HashMap::new();
        for (i, v) in vertices.iter().enumerate() {
            let root = find(&mut parent, i);
            by_root.entry(root).or_default().push(v.clone());
        }
        let mut components: Vec<Vec<Element>> = by_root.into_values().collect();
        components.sort_by_key(Vec::len);
        Self { components }
    }

    /// The connected component containing `v`, or `None` when `v` is
    /// not a vertex.
    pub fn connected_set_of(&self, v: &Element) -> Option<&[Element]> {
        self.components
            .iter()
            .find(|c| c.contains(v))
            .map(Vec::as_slice)
    }

    /// Whether the whole graph is one component. The empty graph counts
    /// as connected.
    pub fn is_connected(&self) -> bool {
        self.components.len() <= 1
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

/// Identity-keyed memo of connectivity analyses.
///
/// Keys are the allocation identity of the graph value, not its
/// contents: two structurally equal graphs in different allocations get
/// separate entries, and re-querying the same allocation within the
/// cache's validity window returns the same shared index without
/// recomputation. The host must call [`clear`](Self::clear) at each
/// step boundary, when aggregate values may be rebuilt.
#[derive(Default)]
pub struct ConnectivityCache {
    inner: Mutex<HashMap<usize, Arc<ConnectivityIndex>>>,
}

impl ConnectivityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The memoized index for an element, computing it on first sight
    /// of this identity. `None` when the element is not a graph.
    pub fn index_for(&self, e: &Element) -> Option<Arc<ConnectivityIndex>> {
        let Element::Custom(custom) = e else {
            return None;
        };
        let graph = custom.as_any().downcast_ref::<GraphValue>()?;
        let key = Arc::as_ptr(custom) as *const () as usize;

        let mut inner = self.inner.lock().expect("connectivity cache poisoned");
        let index = inner
            .entry(key)
            .or_insert_with(|| Arc::new(ConnectivityIndex::build(graph)));
        Some(Arc::clone(index))
    }

    /// Step-boundary invalidation. Idempotent.
    pub fn clear(&self) {
        self.inner
            .lock()
            .expect("connectivity cache poisoned")
            .clear();
    }

    /// Number of memoized graph identities.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("connectivity cache poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
