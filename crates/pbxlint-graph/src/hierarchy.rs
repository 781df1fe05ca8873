//! Containment index over groups.
//!
//! Groups list their children, but nothing points back up. Validators ask
//! "who contains this?" constantly while building paths, so the reverse
//! direction is materialized once as a petgraph graph with an id index.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;

/// Parent → child edges for every resolvable group child.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    graph: DiGraph<String, ()>,
    id_index: HashMap<String, NodeIndex>,
}

impl Hierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&mut self, id: &str) -> NodeIndex {
        if let Some(index) = self.id_index.get(id) {
            return *index;
        }
        let index = self.graph.add_node(id.to_string());
        self.id_index.insert(id.to_string(), index);
        index
    }

    /// Records that `parent` lists `child` among its children.
    pub fn add_child(&mut self, parent: &str, child: &str) {
        let from = self.node(parent);
        let to = self.node(child);
        self.graph.update_edge(from, to, ());
    }

    /// The containing group's id.
    ///
    /// An object listed by more than one group is malformed; the smallest
    /// parent id is returned so the answer does not depend on load order.
    pub fn parent_of(&self, id: &str) -> Option<&str> {
        let index = self.id_index.get(id)?;
        self.graph
            .neighbors_directed(*index, Direction::Incoming)
            .filter_map(|parent| self.graph.node_weight(parent))
            .map(String::as_str)
            .min()
    }

    /// Number of ids listed by more than one group.
    pub fn shared_children(&self) -> usize {
        self.graph
            .node_indices()
            .filter(|index| {
                self.graph
                    .neighbors_directed(*index, Direction::Incoming)
                    .count()
                    > 1
            })
            .count()
    }

    /// True when some group (transitively) contains itself.
    pub fn has_cycle(&self) -> bool {
        petgraph::algo::is_cyclic_directed(&self.graph)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
