//! Table connectivity through declared joins.
//!
//! Used to report which used tables cannot be reached from the base table.
//! The graph is undirected and only answers reachability; it never proposes
//! join paths.

use std::collections::{BTreeSet, HashMap};

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::Bfs;

use crate::model::JoinEdge;

/// Undirected graph of tables connected by join edges.
#[derive(Debug, Default)]
pub struct JoinGraph {
    graph: UnGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
}

impl JoinGraph {
    pub fn from_joins(joins: &[JoinEdge]) -> Self {
        let mut graph = Self::default();
        for edge in joins {
            let left = graph.node(&edge.left_table);
            let right = graph.node(&edge.right_table);
            graph.graph.update_edge(left, right, ());
        }
        graph
    }

    fn node(&mut self, table: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(table) {
            return idx;
        }
        let idx = self.graph.add_node(table.to_string());
        self.index.insert(table.to_string(), idx);
        idx
    }

    /// Tables reachable from `start`, including `start` itself.
    pub fn reachable_from(&self, start: &str) -> BTreeSet<String> {
        let mut reached = BTreeSet::new();
        reached.insert(start.to_string());

        let Some(&root) = self.index.get(start) else {
            return reached;
        };

        let mut bfs = Bfs::new(&self.graph, root);
        while let Some(idx) = bfs.next(&self.graph) {
            reached.insert(self.graph[idx].clone());
        }
        reached
    }

    /// Members of `tables` with no join path to `base`.
    pub fn unreachable(&self, base: &str, tables: &BTreeSet<String>) -> Vec<String> {
        let reached = self.reachable_from(base);
        tables
            .iter()
            .filter(|t| !reached.contains(t.as_str()))
            .cloned()
            .collect()
    }

    pub fn table_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
