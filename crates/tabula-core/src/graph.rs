use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::config::CheckpointOptions;
use crate::ident::{FkEdge, TableId};

/// One foreign key, stored as node indices into [`DependencyGraph::nodes`].
///
/// `from` is the referencing table, `to` the referenced one. Indices keep the
/// graph free of node-to-node ownership even when tables reference each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: usize,
    pub to: usize,
    pub constraint: String,
}

/// Filtered, deduplicated dependency graph of in-scope tables.
///
/// Built fresh from a catalog snapshot; read-only afterwards. Nodes are kept
/// sorted so the same catalog always produces the same graph regardless of
/// query row order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyGraph {
    nodes: Vec<TableId>,
    edges: Vec<GraphEdge>,
}

impl DependencyGraph {
    /// Apply the configuration filter to `tables`, then retain only edges
    /// whose both endpoints survived.
    pub fn build<F>(
        tables: Vec<TableId>,
        foreign_keys: Vec<FkEdge>,
        options: &CheckpointOptions,
        normalize: F,
    ) -> Self
    where
        F: Fn(&str) -> String,
    {
        let nodes: Vec<TableId> = tables
            .into_iter()
            .filter(|table| options.is_in_scope(table, &normalize))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let index: HashMap<&TableId, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, table)| (table, i))
            .collect();

        let edges: Vec<GraphEdge> = foreign_keys
            .iter()
            .filter_map(|fk| {
                let from = *index.get(&fk.referencing)?;
                let to = *index.get(&fk.referenced)?;
                Some((fk.constraint.clone(), from, to))
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|(constraint, from, to)| GraphEdge { from, to, constraint })
            .collect();

        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[TableId] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, table: &TableId) -> bool {
        self.nodes.binary_search(table).is_ok()
    }

    /// Whether any foreign key (including a self-reference) points at `table`.
    pub fn is_referenced(&self, table: &TableId) -> bool {
        match self.nodes.binary_search(table) {
            Ok(idx) => self.edges.iter().any(|edge| edge.to == idx),
            Err(_) => false,
        }
    }

    /// Reconstruct the full edge for diagnostics and plan actions.
    pub fn fk_edge(&self, edge: &GraphEdge) -> FkEdge {
        FkEdge::new(
            edge.constraint.clone(),
            self.nodes[edge.from].clone(),
            self.nodes[edge.to].clone(),
        )
    }

    pub fn has_cycles(&self) -> bool {
        !self.cyclic_edge_indices().is_empty()
    }

    /// Indices into [`Self::edges`] of every edge participating in a cycle:
    /// self-loops, plus edges whose endpoints share a multi-node strongly
    /// connected component.
    pub fn cyclic_edge_indices(&self) -> Vec<usize> {
        let components = self.strongly_connected_components();
        let mut sizes = vec![0usize; self.nodes.len()];
        for &component in &components {
            sizes[component] += 1;
        }

        self.edges
            .iter()
            .enumerate()
            .filter(|(_, edge)| {
                edge.from == edge.to
                    || (components[edge.from] == components[edge.to]
                        && sizes[components[edge.from]] > 1)
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Iterative Tarjan; linear in nodes + edges, no recursion.
    fn strongly_connected_components(&self) -> Vec<usize> {
        let n = self.nodes.len();
        let mut adjacency = vec![Vec::new(); n];
        for edge in &self.edges {
            adjacency[edge.from].push(edge.to);
        }

        const UNVISITED: usize = usize::MAX;
        let mut order = vec![UNVISITED; n];
        let mut low = vec![0usize; n];
        let mut component = vec![UNVISITED; n];
        let mut on_stack = vec![false; n];
        let mut stack: Vec<usize> = Vec::new();
        let mut next_order = 0usize;
        let mut next_component = 0usize;

        for start in 0..n {
            if order[start] != UNVISITED {
                continue;
            }
            let mut work: Vec<(usize, usize)> = vec![(start, 0)];
            while let Some((node, progress)) = work.pop() {
                if progress == 0 {
                    order[node] = next_order;
                    low[node] = next_order;
                    next_order += 1;
                    stack.push(node);
                    on_stack[node] = true;
                }

                let mut descended = false;
                for i in progress..adjacency[node].len() {
                    let target = adjacency[node][i];
                    if order[target] == UNVISITED {
                        work.push((node, i + 1));
                        work.push((target, 0));
                        descended = true;
                        break;
                    }
                    if on_stack[target] {
                        low[node] = low[node].min(order[target]);
                    }
                }
                if descended {
                    continue;
                }

                if low[node] == order[node] {
                    while let Some(member) = stack.pop() {
                        on_stack[member] = false;
                        component[member] = next_component;
                        if member == node {
                            break;
                        }
                    }
                    next_component += 1;
                }
                if let Some(&(parent, _)) = work.last() {
                    low[parent] = low[parent].min(low[node]);
                }
            }
        }

        component
    }
}
