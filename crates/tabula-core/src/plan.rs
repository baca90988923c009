use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::DependencyGraph;
use crate::ident::{FkEdge, TableId};

/// One step of a deletion plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    DeleteAllRows(TableId),
    DisableConstraint(FkEdge),
    EnableConstraint(FkEdge),
}

/// Ordered sequence of actions safe to execute front to back.
///
/// The ordering is the plan's whole contract: by the time a table's delete
/// runs, every constraint that could reject it has either already been
/// satisfied by an earlier delete or suspended by an earlier disable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionPlan {
    pub actions: Vec<Action>,
}

impl DeletionPlan {
    /// Tables deleted by this plan, in execution order.
    pub fn tables(&self) -> Vec<&TableId> {
        self.actions
            .iter()
            .filter_map(|action| match action {
                Action::DeleteAllRows(table) => Some(table),
                _ => None,
            })
            .collect()
    }
}

/// Compute a deletion plan for `graph`.
///
/// Acyclic graphs get a pure delete ordering: for every foreign key, the
/// referencing table is emptied before the table it points at. When cycles
/// exist, every cycle-participating constraint is suspended up front and
/// restored after the last delete; the remaining (acyclic) edges still
/// constrain the order. `supports_suspension` reports whether the target
/// engine can actually suspend constraints; if it cannot and a cycle exists,
/// no plan is produced.
pub fn build_plan(graph: &DependencyGraph, supports_suspension: bool) -> Result<DeletionPlan> {
    let cyclic = graph.cyclic_edge_indices();

    if !cyclic.is_empty() && !supports_suspension {
        let tables: BTreeSet<String> = cyclic
            .iter()
            .flat_map(|&i| {
                let edge = &graph.edges()[i];
                [
                    graph.nodes()[edge.from].to_string(),
                    graph.nodes()[edge.to].to_string(),
                ]
            })
            .collect();
        return Err(Error::CycleUnsupported {
            tables: tables.into_iter().collect(),
        });
    }

    let order = deletion_order(graph, &cyclic);
    let mut actions = Vec::with_capacity(order.len() + 2 * cyclic.len());

    for &i in &cyclic {
        actions.push(Action::DisableConstraint(graph.fk_edge(&graph.edges()[i])));
    }
    for node in order {
        actions.push(Action::DeleteAllRows(graph.nodes()[node].clone()));
    }
    for &i in &cyclic {
        actions.push(Action::EnableConstraint(graph.fk_edge(&graph.edges()[i])));
    }

    Ok(DeletionPlan { actions })
}

/// Kahn's algorithm over the "references" relation, skipping suspended edges.
///
/// A table with no enforced incoming reference is always safe to empty next.
/// The frontier is an ordered set, so ties between independent tables break
/// the same way on every run. Nodes are already sorted lexicographically, so
/// index order doubles as name order.
fn deletion_order(graph: &DependencyGraph, suspended: &[usize]) -> Vec<usize> {
    let n = graph.nodes().len();
    let suspended: BTreeSet<usize> = suspended.iter().copied().collect();

    let mut outgoing = vec![Vec::new(); n];
    let mut indegree = vec![0usize; n];
    for (i, edge) in graph.edges().iter().enumerate() {
        if suspended.contains(&i) {
            continue;
        }
        outgoing[edge.from].push(edge.to);
        indegree[edge.to] += 1;
    }

    let mut ready: BTreeSet<usize> = (0..n).filter(|&i| indegree[i] == 0).collect();
    let mut order = Vec::with_capacity(n);

    while let Some(&node) = ready.iter().next() {
        ready.remove(&node);
        order.push(node);
        for &target in &outgoing[node] {
            indegree[target] -= 1;
            if indegree[target] == 0 {
                ready.insert(target);
            }
        }
    }

    // Cycle detection already ran; with cyclic edges suspended the remaining
    // graph is a DAG and the order is total.
    debug_assert_eq!(order.len(), n);
    order
}
