//! Precedence propagation.
//!
//! For every edge `from -> to` the successor must start no earlier than the
//! predecessor ends. Violations are fixed by pushing the successor's start
//! forward; durations are never touched.
//!
//! Edges are relaxed in topological order of their predecessor, inside a
//! bounded number of full passes. Edges that close a cycle can never be
//! satisfied, so they are left out of the relaxation and reported instead.
//! That keeps the result idempotent: propagating an already propagated set is
//! a no-op, cyclic or not.

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::PlanError;
use crate::model::{Activity, ActivityId, Dependency};

/// What a propagation run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PropagationReport {
    /// Full passes executed, including the final pass that confirmed the fixed point.
    pub passes: u32,
    /// Activities whose start week moved, in the order they first moved.
    pub moved: Vec<ActivityId>,
    /// Activities sitting on a dependency cycle, in plan order.
    pub cycle: Vec<ActivityId>,
    /// Whether every relaxable edge holds after the last pass.
    pub converged: bool,
}

impl PropagationReport {
    pub fn is_satisfied(&self) -> bool {
        self.converged && self.cycle.is_empty()
    }

    /// `ConstraintUnsatisfiable` when some edge could not be honoured.
    pub fn unsatisfiable(&self) -> Option<PlanError> {
        (!self.is_satisfied()).then(|| PlanError::ConstraintUnsatisfiable {
            activities: self.cycle.clone(),
        })
    }
}

/// Pure variant of [`propagate_in_place`].
pub fn propagate(
    activities: &[Activity],
    dependencies: &[Dependency],
    pass_budget: u32,
) -> (Vec<Activity>, PropagationReport) {
    let mut out = activities.to_vec();
    let report = propagate_in_place(&mut out, dependencies, pass_budget);
    (out, report)
}

pub fn propagate_in_place(
    activities: &mut [Activity],
    dependencies: &[Dependency],
    pass_budget: u32,
) -> PropagationReport {
    let index: HashMap<ActivityId, usize> = activities
        .iter()
        .enumerate()
        .map(|(i, a)| (a.id, i))
        .collect();

    // Resolve edges to activity indices; dangling edges are ignored.
    let edges: Vec<(usize, usize)> = dependencies
        .iter()
        .filter_map(|d| Some((*index.get(&d.from)?, *index.get(&d.to)?)))
        .collect();

    let plan = EdgePlan::build(activities.len(), &edges);

    let mut report = PropagationReport {
        cycle: plan
            .cyclic_nodes
            .iter()
            .map(|&i| activities[i].id)
            .collect(),
        ..Default::default()
    };

    for _ in 0..pass_budget {
        report.passes += 1;
        let mut changed = false;
        for &(from, to) in &plan.ordered {
            let min_start = activities[from].end_week();
            if activities[to].start_week < min_start {
                activities[to].start_week = min_start;
                changed = true;
                let id = activities[to].id;
                if !report.moved.contains(&id) {
                    report.moved.push(id);
                }
            }
        }
        if !changed {
            break;
        }
    }

    report.converged = plan
        .ordered
        .iter()
        .all(|&(from, to)| activities[to].start_week >= activities[from].end_week());

    debug!(
        passes = report.passes,
        moved = report.moved.len(),
        "propagated dependencies"
    );
    if !report.cycle.is_empty() {
        warn!(activities = ?report.cycle, "dependency cycle, constraints left unsatisfied");
    } else if !report.converged {
        warn!(
            budget = pass_budget,
            "pass budget exhausted before constraints settled"
        );
    }

    report
}

/// Edge order for relaxation plus the nodes that lie on cycles.
struct EdgePlan {
    ordered: Vec<(usize, usize)>,
    cyclic_nodes: Vec<usize>,
}

impl EdgePlan {
    fn build(node_count: usize, edges: &[(usize, usize)]) -> Self {
        let mut graph: DiGraph<(), ()> = DiGraph::with_capacity(node_count, edges.len());
        for _ in 0..node_count {
            graph.add_node(());
        }
        for &(from, to) in edges {
            graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
        }

        // `tarjan_scc` yields components in reverse topological order.
        let sccs = tarjan_scc(&graph);
        let mut rank = vec![0usize; node_count];
        let mut component = vec![0usize; node_count];
        let mut on_cycle = vec![false; node_count];
        for (scc_index, scc) in sccs.iter().enumerate() {
            for node in scc {
                rank[node.index()] = sccs.len() - 1 - scc_index;
                component[node.index()] = scc_index;
                on_cycle[node.index()] = scc.len() > 1;
            }
        }
        for &(from, to) in edges {
            if from == to {
                on_cycle[from] = true;
            }
        }

        let mut ordered: Vec<(usize, usize)> = edges
            .iter()
            .copied()
            .filter(|&(from, to)| component[from] != component[to])
            .collect();
        ordered.sort_by_key(|&(from, _)| rank[from]);

        let cyclic_nodes = (0..node_count).filter(|&i| on_cycle[i]).collect();

        Self {
            ordered,
            cyclic_nodes,
        }
    }
}
