//! Cycle extraction for graphs that cannot be sorted.

use crate::error::CycleDetected;
use crate::graph::Graph;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

/// Find one cycle among `candidates`, following only edges between them.
///
/// Returns a closed path `[n0, n1, ..., n0]`; a self-loop gives `[a, a]`.
/// The search is an iterative DFS so long chains cannot exhaust the stack.
pub fn find_cycle<N>(graph: &Graph<N>, candidates: &[N]) -> Option<Vec<N>>
where
    N: Eq + Hash + Clone,
{
    let allowed: HashSet<&N> = candidates.iter().collect();
    let mut finished: HashSet<&N> = HashSet::new();

    for start in candidates {
        if finished.contains(start) || !graph.contains(start) {
            continue;
        }

        let mut path: Vec<&N> = vec![start];
        let mut cursor: Vec<usize> = vec![0];
        let mut on_path: HashMap<&N, usize> = HashMap::from([(start, 0)]);

        while let Some(&node) = path.last() {
            let depth = path.len() - 1;
            let targets = graph.outgoing(node).unwrap_or_default();
            let mut descended = false;

            while cursor[depth] < targets.len() {
                let next = &targets[cursor[depth]];
                cursor[depth] += 1;

                if !allowed.contains(next) || finished.contains(next) {
                    continue;
                }
                if let Some(&at) = on_path.get(next) {
                    let mut cycle: Vec<N> = path[at..].iter().map(|n| (*n).clone()).collect();
                    cycle.push(next.clone());
                    return Some(cycle);
                }

                on_path.insert(next, path.len());
                path.push(next);
                cursor.push(0);
                descended = true;
                break;
            }

            if !descended {
                path.pop();
                cursor.pop();
                on_path.remove(node);
                finished.insert(node);
            }
        }
    }

    None
}

impl<N: Eq + Hash + Clone> CycleDetected<N> {
    /// One concrete cycle among the unresolved nodes of `graph`.
    pub fn find_cycle(&self, graph: &Graph<N>) -> Option<Vec<N>> {
        find_cycle(graph, &self.unresolved)
    }
}

/// Format a cycle path as `a → b → a`.
pub fn format_cycle<N: fmt::Display>(path: &[N]) -> String {
    path.iter()
        .map(|node| node.to_string())
        .collect::<Vec<_>>()
        .join(" → ")
}
