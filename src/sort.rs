//! Topological sorting using Kahn's algorithm.

use crate::config::TieBreak;
use crate::error::CycleDetected;
use crate::graph::Graph;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::hash::Hash;
use tracing::{debug, trace, warn};

/// Ready nodes waiting to be emitted.
trait Frontier<N> {
    fn push(&mut self, node: N);
    fn pop(&mut self) -> Option<N>;
}

/// FIFO frontier: ready nodes leave in the order they became ready.
impl<N> Frontier<N> for VecDeque<N> {
    fn push(&mut self, node: N) {
        self.push_back(node);
    }

    fn pop(&mut self) -> Option<N> {
        self.pop_front()
    }
}

/// Min-heap frontier: the smallest ready node leaves first.
impl<N: Ord> Frontier<N> for BinaryHeap<Reverse<N>> {
    fn push(&mut self, node: N) {
        BinaryHeap::push(self, Reverse(node));
    }

    fn pop(&mut self) -> Option<N> {
        BinaryHeap::pop(self).map(|Reverse(node)| node)
    }
}

impl<N: Eq + Hash + Clone> Graph<N> {
    /// Sort the graph, consuming it.
    ///
    /// Source nodes are seeded in insertion order and ready nodes are
    /// emitted first-in first-out, so the output is reproducible. Only the
    /// `incoming` mapping is mutated; clone the graph first to keep it.
    pub fn sort(self) -> Result<Vec<N>, CycleDetected<N>> {
        kahn(self, VecDeque::<N>::new())
    }

    /// Sort the graph emitting the smallest ready node first.
    ///
    /// Yields the lexicographically smallest topological order.
    pub fn sort_lexicographic(self) -> Result<Vec<N>, CycleDetected<N>>
    where
        N: Ord,
    {
        kahn(self, BinaryHeap::<Reverse<N>>::new())
    }
}

/// Sort with the given tie-break policy.
pub fn sort_with<N>(graph: Graph<N>, tie_break: TieBreak) -> Result<Vec<N>, CycleDetected<N>>
where
    N: Eq + Hash + Clone + Ord,
{
    match tie_break {
        TieBreak::Insertion => graph.sort(),
        TieBreak::Lexicographic => graph.sort_lexicographic(),
    }
}

fn kahn<N, F>(graph: Graph<N>, mut frontier: F) -> Result<Vec<N>, CycleDetected<N>>
where
    N: Eq + Hash + Clone,
    F: Frontier<N>,
{
    // Split the graph so `outgoing` can be read while `incoming` is written.
    let Graph {
        nodes,
        mut incoming,
        outgoing,
    } = graph;

    for node in &nodes {
        if incoming.get(node).is_some_and(HashSet::is_empty) {
            frontier.push(node.clone());
        }
    }

    let mut ordered = Vec::with_capacity(nodes.len());

    while let Some(source) = frontier.pop() {
        trace!(remaining = nodes.len() - ordered.len(), "emitting node");

        if let Some(targets) = outgoing.get(&source) {
            for target in targets {
                let Some(sources) = incoming.get_mut(target) else {
                    continue;
                };
                // Only the removal that empties the set enqueues the target.
                if sources.remove(&source) && sources.is_empty() {
                    frontier.push(target.clone());
                }
            }
        }

        ordered.push(source);
    }

    if ordered.len() == nodes.len() {
        debug!(nodes = ordered.len(), "topological sort complete");
        return Ok(ordered);
    }

    let unresolved = unresolved_nodes(nodes, &incoming);
    warn!(
        ordered = ordered.len(),
        unresolved = unresolved.len(),
        "cycle detected"
    );
    Err(CycleDetected {
        ordered,
        unresolved,
    })
}

fn unresolved_nodes<N: Eq + Hash>(nodes: Vec<N>, incoming: &HashMap<N, HashSet<N>>) -> Vec<N> {
    nodes
        .into_iter()
        .filter(|node| incoming.get(node).is_some_and(|sources| !sources.is_empty()))
        .collect()
}

/// Check that `order` lists every node of `graph` exactly once and that
/// every edge points from an earlier to a later entry.
pub fn is_topological_order<N: Eq + Hash>(graph: &Graph<N>, order: &[N]) -> bool {
    if order.len() != graph.node_count() {
        return false;
    }

    let mut position: HashMap<&N, usize> = HashMap::with_capacity(order.len());
    for (index, node) in order.iter().enumerate() {
        if !graph.contains(node) || position.insert(node, index).is_some() {
            return false;
        }
    }

    graph
        .edges()
        .all(|(from, to)| match (position.get(from), position.get(to)) {
            (Some(u), Some(v)) => u < v,
            _ => false,
        })
}
