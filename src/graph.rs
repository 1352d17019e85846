//! Directed graph with dual adjacency.
//!
//! Incoming and outgoing edges live in two independent mappings keyed by
//! node. Kahn's algorithm reads `outgoing` of one node while shrinking
//! `incoming` of another; keeping the directions apart lets both borrows
//! coexist without cloning adjacency lists.

use crate::error::{GraphError, Side};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use tracing::debug;

/// A directed graph over node labels of type `N`.
///
/// Invariant: for every edge `u -> v`, `v` is in `outgoing[u]` and `u` is in
/// `incoming[v]`, and every node has an entry in both mappings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph<N: Eq + Hash> {
    /// Insertion order; drives the initial source scan.
    pub(crate) nodes: Vec<N>,
    pub(crate) incoming: HashMap<N, HashSet<N>>,
    pub(crate) outgoing: HashMap<N, Vec<N>>,
}

impl<N: Eq + Hash> Default for Graph<N> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            incoming: HashMap::new(),
            outgoing: HashMap::new(),
        }
    }
}

impl<N: Eq + Hash + Clone> Graph<N> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from an edge list. Endpoints are added in first-seen order.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N)>,
    {
        let mut graph = Self::new();
        for (from, to) in edges {
            graph.add_edge(from, to);
        }
        graph
    }

    /// Build a graph from caller supplied adjacency mappings.
    ///
    /// Both mappings must describe the same edge set and only mention nodes
    /// from `nodes`; anything else is rejected. A node without an entry in a
    /// mapping has an empty collection on that side.
    ///
    /// Unknown nodes are reported in the order the mappings yield them.
    /// Edges missing a side are reported in node insertion order, so a
    /// given input always fails with the same error.
    pub fn from_adjacency<I, In, Out, S, T>(
        nodes: I,
        incoming: In,
        outgoing: Out,
    ) -> Result<Self, GraphError<N>>
    where
        I: IntoIterator<Item = N>,
        In: IntoIterator<Item = (N, S)>,
        S: IntoIterator<Item = N>,
        Out: IntoIterator<Item = (N, T)>,
        T: IntoIterator<Item = N>,
    {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node);
        }

        let incoming = collect_adjacency(incoming);
        let outgoing = collect_adjacency(outgoing);

        for (node, members) in incoming.iter().chain(&outgoing) {
            let unknown = std::iter::once(node)
                .chain(members)
                .find(|n| !graph.contains(n));
            if let Some(node) = unknown {
                return Err(GraphError::UnknownNode(node.clone()));
            }
        }

        graph.check_mirrored(&incoming, &outgoing)?;

        // Every edge is mirrored, so replaying `outgoing` rebuilds `incoming`.
        for (node, targets) in outgoing {
            for target in targets {
                graph.add_edge(node.clone(), target);
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graph built from adjacency"
        );
        Ok(graph)
    }

    /// Find the first edge present on one side only.
    ///
    /// Sources are walked in node order first, then targets; within one
    /// target the earliest inserted source wins.
    fn check_mirrored(
        &self,
        incoming: &[(N, Vec<N>)],
        outgoing: &[(N, Vec<N>)],
    ) -> Result<(), GraphError<N>> {
        let sources_of = index_adjacency(incoming);
        let targets_of = index_adjacency(outgoing);
        let incoming_edges: HashSet<(&N, &N)> = incoming
            .iter()
            .flat_map(|(to, sources)| sources.iter().map(move |from| (from, to)))
            .collect();
        let outgoing_edges: HashSet<(&N, &N)> = outgoing
            .iter()
            .flat_map(|(from, targets)| targets.iter().map(move |to| (from, to)))
            .collect();

        for from in &self.nodes {
            for &to in targets_of.get(from).into_iter().flatten() {
                if !incoming_edges.contains(&(from, to)) {
                    return Err(GraphError::Inconsistent {
                        from: from.clone(),
                        to: to.clone(),
                        missing_side: Side::Incoming,
                    });
                }
            }
        }

        let position: HashMap<&N, usize> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node, index))
            .collect();

        for to in &self.nodes {
            let stray = sources_of
                .get(to)
                .into_iter()
                .flatten()
                .copied()
                .filter(|from| !outgoing_edges.contains(&(*from, to)))
                .min_by_key(|from| position.get(*from).copied().unwrap_or(usize::MAX));
            if let Some(from) = stray {
                return Err(GraphError::Inconsistent {
                    from: from.clone(),
                    to: to.clone(),
                    missing_side: Side::Outgoing,
                });
            }
        }

        Ok(())
    }

    /// Add a node. Returns false if it was already present.
    pub fn add_node(&mut self, node: N) -> bool {
        if self.contains(&node) {
            return false;
        }
        self.incoming.insert(node.clone(), HashSet::new());
        self.outgoing.insert(node.clone(), Vec::new());
        self.nodes.push(node);
        true
    }

    /// Add the edge `from -> to`, adding missing endpoints.
    ///
    /// Returns false if the edge already existed.
    pub fn add_edge(&mut self, from: N, to: N) -> bool {
        self.add_node(from.clone());
        self.add_node(to.clone());

        let sources = self.incoming.entry(to.clone()).or_default();
        if !sources.insert(from.clone()) {
            return false;
        }
        self.outgoing.entry(from).or_default().push(to);
        true
    }
}

impl<N: Eq + Hash> Graph<N> {
    /// Whether `node` is part of the graph.
    pub fn contains(&self, node: &N) -> bool {
        self.incoming.contains_key(node)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes with an edge into `node`.
    pub fn incoming(&self, node: &N) -> Option<&HashSet<N>> {
        self.incoming.get(node)
    }

    /// Nodes `node` points to, in edge insertion order.
    pub fn outgoing(&self, node: &N) -> Option<&[N]> {
        self.outgoing.get(node).map(Vec::as_slice)
    }

    /// All edges, grouped by source in node insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> + '_ {
        self.nodes.iter().flat_map(move |from| {
            self.outgoing
                .get(from)
                .into_iter()
                .flatten()
                .map(move |to| (from, to))
        })
    }
}

/// Materialize a mapping, keeping the caller's entry and member order.
fn collect_adjacency<N, M, C>(mapping: M) -> Vec<(N, Vec<N>)>
where
    M: IntoIterator<Item = (N, C)>,
    C: IntoIterator<Item = N>,
{
    mapping
        .into_iter()
        .map(|(node, members)| (node, members.into_iter().collect()))
        .collect()
}

/// Members per key; repeated keys are merged.
fn index_adjacency<N: Eq + Hash>(entries: &[(N, Vec<N>)]) -> HashMap<&N, Vec<&N>> {
    let mut index: HashMap<&N, Vec<&N>> = HashMap::new();
    for (node, members) in entries {
        index.entry(node).or_default().extend(members);
    }
    index
}
