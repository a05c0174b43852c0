//! Graph store and per-vertex search state
//!
//! Every undirected edge `u - v` is stored as the two directed records
//! `(u, v)` and `(v, u)`, so "edges whose source is outer" can be handed out
//! directly. Per-vertex arrays hold the matching partner, the label and the
//! `first_non_outer` pointer; a `None` pointer denotes the position beyond
//! the search root, which is never outer but may be flagged and may serve as
//! a blossom base.
//!
//! The frontier holds every directed edge whose source has become outer and
//! that has not been handed out yet. Popping its minimum reproduces "next
//! outer-sourced edge in insertion order" without rescanning the edge list.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::BTreeSet;

use crate::algorithm::traits::{EdgeId, MatchingError, VertexId};
use crate::data_structures::graph::UndirectedGraph;

use super::label::Label;

#[derive(Debug, Clone)]
pub struct GabowState {
    vertex_count: usize,
    /// Directed edge records, indexed by `EdgeId`
    edges: Vec<(VertexId, VertexId)>,
    /// Directed edges by source slot, in insertion order
    outgoing: Vec<Vec<EdgeId>>,
    matching: Vec<Option<VertexId>>,
    labels: Vec<Label>,
    first_non_outer: Vec<Option<VertexId>>,
    /// Flag carried by the position beyond the root
    beyond_root_flag: Option<EdgeId>,
    frontier: BTreeSet<EdgeId>,
}

impl GabowState {
    /// Builds the store for `graph`; all vertices start unmatched and unset
    pub fn new(graph: &UndirectedGraph, max_vertices: usize) -> Result<Self, MatchingError> {
        let vertex_count = graph.vertex_count();
        if vertex_count > max_vertices {
            return Err(MatchingError::ResourceExhausted(format!(
                "{} vertices exceed the configured limit of {}",
                vertex_count, max_vertices
            )));
        }

        let directed_count = graph.edge_count().checked_mul(2).ok_or_else(|| {
            MatchingError::ResourceExhausted("directed edge count overflows usize".to_string())
        })?;

        let mut edges = Vec::new();
        edges
            .try_reserve_exact(directed_count)
            .map_err(|e| MatchingError::ResourceExhausted(format!("edge store: {}", e)))?;

        let mut state = Self {
            vertex_count,
            edges,
            outgoing: allocate(vertex_count, Vec::new(), "adjacency")?,
            matching: allocate(vertex_count, None, "matching")?,
            labels: allocate(vertex_count, Label::Unset, "labels")?,
            first_non_outer: allocate(vertex_count, None, "first_non_outer")?,
            beyond_root_flag: None,
            frontier: BTreeSet::new(),
        };

        for &(u, v) in graph.edges() {
            state.add_edge(u, v);
        }

        Ok(state)
    }

    /// Appends both directed records of `u - v`
    fn add_edge(&mut self, u: VertexId, v: VertexId) {
        for (source, target) in [(u, v), (v, u)] {
            let id = EdgeId(self.edges.len());
            self.edges.push((source, target));
            self.outgoing[source.index()].push(id);
        }
    }

    /// `(source, target)` of a directed edge record
    #[inline]
    pub fn endpoints(&self, edge: EdgeId) -> (VertexId, VertexId) {
        self.edges[edge.0]
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexId> {
        (1..=self.vertex_count).map(VertexId)
    }

    // Matching

    #[inline]
    pub fn is_matched(&self, vertex: VertexId) -> bool {
        self.matching[vertex.index()].is_some()
    }

    #[inline]
    pub fn partner(&self, vertex: VertexId) -> Option<VertexId> {
        self.matching[vertex.index()]
    }

    /// Sets `match(vertex) = partner` only; the caller keeps the pair symmetric
    #[inline]
    pub fn set_partner(&mut self, vertex: VertexId, partner: VertexId) {
        self.matching[vertex.index()] = Some(partner);
    }

    // Labels

    #[inline]
    pub fn label(&self, vertex: VertexId) -> Label {
        self.labels[vertex.index()]
    }

    #[inline]
    pub fn is_outer(&self, vertex: VertexId) -> bool {
        self.label(vertex).is_outer()
    }

    /// `is_outer` lifted to walk positions; the position beyond the root is never outer
    #[inline]
    pub fn is_outer_position(&self, position: Option<VertexId>) -> bool {
        position.is_some_and(|vertex| self.is_outer(vertex))
    }

    pub fn mark_root(&mut self, vertex: VertexId) {
        self.make_outer(vertex, Label::Root);
    }

    pub fn mark_vertex_label(&mut self, vertex: VertexId, from: VertexId) {
        self.make_outer(vertex, Label::Vertex(from));
    }

    pub fn mark_edge_label(&mut self, vertex: VertexId, edge: EdgeId) {
        self.make_outer(vertex, Label::Edge(edge));
    }

    pub fn mark_flagged(&mut self, position: Option<VertexId>, edge: EdgeId) {
        match position {
            Some(vertex) => self.labels[vertex.index()] = Label::Flagged(edge),
            None => self.beyond_root_flag = Some(edge),
        }
    }

    pub fn is_flagged_by(&self, position: Option<VertexId>, edge: EdgeId) -> bool {
        match position {
            Some(vertex) => self.label(vertex).is_flagged_by(edge),
            None => self.beyond_root_flag == Some(edge),
        }
    }

    /// Returns `vertex` to `Unset`: non-outer and carrying no flag
    pub fn clear_label(&mut self, vertex: VertexId) {
        self.labels[vertex.index()] = Label::Unset;
    }

    /// Labels `vertex` and, the first time it turns outer, queues its outgoing edges
    fn make_outer(&mut self, vertex: VertexId, label: Label) {
        let slot = vertex.index();
        let was_outer = self.labels[slot].is_outer();
        self.labels[slot] = label;
        if !was_outer {
            self.frontier.extend(self.outgoing[slot].iter().copied());
        }
    }

    // Blossom base pointers

    #[inline]
    pub fn first_non_outer(&self, vertex: VertexId) -> Option<VertexId> {
        self.first_non_outer[vertex.index()]
    }

    #[inline]
    pub fn set_first_non_outer(&mut self, vertex: VertexId, base: Option<VertexId>) {
        self.first_non_outer[vertex.index()] = base;
    }

    /// Next non-outer position on the alternating path through non-outer `vertex`
    ///
    /// `first_non_outer(label(match(vertex)))`: the partner of a non-outer
    /// path vertex always carries a vertex label.
    pub fn next_non_outer(&self, vertex: VertexId) -> Result<Option<VertexId>, MatchingError> {
        let partner = self.partner(vertex).ok_or_else(|| {
            MatchingError::InvariantViolation(format!(
                "non-outer path vertex {} is unmatched",
                vertex
            ))
        })?;

        let labeller = self.label(partner).vertex_label().ok_or_else(|| {
            MatchingError::InvariantViolation(format!(
                "partner {} of path vertex {} has label {:?}, expected a vertex label",
                partner,
                vertex,
                self.label(partner)
            ))
        })?;

        Ok(self.first_non_outer(labeller))
    }

    // Edge enumeration

    /// Pops the smallest pending directed edge whose source is outer
    pub fn next_outer_edge(&mut self) -> Option<EdgeId> {
        self.frontier.pop_first()
    }

    /// All directed edges whose source is currently outer, in insertion order
    pub fn edges_with_outer_source(&self) -> Vec<EdgeId> {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, edge)| self.is_outer(edge.0))
            .map(|(index, _)| EdgeId(index))
            .collect()
    }

    /// Clears every label, flag, base pointer and the frontier
    pub fn reset(&mut self) {
        for vertex in self.vertices() {
            self.clear_label(vertex);
        }
        self.first_non_outer.fill(None);
        self.beyond_root_flag = None;
        self.frontier.clear();
    }

    pub fn into_partners(self) -> Vec<Option<VertexId>> {
        self.matching
    }
}

fn allocate<T: Clone>(len: usize, value: T, what: &str) -> Result<Vec<T>, MatchingError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|e| MatchingError::ResourceExhausted(format!("{}: {}", what, e)))?;
    buffer.resize(len, value);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> GabowState {
        let graph = UndirectedGraph::from_edges(3, [(1, 2), (2, 3), (3, 1)]).unwrap();
        GabowState::new(&graph, 16).unwrap()
    }

    #[test]
    fn test_edges_are_stored_in_both_directions() {
        let state = triangle();

        assert_eq!(state.edges.len(), 6);
        assert_eq!(state.endpoints(EdgeId(0)), (VertexId(1), VertexId(2)));
        assert_eq!(state.endpoints(EdgeId(1)), (VertexId(2), VertexId(1)));
        assert_eq!(state.endpoints(EdgeId(5)), (VertexId(1), VertexId(3)));
    }

    #[test]
    fn test_initial_state_is_unmatched_and_unset() {
        let state = triangle();

        for vertex in state.vertices() {
            assert!(!state.is_matched(vertex));
            assert_eq!(state.label(vertex), Label::Unset);
            assert_eq!(state.first_non_outer(vertex), None);
        }
        assert!(state.edges_with_outer_source().is_empty());
    }

    #[test]
    fn test_outer_source_enumeration_follows_insertion_order() {
        let mut state = triangle();
        state.mark_root(VertexId(1));

        assert_eq!(state.edges_with_outer_source(), vec![EdgeId(0), EdgeId(5)]);

        state.mark_vertex_label(VertexId(3), VertexId(1));
        assert_eq!(
            state.edges_with_outer_source(),
            vec![EdgeId(0), EdgeId(3), EdgeId(4), EdgeId(5)]
        );
    }

    #[test]
    fn test_frontier_hands_out_each_edge_once_in_order() {
        let mut state = triangle();
        state.mark_root(VertexId(2));

        assert_eq!(state.next_outer_edge(), Some(EdgeId(1)));

        state.mark_vertex_label(VertexId(1), VertexId(2));
        // Relabelling an outer vertex must not queue its edges again
        state.mark_edge_label(VertexId(1), EdgeId(2));

        let rest: Vec<_> = std::iter::from_fn(|| state.next_outer_edge()).collect();
        assert_eq!(rest, vec![EdgeId(0), EdgeId(2), EdgeId(5)]);
    }

    #[test]
    fn test_flags_on_vertices_and_beyond_root() {
        let mut state = triangle();

        state.mark_flagged(Some(VertexId(2)), EdgeId(4));
        state.mark_flagged(None, EdgeId(4));

        assert!(state.is_flagged_by(Some(VertexId(2)), EdgeId(4)));
        assert!(state.is_flagged_by(None, EdgeId(4)));
        assert!(!state.is_flagged_by(None, EdgeId(2)));
        assert!(!state.is_outer(VertexId(2)));
        assert!(!state.is_outer_position(None));
    }

    #[test]
    fn test_next_non_outer_follows_partner_label() {
        let mut state = triangle();
        state.set_partner(VertexId(1), VertexId(2));
        state.set_partner(VertexId(2), VertexId(1));
        state.mark_root(VertexId(3));
        state.mark_vertex_label(VertexId(1), VertexId(3));
        state.set_first_non_outer(VertexId(1), Some(VertexId(2)));

        assert_eq!(state.next_non_outer(VertexId(2)).unwrap(), None);
        assert!(matches!(
            state.next_non_outer(VertexId(3)),
            Err(MatchingError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_clear_label_makes_vertex_non_outer_and_unflagged() {
        let mut state = triangle();
        state.mark_root(VertexId(1));
        state.mark_flagged(Some(VertexId(2)), EdgeId(0));

        state.clear_label(VertexId(1));
        state.clear_label(VertexId(2));

        assert_eq!(state.label(VertexId(1)), Label::Unset);
        assert!(!state.is_outer(VertexId(1)));
        assert!(!state.is_outer_position(Some(VertexId(1))));
        assert!(!state.is_flagged_by(Some(VertexId(2)), EdgeId(0)));
        assert!(state.edges_with_outer_source().is_empty());
    }

    #[test]
    fn test_reset_clears_search_state_but_keeps_matching() {
        let mut state = triangle();
        state.set_partner(VertexId(1), VertexId(2));
        state.set_partner(VertexId(2), VertexId(1));
        state.mark_root(VertexId(3));
        state.mark_flagged(None, EdgeId(0));
        state.set_first_non_outer(VertexId(3), Some(VertexId(1)));

        state.reset();

        assert_eq!(state.label(VertexId(3)), Label::Unset);
        assert_eq!(state.first_non_outer(VertexId(3)), None);
        assert!(!state.is_flagged_by(None, EdgeId(0)));
        assert_eq!(state.next_outer_edge(), None);
        assert_eq!(state.partner(VertexId(1)), Some(VertexId(2)));
    }

    #[test]
    fn test_vertex_limit_is_enforced() {
        let graph = UndirectedGraph::new(8);

        assert!(matches!(
            GabowState::new(&graph, 4),
            Err(MatchingError::ResourceExhausted(_))
        ));
    }
}
