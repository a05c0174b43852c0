//! Correctness Verification for Matchings
//!
//! Structural validation of a computed matching against its input graph,
//! and an exhaustive maximum-cardinality oracle for small graphs. The oracle
//! is the reference the blossom search is checked against; it enumerates
//! every matching and is exponential in the vertex count.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::algorithm::graph::matching::{GabowMatching, Matching};
use crate::algorithm::traits::{AlgorithmComplexity, MatchingAlgorithm, MatchingError, VertexId};
use crate::data_structures::graph::UndirectedGraph;

/// Checks that `matching` is a symmetric set of vertex-disjoint edges of `graph`
pub fn verify_matching(graph: &UndirectedGraph, matching: &Matching) -> Result<(), MatchingError> {
    if matching.vertex_count() != graph.vertex_count() {
        return Err(MatchingError::InvalidMatching(format!(
            "matching covers {} vertices, graph has {}",
            matching.vertex_count(),
            graph.vertex_count()
        )));
    }

    for (slot, partner) in matching.partners().iter().enumerate() {
        let vertex = VertexId::from_index(slot);
        let Some(partner) = *partner else { continue };

        if partner.0 == 0 || partner.0 > graph.vertex_count() {
            return Err(MatchingError::InvalidMatching(format!(
                "{} is matched to out-of-range vertex {}",
                vertex, partner.0
            )));
        }

        if matching.partner(partner) != Some(vertex) {
            return Err(MatchingError::InvalidMatching(format!(
                "{} is matched to {}, but {} is matched to {:?}",
                vertex,
                partner,
                partner,
                matching.partner(partner)
            )));
        }

        if !graph.has_edge(vertex, partner) {
            return Err(MatchingError::InvalidMatching(format!(
                "pair {} - {} is not an edge of the graph",
                vertex, partner
            )));
        }
    }

    Ok(())
}

/// Brute-force maximum-cardinality matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhaustiveMatching {
    /// Largest graph the oracle agrees to enumerate
    pub max_vertices: usize,
}

impl Default for ExhaustiveMatching {
    fn default() -> Self {
        Self { max_vertices: 12 }
    }
}

impl ExhaustiveMatching {
    /// Cardinality of a maximum matching of `graph`
    pub fn maximum_size(&self, graph: &UndirectedGraph) -> Result<usize, MatchingError> {
        self.enumerate(graph).map(|pairs| pairs.len())
    }

    fn enumerate(&self, graph: &UndirectedGraph) -> Result<Vec<(usize, usize)>, MatchingError> {
        let n = graph.vertex_count();
        if n > self.max_vertices {
            return Err(MatchingError::NotSupported(format!(
                "exhaustive matching is limited to {} vertices, graph has {}",
                self.max_vertices, n
            )));
        }

        let mut adjacency = vec![Vec::new(); n];
        for &(u, v) in graph.edges() {
            adjacency[u.index()].push(v.index());
            adjacency[v.index()].push(u.index());
        }

        let mut search = ExhaustiveSearch {
            adjacency,
            decided: vec![false; n],
            current: Vec::new(),
            best: Vec::new(),
        };
        search.explore(0);
        Ok(search.best)
    }
}

/// Branching over "leave the lowest undecided vertex unmatched" and
/// "match it to each undecided neighbour"
struct ExhaustiveSearch {
    adjacency: Vec<Vec<usize>>,
    decided: Vec<bool>,
    current: Vec<(usize, usize)>,
    best: Vec<(usize, usize)>,
}

impl ExhaustiveSearch {
    fn explore(&mut self, from: usize) {
        let n = self.decided.len();
        let Some(vertex) = (from..n).find(|&v| !self.decided[v]) else {
            if self.current.len() > self.best.len() {
                self.best = self.current.clone();
            }
            return;
        };

        let undecided = (vertex..n).filter(|&v| !self.decided[v]).count();
        if self.current.len() + undecided / 2 <= self.best.len() {
            return;
        }

        self.decided[vertex] = true;
        for i in 0..self.adjacency[vertex].len() {
            let neighbour = self.adjacency[vertex][i];
            if self.decided[neighbour] {
                continue;
            }
            self.decided[neighbour] = true;
            self.current.push((vertex, neighbour));
            self.explore(vertex + 1);
            self.current.pop();
            self.decided[neighbour] = false;
        }
        self.explore(vertex + 1);
        self.decided[vertex] = false;
    }
}

impl MatchingAlgorithm for ExhaustiveMatching {
    fn name(&self) -> &'static str {
        "Exhaustive Maximum Cardinality Matching"
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O(V!!)".to_string(),
            space_complexity: "O(V + E)".to_string(),
        }
    }

    fn find_maximum_matching(&self, graph: &UndirectedGraph) -> Result<Matching, MatchingError> {
        let pairs = self.enumerate(graph)?;
        Matching::from_pairs(
            graph.vertex_count(),
            pairs
                .into_iter()
                .map(|(u, v)| (VertexId::from_index(u), VertexId::from_index(v))),
        )
    }
}

/// Gabow result against the exhaustive oracle on one graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossValidationReport {
    pub graph_index: usize,
    pub vertex_count: usize,
    pub edge_count: usize,
    pub gabow_size: usize,
    pub exhaustive_size: usize,
    pub valid: bool,
}

impl CrossValidationReport {
    pub fn is_consistent(&self) -> bool {
        self.valid && self.gabow_size == self.exhaustive_size
    }
}

/// Runs both matchers on every graph, in parallel across graphs
pub fn cross_validate(graphs: &[UndirectedGraph]) -> Result<Vec<CrossValidationReport>, MatchingError> {
    let gabow = GabowMatching::new();
    let oracle = ExhaustiveMatching::default();

    graphs
        .par_iter()
        .enumerate()
        .map(|(graph_index, graph)| -> Result<CrossValidationReport, MatchingError> {
            let matching = gabow.solve(graph)?.matching;
            Ok(CrossValidationReport {
                graph_index,
                vertex_count: graph.vertex_count(),
                edge_count: graph.edge_count(),
                gabow_size: matching.len(),
                exhaustive_size: oracle.maximum_size(graph)?,
                valid: verify_matching(graph, &matching).is_ok(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_accepts_valid_matching() {
        let graph = UndirectedGraph::from_edges(4, [(1, 2), (3, 4), (2, 3)]).unwrap();
        let matching =
            Matching::from_pairs(4, [(VertexId(1), VertexId(2)), (VertexId(3), VertexId(4))]).unwrap();

        assert!(verify_matching(&graph, &matching).is_ok());
    }

    #[test]
    fn test_verify_rejects_non_edge_pair() {
        let graph = UndirectedGraph::from_edges(4, [(1, 2), (3, 4)]).unwrap();
        let matching = Matching::from_pairs(4, [(VertexId(1), VertexId(3))]).unwrap();

        assert!(matches!(
            verify_matching(&graph, &matching),
            Err(MatchingError::InvalidMatching(_))
        ));
    }

    #[test]
    fn test_verify_rejects_asymmetric_partners() {
        let graph = UndirectedGraph::from_edges(3, [(1, 2), (2, 3)]).unwrap();
        let matching = Matching::from_partners(vec![Some(VertexId(2)), Some(VertexId(3)), Some(VertexId(2))]);

        assert!(verify_matching(&graph, &matching).is_err());
    }

    #[test]
    fn test_verify_rejects_vertex_count_mismatch() {
        let graph = UndirectedGraph::new(3);

        assert!(verify_matching(&graph, &Matching::empty(4)).is_err());
    }

    #[test]
    fn test_exhaustive_sizes() {
        let oracle = ExhaustiveMatching::default();

        let triangle = UndirectedGraph::from_edges(3, [(1, 2), (2, 3), (3, 1)]).unwrap();
        assert_eq!(oracle.maximum_size(&triangle).unwrap(), 1);

        let path = UndirectedGraph::from_edges(6, [(1, 2), (2, 3), (3, 4), (4, 5), (5, 6)]).unwrap();
        assert_eq!(oracle.maximum_size(&path).unwrap(), 3);

        assert_eq!(oracle.maximum_size(&UndirectedGraph::new(5)).unwrap(), 0);
    }

    #[test]
    fn test_exhaustive_matching_is_valid() {
        let graph = UndirectedGraph::from_edges(5, [(1, 2), (2, 3), (3, 4), (4, 5), (5, 1)]).unwrap();
        let matching = ExhaustiveMatching::default().find_maximum_matching(&graph).unwrap();

        assert_eq!(matching.len(), 2);
        assert!(verify_matching(&graph, &matching).is_ok());
    }

    #[test]
    fn test_exhaustive_refuses_large_graphs() {
        let graph = UndirectedGraph::new(13);

        assert!(matches!(
            ExhaustiveMatching::default().maximum_size(&graph),
            Err(MatchingError::NotSupported(_))
        ));
    }

    #[test]
    fn test_cross_validation_over_complete_graphs() {
        let graphs: Vec<_> = (1..=8)
            .map(|n| {
                let edges = (1..=n).flat_map(|u| ((u + 1)..=n).map(move |v| (u, v)));
                UndirectedGraph::from_edges(n, edges).unwrap()
            })
            .collect();

        let reports = cross_validate(&graphs).unwrap();

        assert_eq!(reports.len(), 8);
        for report in &reports {
            assert!(report.is_consistent(), "{:?}", report);
            assert_eq!(report.gabow_size, report.vertex_count / 2);
        }
        assert_eq!(reports[3].graph_index, 3);
    }
}
