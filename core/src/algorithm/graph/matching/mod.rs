//! Maximum-Cardinality Matching in General Graphs
//!
//! This module implements Gabow's implementation of Edmonds' blossom
//! algorithm. Blossoms are never contracted; instead every outer vertex
//! keeps a pointer to the first non-outer vertex on its alternating path to
//! the root, and absorbing a blossom only repoints those pointers at the
//! blossom's base.
//!
//! # Theoretical Foundation
//!
//! A matching is maximum iff it admits no augmenting path (Berge). The
//! search grows an alternating tree from each unmatched vertex in turn:
//!
//! - **E (search)**: pull the next edge `(x, y)` with `x` outer. A free `y`
//!   ends the search with an augmentation; an outer `y` closes a blossom;
//!   otherwise `match(y)` becomes outer with a vertex label.
//! - **L (blossom)**: see [`blossom`].
//! - **R (rematch)**: see [`rematch`].
//!
//! A vertex whose search finds no augmenting path never acquires one later,
//! so a single pass over the vertices suffices.
//!
//! # Algorithmic Complexity
//!
//! - **Time Complexity**: O(V³) - at most V searches, each O(V²)
//! - **Space Complexity**: O(V + E)
//!
//! # Determinism
//!
//! Roots are tried in increasing vertex order and edges in insertion order,
//! so a fixed input yields a fixed matching.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod blossom;
pub mod label;
pub mod rematch;
pub mod state;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{
    AlgorithmComplexity, MatchingAlgorithm, MatchingError, VertexId,
};
use crate::config::MatchingConfig;
use crate::data_structures::graph::UndirectedGraph;
use crate::data_structures::matrix::SymmetricMatrix;
use crate::validation::correctness::verify_matching;

use self::blossom::{resolve_blossom, BlossomOutcome};
use self::rematch::rematch;
use self::state::GabowState;

// ═══════════════════════════════════════════════════════════════════════════════════════
// MATCHING RESULT
// ═══════════════════════════════════════════════════════════════════════════════════════

/// A set of vertex-disjoint edges over vertices `1..=n`
///
/// A decoded matching is checked like [`Matching::from_pairs`]: every
/// partner is in range and names its vertex back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMatching")]
pub struct Matching {
    partners: Vec<Option<VertexId>>,
}

#[derive(Deserialize)]
struct RawMatching {
    partners: Vec<Option<VertexId>>,
}

impl TryFrom<RawMatching> for Matching {
    type Error = MatchingError;

    fn try_from(raw: RawMatching) -> Result<Self, Self::Error> {
        let vertex_count = raw.partners.len();
        for (slot, &partner) in raw.partners.iter().enumerate() {
            let Some(partner) = partner else { continue };
            let vertex = VertexId::from_index(slot);

            if partner.0 == 0 || partner.0 > vertex_count {
                return Err(MatchingError::InvalidVertex { vertex: partner.0, vertex_count });
            }
            if partner == vertex || raw.partners.get(partner.index()) != Some(&Some(vertex)) {
                return Err(MatchingError::InvalidMatching(format!(
                    "{} names {} as partner, which is not paired back",
                    vertex, partner
                )));
            }
        }
        Ok(Self { partners: raw.partners })
    }
}

impl Matching {
    /// The empty matching over `vertex_count` vertices
    pub fn empty(vertex_count: usize) -> Self {
        Self { partners: vec![None; vertex_count] }
    }

    /// Builds a matching from vertex-disjoint 1-based pairs
    pub fn from_pairs<I>(vertex_count: usize, pairs: I) -> Result<Self, MatchingError>
    where
        I: IntoIterator<Item = (VertexId, VertexId)>,
    {
        let mut matching = Self::empty(vertex_count);
        for (u, v) in pairs {
            for vertex in [u, v] {
                if vertex.0 == 0 || vertex.0 > vertex_count {
                    return Err(MatchingError::InvalidVertex { vertex: vertex.0, vertex_count });
                }
            }
            if u == v || matching.is_matched(u) || matching.is_matched(v) {
                return Err(MatchingError::InvalidMatching(format!(
                    "pair {} - {} is not vertex-disjoint from the others",
                    u, v
                )));
            }
            matching.partners[u.index()] = Some(v);
            matching.partners[v.index()] = Some(u);
        }
        Ok(matching)
    }

    pub(crate) fn from_partners(partners: Vec<Option<VertexId>>) -> Self {
        Self { partners }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.partners.len()
    }

    /// Partner of `vertex`, `None` when unmatched or out of range
    #[inline]
    pub fn partner(&self, vertex: VertexId) -> Option<VertexId> {
        vertex
            .0
            .checked_sub(1)
            .and_then(|slot| self.partners.get(slot))
            .copied()
            .flatten()
    }

    #[inline]
    pub fn is_matched(&self, vertex: VertexId) -> bool {
        self.partner(vertex).is_some()
    }

    /// Matched pairs `(u, v)` with `u < v`, ascending by `u`
    pub fn pairs(&self) -> Vec<(VertexId, VertexId)> {
        self.partners
            .iter()
            .enumerate()
            .filter_map(|(slot, &partner)| {
                let vertex = VertexId::from_index(slot);
                partner.filter(|&p| p > vertex).map(|p| (vertex, p))
            })
            .collect()
    }

    /// Number of matched pairs
    pub fn len(&self) -> usize {
        self.pairs().len()
    }

    pub fn is_empty(&self) -> bool {
        self.partners.iter().all(Option::is_none)
    }

    /// Symmetric boolean matrix with `true` at every matched pair (0-based)
    pub fn to_matrix(&self) -> Result<SymmetricMatrix<bool>, MatchingError> {
        let mut matrix = SymmetricMatrix::filled(self.vertex_count(), false);
        for (u, v) in self.pairs() {
            matrix.set(u.index(), v.index(), true)?;
        }
        Ok(matrix)
    }

    pub(crate) fn partners(&self) -> &[Option<VertexId>] {
        &self.partners
    }
}

/// Counters collected over one matching request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingStatistics {
    /// Alternating-tree searches started
    pub searches: usize,
    /// Searches that ended in an augmentation
    pub augmentations: usize,
    /// Blossoms formed
    pub blossoms: usize,
    /// Outer-outer edges whose endpoints already shared a base
    pub redundant_blossom_edges: usize,
    /// Directed edges pulled from the frontier
    pub edges_examined: usize,
    /// Vertices that became outer through a vertex label
    pub vertex_labels: usize,
    /// Rematch steps over all augmentations
    pub rematch_steps: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingOutcome {
    pub matching: Matching,
    pub statistics: MatchingStatistics,
}

// ═══════════════════════════════════════════════════════════════════════════════════════
// SEARCH DRIVER
// ═══════════════════════════════════════════════════════════════════════════════════════

/// Gabow's O(V³) maximum-cardinality matching
#[derive(Debug, Clone, Default)]
pub struct GabowMatching {
    config: MatchingConfig,
}

impl GabowMatching {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Computes a maximum matching of `graph` together with search statistics
    pub fn solve(&self, graph: &UndirectedGraph) -> Result<MatchingOutcome, MatchingError> {
        self.config.validate()?;

        let mut state = GabowState::new(graph, self.config.max_vertices)?;
        let mut statistics = MatchingStatistics::default();

        debug!(
            "gabow matching: {} vertices, {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );

        for root in state.vertices() {
            if state.is_matched(root) {
                continue;
            }

            statistics.searches += 1;
            let augmented = search(&mut state, root, &mut statistics)?;
            state.reset();

            debug!(
                "search from {}: {}",
                root,
                if augmented { "augmented" } else { "exhausted" }
            );
        }

        let matching = Matching::from_partners(state.into_partners());
        if self.config.verify_result {
            verify_matching(graph, &matching)?;
        }

        debug!(
            "gabow matching: {} pairs, statistics {:?}",
            matching.len(),
            statistics
        );

        Ok(MatchingOutcome { matching, statistics })
    }

    /// Matrix in, matched-pair matrix out
    ///
    /// The score matrix is thresholded with this matcher's config; the
    /// result holds `true` at `(i, j)` and `(j, i)` for every matched pair.
    pub fn match_matrix(
        &self,
        scores: &SymmetricMatrix<f64>,
    ) -> Result<SymmetricMatrix<bool>, MatchingError> {
        let graph = UndirectedGraph::from_matrix(scores, &self.config)?;
        self.solve(&graph)?.matching.to_matrix()
    }
}

/// Grows one alternating tree from `root`; returns whether it augmented
fn search(
    state: &mut GabowState,
    root: VertexId,
    statistics: &mut MatchingStatistics,
) -> Result<bool, MatchingError> {
    state.mark_root(root);
    state.set_first_non_outer(root, None);

    while let Some(edge) = state.next_outer_edge() {
        statistics.edges_examined += 1;
        let (x, y) = state.endpoints(edge);

        if !state.is_matched(y) && y != root {
            trace!("edge {} ({} - {}): augment", edge, x, y);
            state.set_partner(y, x);
            statistics.rematch_steps += rematch(state, x, y)?;
            statistics.augmentations += 1;
            return Ok(true);
        }

        if state.is_outer(y) {
            match resolve_blossom(state, edge)? {
                BlossomOutcome::Redundant => statistics.redundant_blossom_edges += 1,
                BlossomOutcome::Formed { base, relabelled } => {
                    trace!(
                        "edge {} ({} - {}): blossom on {:?}, {} vertices turned outer",
                        edge, x, y, base, relabelled
                    );
                    statistics.blossoms += 1;
                }
            }
            continue;
        }

        let mate = state.partner(y).ok_or_else(|| {
            MatchingError::InvariantViolation(format!(
                "non-outer vertex {} reached from {} is unmatched",
                y, x
            ))
        })?;

        if !state.is_outer(mate) {
            trace!("edge {} ({} - {}): vertex label {} <- {}", edge, x, y, mate, x);
            state.mark_vertex_label(mate, x);
            state.set_first_non_outer(mate, Some(y));
            statistics.vertex_labels += 1;
        } else {
            trace!("edge {} ({} - {}): skip, {} already outer", edge, x, y, mate);
        }
    }

    Ok(false)
}

impl MatchingAlgorithm for GabowMatching {
    fn name(&self) -> &'static str {
        "Gabow's Maximum Cardinality Matching"
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O(V^3)".to_string(),
            space_complexity: "O(V + E)".to_string(),
        }
    }

    fn find_maximum_matching(&self, graph: &UndirectedGraph) -> Result<Matching, MatchingError> {
        self.solve(graph).map(|outcome| outcome.matching)
    }
}

/// Maximum matching of `graph` under the default configuration
pub fn maximum_matching(graph: &UndirectedGraph) -> Result<Matching, MatchingError> {
    GabowMatching::new().find_maximum_matching(graph)
}
