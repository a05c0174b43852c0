//! Simple undirected graph with validated construction
//!
//! This module implements the input side of the matching core: a simple
//! undirected graph over vertices `1..=n`, built edge by edge or derived from
//! a thresholded symmetric score matrix.
//!
//! # Structural Invariants
//! 1. **Range Property**: every endpoint lies in `[1, n]`
//! 2. **Simplicity Property**: no self-loops and no parallel edges, in either orientation
//! 3. **Order Property**: `edges()` yields edges in insertion order; this order is
//!    the tie-break for every choice the matching search makes
//!
//! Violations are rejected at insertion time with a `MatchingError`.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashSet;

use crate::algorithm::traits::{MatchingError, VertexId};
use crate::config::MatchingConfig;
use crate::data_structures::matrix::SymmetricMatrix;

/// Undirected simple graph
#[derive(Debug, Clone, Default)]
pub struct UndirectedGraph {
    /// Number of vertices, ids `1..=vertex_count`
    vertex_count: usize,
    /// Edges in insertion order, as given by the caller
    edges: Vec<(VertexId, VertexId)>,
    /// Normalized `(min, max)` pairs for O(1) duplicate detection
    lookup: HashSet<(VertexId, VertexId)>,
}

impl UndirectedGraph {
    /// Creates a graph with `vertex_count` isolated vertices
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            edges: Vec::new(),
            lookup: HashSet::new(),
        }
    }

    /// Builds a graph from 1-based edges
    pub fn from_edges<I>(vertex_count: usize, edges: I) -> Result<Self, MatchingError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self::new(vertex_count);
        for (u, v) in edges {
            graph.add_edge(VertexId(u), VertexId(v))?;
        }
        Ok(graph)
    }

    /// Builds a graph from 0-based edges, shifting every endpoint by one
    pub fn from_zero_based_edges<I>(vertex_count: usize, edges: I) -> Result<Self, MatchingError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        Self::from_edges(vertex_count, edges.into_iter().map(|(u, v)| (u + 1, v + 1)))
    }

    /// Derives the candidate edge set of a score matrix
    ///
    /// Scans the strict upper triangle in row-major order and adds
    /// `(i + 1, j + 1)` for every entry the config's threshold accepts.
    /// The diagonal is ignored; an infinite off-diagonal score is rejected.
    pub fn from_matrix(
        matrix: &SymmetricMatrix<f64>,
        config: &MatchingConfig,
    ) -> Result<Self, MatchingError> {
        config.validate()?;

        let mut graph = Self::new(matrix.dimension());
        for (i, j, &score) in matrix.upper_triangle() {
            if !score.is_finite() {
                return Err(MatchingError::NonFiniteEntry { row: i, column: j });
            }
            if config.accepts(score) {
                graph.add_edge(VertexId::from_index(i), VertexId::from_index(j))?;
            }
        }
        Ok(graph)
    }

    /// Adds the undirected edge `u - v`
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> Result<(), MatchingError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;

        if u == v {
            return Err(MatchingError::SelfLoop(u));
        }

        if !self.lookup.insert(Self::normalize(u, v)) {
            return Err(MatchingError::DuplicateEdge(u, v));
        }

        self.edges.push((u, v));
        Ok(())
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges in insertion order
    #[inline]
    pub fn edges(&self) -> &[(VertexId, VertexId)] {
        &self.edges
    }

    pub fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.lookup.contains(&Self::normalize(u, v))
    }

    /// Vertices adjacent to `vertex`, in edge insertion order
    pub fn neighbors(&self, vertex: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.edges.iter().filter_map(move |&(u, v)| {
            if u == vertex {
                Some(v)
            } else if v == vertex {
                Some(u)
            } else {
                None
            }
        })
    }

    fn check_vertex(&self, vertex: VertexId) -> Result<(), MatchingError> {
        if vertex.0 == 0 || vertex.0 > self.vertex_count {
            return Err(MatchingError::InvalidVertex {
                vertex: vertex.0,
                vertex_count: self.vertex_count,
            });
        }
        Ok(())
    }

    #[inline]
    fn normalize(u: VertexId, v: VertexId) -> (VertexId, VertexId) {
        if u < v {
            (u, v)
        } else {
            (v, u)
        }
    }
}
