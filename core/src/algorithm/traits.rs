//! Core algorithm trait definitions for the CHRONOS matching core
//!
//! This module establishes the identifier types, the error taxonomy and the
//! algorithm trait shared by every matching strategy in the crate.
//!
//! # Key Design Principles
//! - Vertex and edge identifiers are distinct newtypes and cannot be mixed
//! - The "unmatched" sentinel is `Option::<VertexId>::None`, never a reserved index
//! - Every precondition violation surfaces as a typed `MatchingError`
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::algorithm::graph::matching::Matching;
use crate::data_structures::graph::UndirectedGraph;

/// Vertex identifier in the closed range `[1, n]`
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct VertexId(pub usize);

impl VertexId {
    /// Maps a 0-based matrix index onto its 1-based vertex
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Self(index + 1)
    }

    /// 0-based slot of this vertex in per-vertex arrays and matrices
    #[inline]
    pub fn index(self) -> usize {
        self.0 - 1
    }
}

impl Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Directed edge identifier: position of the record in the edge store
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Comprehensive error types for matching operations
#[derive(Debug, thiserror::Error)]
pub enum MatchingError {
    #[error("Invalid vertex {vertex}: expected an id in [1, {vertex_count}]")]
    InvalidVertex { vertex: usize, vertex_count: usize },

    #[error("Self-loop on vertex {0}")]
    SelfLoop(VertexId),

    #[error("Duplicate edge {0} <-> {1}")]
    DuplicateEdge(VertexId, VertexId),

    #[error("Matrix is not square: {rows} rows but row {row} has {length} entries")]
    NonSquareMatrix { rows: usize, row: usize, length: usize },

    #[error("Matrix of dimension {dimension} cannot hold {length} entries")]
    MatrixLength { dimension: usize, length: usize },

    #[error("Matrix entry ({row}, {column}) is not a finite value")]
    NonFiniteEntry { row: usize, column: usize },

    #[error("Matrix is not symmetric at ({row}, {column})")]
    AsymmetricMatrix { row: usize, column: usize },

    #[error("Matrix index ({row}, {column}) out of bounds for dimension {dimension}")]
    IndexOutOfBounds { row: usize, column: usize, dimension: usize },

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(#[from] serde_json::Error),

    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),

    #[error("Algorithm invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Algorithm not supported on given input: {0}")]
    NotSupported(String),

    #[error("Invalid matching: {0}")]
    InvalidMatching(String),
}

/// Algorithm complexity information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmComplexity {
    pub time_complexity: String,
    pub space_complexity: String,
}

/// Maximum-cardinality matching strategy
///
/// # Invariants
/// - The returned matching is symmetric and uses only edges of `graph`
/// - Deterministic for a fixed edge insertion order
pub trait MatchingAlgorithm {
    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's asymptotic complexity in Big-O notation
    fn complexity(&self) -> AlgorithmComplexity;

    /// Computes a matching of maximum cardinality
    fn find_maximum_matching(&self, graph: &UndirectedGraph) -> Result<Matching, MatchingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_id_index_mapping() {
        let vertex = VertexId::from_index(0);

        assert_eq!(vertex, VertexId(1));
        assert_eq!(vertex.index(), 0);
        assert_eq!(VertexId(7).index(), 6);
    }

    #[test]
    fn test_identifier_display() {
        assert_eq!(VertexId(3).to_string(), "v3");
        assert_eq!(EdgeId(12).to_string(), "e12");
    }

    #[test]
    fn test_error_messages() {
        let err = MatchingError::InvalidVertex { vertex: 0, vertex_count: 4 };
        assert_eq!(err.to_string(), "Invalid vertex 0: expected an id in [1, 4]");

        let err = MatchingError::DuplicateEdge(VertexId(1), VertexId(2));
        assert_eq!(err.to_string(), "Duplicate edge v1 <-> v2");

        let err = MatchingError::NonFiniteEntry { row: 0, column: 2 };
        assert_eq!(err.to_string(), "Matrix entry (0, 2) is not a finite value");
    }
}
