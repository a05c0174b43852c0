//! CHRONOS Matching Core
//!
//! Maximum-cardinality matching in general (non-bipartite) graphs through
//! Gabow's implementation of Edmonds' blossom algorithm.
//!
//! ```
//! use chronos_matching::{maximum_matching, UndirectedGraph, VertexId};
//!
//! let triangle = UndirectedGraph::from_edges(3, [(1, 2), (2, 3), (3, 1)]).unwrap();
//! let matching = maximum_matching(&triangle).unwrap();
//!
//! assert_eq!(matching.len(), 1);
//! assert_eq!(matching.partner(VertexId(1)), Some(VertexId(2)));
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod config;
pub mod data_structures;
pub mod validation;

pub use crate::algorithm::graph::matching::{
    maximum_matching, GabowMatching, Matching, MatchingOutcome, MatchingStatistics,
};
pub use crate::algorithm::traits::{
    AlgorithmComplexity, EdgeId, MatchingAlgorithm, MatchingError, VertexId,
};
pub use crate::config::MatchingConfig;
pub use crate::data_structures::{SymmetricMatrix, UndirectedGraph};
