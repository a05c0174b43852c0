//! Core data structures for the matching pipeline
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod graph;
pub mod matrix;

pub use self::graph::UndirectedGraph;
pub use self::matrix::SymmetricMatrix;
