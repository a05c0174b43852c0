//! CHRONOS Algorithm Framework
//! Graph matching algorithms with mathematical correctness guarantees
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod traits;
pub mod graph;

pub use self::traits::*;
pub use self::graph::*;
