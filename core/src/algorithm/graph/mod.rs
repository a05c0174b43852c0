//! Advanced graph algorithms with mathematical optimization
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod matching;

pub use self::matching::{
    maximum_matching, GabowMatching, Matching, MatchingOutcome, MatchingStatistics,
};
