//! Validation of matching results
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod correctness;

pub use self::correctness::{cross_validate, verify_matching, CrossValidationReport, ExhaustiveMatching};
