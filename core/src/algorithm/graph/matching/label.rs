//! Vertex labels of the alternating-tree search
//!
//! A vertex is *outer* exactly when it carries `Root`, `Vertex` or `Edge`.
//! `Flagged` marks a non-outer vertex visited by the blossom-base walk of
//! one particular edge; the tag identifies that walk.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{EdgeId, VertexId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Label {
    /// Non-outer, not reached by the current search
    #[default]
    Unset,
    /// Start vertex of the current search
    Root,
    /// Outer, reached through a matched edge from this outer vertex
    Vertex(VertexId),
    /// Outer, absorbed into the blossom closed by this edge
    Edge(EdgeId),
    /// Non-outer, visited while resolving the blossom closed by this edge
    Flagged(EdgeId),
}

impl Label {
    #[inline]
    pub fn is_outer(self) -> bool {
        matches!(self, Label::Root | Label::Vertex(_) | Label::Edge(_))
    }

    #[inline]
    pub fn vertex_label(self) -> Option<VertexId> {
        match self {
            Label::Vertex(vertex) => Some(vertex),
            _ => None,
        }
    }

    #[inline]
    pub fn edge_label(self) -> Option<EdgeId> {
        match self {
            Label::Edge(edge) => Some(edge),
            _ => None,
        }
    }

    /// True only for a flag left by the walk of `edge`
    #[inline]
    pub fn is_flagged_by(self, edge: EdgeId) -> bool {
        self == Label::Flagged(edge)
    }
}
