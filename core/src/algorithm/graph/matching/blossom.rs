//! Blossom base resolution (Gabow's procedure L)
//!
//! Invoked for an edge `(x, y)` joining two outer vertices of the current
//! alternating tree. The two alternating paths from `first_non_outer(x)` and
//! `first_non_outer(y)` towards the root are walked in alternation, flagging
//! every non-outer position with the edge, until one path reaches a position
//! the other already flagged: the blossom base (join). Every non-outer vertex
//! strictly before the join on either path is then edge-labelled and pointed
//! at the join, and older blossoms absorbed by the new one are flattened.
//!
//! # Invariants
//! - The join is always non-outer; `None` means the blossom's base is the root
//! - On return, `first_non_outer(v)` is non-outer for every outer `v`
//!
//! Each call costs O(V): the walks visit every path position at most once and
//! the flattening pass touches each vertex once.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::trace;

use crate::algorithm::traits::{EdgeId, MatchingError, VertexId};

use super::state::GabowState;

/// Result of resolving one outer-outer edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlossomOutcome {
    /// Both endpoints already share a base; nothing was relabelled
    Redundant,
    /// A blossom was formed on `base`, absorbing `relabelled` vertices
    Formed { base: Option<VertexId>, relabelled: usize },
}

pub fn resolve_blossom(state: &mut GabowState, edge: EdgeId) -> Result<BlossomOutcome, MatchingError> {
    let (x, y) = state.endpoints(edge);
    let x_base = state.first_non_outer(x);
    let y_base = state.first_non_outer(y);

    if x_base == y_base {
        trace!("edge {} ({} - {}) is redundant: shared base {:?}", edge, x, y, x_base);
        return Ok(BlossomOutcome::Redundant);
    }

    let join = find_join(state, edge, x_base, y_base)?;
    trace!("edge {} ({} - {}) closes a blossom on base {:?}", edge, x, y, join);

    let relabelled = label_path(state, x_base, join, edge)? + label_path(state, y_base, join, edge)?;

    for vertex in state.vertices() {
        if state.is_outer(vertex) && state.is_outer_position(state.first_non_outer(vertex)) {
            state.set_first_non_outer(vertex, join);
        }
    }

    Ok(BlossomOutcome::Formed { base: join, relabelled })
}

/// Alternating walk from both bases until a position is reached twice
fn find_join(
    state: &mut GabowState,
    edge: EdgeId,
    x_base: Option<VertexId>,
    y_base: Option<VertexId>,
) -> Result<Option<VertexId>, MatchingError> {
    let mut r = x_base;
    let mut s = y_base;
    state.mark_flagged(r, edge);
    state.mark_flagged(s, edge);

    loop {
        // A path parked beyond the root stays parked; the other keeps walking.
        if s.is_some() {
            std::mem::swap(&mut r, &mut s);
        }

        let current = r.ok_or_else(|| {
            MatchingError::InvariantViolation(format!(
                "both blossom paths of edge {} ran past the root without meeting",
                edge
            ))
        })?;

        r = state.next_non_outer(current)?;
        if state.is_flagged_by(r, edge) {
            return Ok(r);
        }
        state.mark_flagged(r, edge);
    }
}

/// Edge-labels the non-outer vertices from `start` up to, not including, `join`
fn label_path(
    state: &mut GabowState,
    start: Option<VertexId>,
    join: Option<VertexId>,
    edge: EdgeId,
) -> Result<usize, MatchingError> {
    let mut position = start;
    let mut count = 0;

    while position != join {
        let vertex = position.ok_or_else(|| {
            MatchingError::InvariantViolation(format!(
                "blossom path of edge {} passed the root before reaching its base",
                edge
            ))
        })?;

        state.mark_edge_label(vertex, edge);
        state.set_first_non_outer(vertex, join);
        count += 1;
        position = state.next_non_outer(vertex)?;
    }

    Ok(count)
}
