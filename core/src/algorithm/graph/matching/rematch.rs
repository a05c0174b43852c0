//! Augmentation along an alternating path (Gabow's procedure R)
//!
//! `rematch(v, w)` sets `match(v) = w`, then repairs the partner `t` that
//! `v` left behind: a vertex-labelled `v` hands `t` to its labeller, an
//! edge-labelled `v` flips both halves of the blossom path through its edge.
//! A branch stops as soon as `match(t) != v`, i.e. a deeper step already
//! reassigned `t`.
//!
//! The recursion is driven by an explicit stack; pushing the second half of
//! a blossom flip before the first one keeps the recursive evaluation order,
//! and stack depth never grows with the length of the path.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::trace;

use crate::algorithm::traits::{MatchingError, VertexId};

use super::label::Label;
use super::state::GabowState;

/// Flips the matching along the augmenting path ending in `first` - `second`
///
/// Returns the number of rematch steps performed.
pub fn rematch(state: &mut GabowState, first: VertexId, second: VertexId) -> Result<usize, MatchingError> {
    let mut worklist = vec![(first, second)];
    let mut steps = 0;

    while let Some((vertex, partner)) = worklist.pop() {
        steps += 1;
        let previous = state.partner(vertex);
        state.set_partner(vertex, partner);
        trace!("rematch {} -> {} (was {:?})", vertex, partner, previous);

        let Some(left) = previous else { continue };
        if state.partner(left) != Some(vertex) {
            continue;
        }

        match state.label(vertex) {
            Label::Vertex(labeller) => {
                state.set_partner(left, labeller);
                worklist.push((labeller, left));
            }
            Label::Edge(edge) => {
                let (a, b) = state.endpoints(edge);
                worklist.push((b, a));
                worklist.push((a, b));
            }
            label => {
                return Err(MatchingError::InvariantViolation(format!(
                    "matched vertex {} on an augmenting path carries label {:?}",
                    vertex, label
                )));
            }
        }
    }

    Ok(steps)
}
