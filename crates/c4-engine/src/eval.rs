//! Leaf evaluation.
//!
//! The search calls an [`Evaluator`] only when it reaches its depth limit
//! without a win, loss or full board. Hosts can plug in their own heuristic;
//! the default compares the two aggregate line scores.

use c4_core::{GameState, Player};

/// Scores a position for `player` at a leaf of the search tree.
///
/// Higher is better for `player`. The search clamps results to
/// `±`[`HEURISTIC_LIMIT`](crate::search::negamax::HEURISTIC_LIMIT) so that
/// forced wins and losses always outrank heuristic values.
pub trait Evaluator: Send {
    /// Score `state` from `player`'s point of view.
    fn goodness(&self, state: &GameState, player: Player) -> i32;
}

/// Difference between the two players' aggregate line scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreDifference;

impl Evaluator for ScoreDifference {
    #[inline]
    fn goodness(&self, state: &GameState, player: Player) -> i32 {
        state.goodness(player)
    }
}
