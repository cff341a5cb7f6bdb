//! Negamax alpha-beta search over the state stack.

use c4_core::{DropOrder, Player, StateStack, WinMap};

use crate::eval::Evaluator;
use crate::search::MAX_LEVEL;
use crate::search::control::SearchControl;

/// Score of a position already won; reduced by the stack depth so that
/// quicker wins score higher.
pub const WIN_SCORE: i32 = i32::MAX;

/// Bound on leaf evaluations, so that every forced result outranks them.
pub const HEURISTIC_LIMIT: i32 = WIN_SCORE - MAX_LEVEL as i32 - 1;

/// Search state threaded through [`evaluate`] calls.
pub(crate) struct SearchContext<'a> {
    /// Game states indexed by depth; the current one is being evaluated.
    pub stack: &'a mut StateStack,
    /// Winning lines of the game being searched.
    pub map: &'a WinMap,
    /// Column visiting order.
    pub order: &'a DropOrder,
    /// Leaf heuristic.
    pub evaluator: &'a dyn Evaluator,
    /// Poll hook and stop request.
    pub control: &'a mut SearchControl,
    /// Nodes visited so far.
    pub nodes: u64,
}

/// How good the current state can turn out for `player`, looking ahead until
/// the stack reaches depth `level`.
///
/// `player` has just moved, so the opponent moves next. The window
/// `(alpha, beta)` bounds the opponent's best reply; scanning stops as soon
/// as a reply beats `beta`. The opponent's best is negated on the way out.
///
/// Returns 0 without searching once the poll hook has asked to stop; callers
/// must discard that value.
pub(crate) fn evaluate(
    player: Player,
    level: usize,
    alpha: i32,
    beta: i32,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    ctx.nodes += 1;

    if ctx.control.poll() {
        return 0;
    }

    let depth = ctx.stack.depth();
    let state = ctx.stack.current();
    let opponent = player.other();

    if state.winner() == Some(player) {
        return WIN_SCORE - depth as i32;
    }
    if state.winner() == Some(opponent) {
        return -(WIN_SCORE - depth as i32);
    }
    if state.is_full() {
        return 0;
    }
    if depth == level {
        return ctx
            .evaluator
            .goodness(state, player)
            .clamp(-HEURISTIC_LIMIT, HEURISTIC_LIMIT);
    }

    let mut best = -WIN_SCORE;
    let mut maxab = alpha;
    let order = ctx.order;

    for column in order.iter() {
        if ctx.stack.current().board().column_is_full(column) {
            continue;
        }

        ctx.stack.push();
        ctx.stack.current_mut().drop_piece(opponent, column, ctx.map);
        let goodness = evaluate(opponent, level, -beta, -maxab, ctx);
        ctx.stack.pop();

        if ctx.control.stopped() {
            return 0;
        }

        if goodness > best {
            best = goodness;
            if best > maxab {
                maxab = best;
            }
        }

        if best > beta {
            break;
        }
    }

    -best
}
