//! Move selection: root search with random tie-breaking.

pub mod control;
pub mod negamax;

use rand::Rng;
use rand::rngs::StdRng;

use c4_core::Player;

use negamax::{SearchContext, WIN_SCORE, evaluate};

/// Deepest supported search level.
pub const MAX_LEVEL: usize = 20;

/// How the engine arrived at its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    /// Played from the opening book without searching.
    Book,
    /// The move wins on the spot; the remaining columns were not searched.
    ImmediateWin,
    /// Best result of a completed search.
    Search,
    /// The poll hook stopped the search; best of the columns finished so far.
    Interrupted,
}

/// Result of an engine move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Column the piece was dropped into.
    pub column: usize,
    /// Row the piece landed on.
    pub row: usize,
    /// Search score of the chosen column from the mover's point of view.
    /// `None` for book moves, immediate wins and interrupted searches that
    /// finished no column.
    pub score: Option<i32>,
    /// How the move was chosen.
    pub source: MoveSource,
    /// Search nodes visited.
    pub nodes: u64,
}

/// Column picked by [`choose_column`], before it is played on the live board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RootChoice {
    pub column: usize,
    pub score: Option<i32>,
    pub source: MoveSource,
}

/// Try every column for `player` and pick the one with the best worst case.
///
/// Columns are scanned in drop order. A move that wins at once is taken
/// immediately. Among columns with equal scores the choice is uniform: the
/// k-th tie replaces the current pick with probability `1/k`.
///
/// Returns `None` when every column is full.
pub(crate) fn choose_column(
    player: Player,
    level: usize,
    ctx: &mut SearchContext<'_>,
    rng: &mut StdRng,
) -> Option<RootChoice> {
    ctx.control.begin();

    let mut best_column = None;
    let mut best_worst = -WIN_SCORE;
    let mut num_of_equal = 0u32;
    let mut first_legal = None;
    let order = ctx.order;

    for column in order.iter() {
        ctx.stack.push();
        if ctx.stack.current_mut().drop_piece(player, column, ctx.map).is_none() {
            ctx.stack.pop();
            continue;
        }
        first_legal.get_or_insert(column);

        if ctx.stack.current().winner() == Some(player) {
            ctx.stack.pop();
            return Some(RootChoice {
                column,
                score: None,
                source: MoveSource::ImmediateWin,
            });
        }

        ctx.control.arm();
        let goodness = evaluate(player, level, -WIN_SCORE, -best_worst, ctx);
        ctx.stack.pop();

        if ctx.control.stopped() {
            let column = best_column.or(first_legal)?;
            return Some(RootChoice {
                column,
                score: best_column.map(|_| best_worst),
                source: MoveSource::Interrupted,
            });
        }

        if goodness > best_worst {
            best_worst = goodness;
            best_column = Some(column);
            num_of_equal = 1;
        } else if goodness == best_worst {
            num_of_equal += 1;
            if rng.random_range(0..num_of_equal) == 0 {
                best_column = Some(column);
            }
        }
    }

    best_column.map(|column| RootChoice {
        column,
        score: Some(best_worst),
        source: MoveSource::Search,
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use c4_core::{Dimensions, DropOrder, GameState, Player, StateStack, WinMap};

    use super::{MAX_LEVEL, MoveSource, RootChoice, choose_column};
    use crate::eval::{Evaluator, ScoreDifference};
    use crate::search::control::SearchControl;
    use crate::search::negamax::SearchContext;

    /// Evaluator that rates every position the same.
    struct Flat;

    impl Evaluator for Flat {
        fn goodness(&self, _: &GameState, _: Player) -> i32 {
            0
        }
    }

    fn choose(
        map: &WinMap,
        state: GameState,
        player: Player,
        level: usize,
        evaluator: &dyn Evaluator,
        seed: u64,
    ) -> Option<RootChoice> {
        let order = DropOrder::new(map.dims().width());
        let mut stack = StateStack::new(state, MAX_LEVEL);
        let mut control = SearchControl::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ctx = SearchContext {
            stack: &mut stack,
            map,
            order: &order,
            evaluator,
            control: &mut control,
            nodes: 0,
        };
        let choice = choose_column(player, level, &mut ctx, &mut rng);
        assert_eq!(stack.depth(), 0, "root search must leave the stack at depth 0");
        choice
    }

    fn position(map: &WinMap, columns: &[usize]) -> GameState {
        let mut state = GameState::new(map);
        for (turn, &column) in columns.iter().enumerate() {
            state.drop_piece(Player::from_parity(turn as i64), column, map);
        }
        state
    }

    #[test]
    fn takes_immediate_win() {
        let map = WinMap::build(Dimensions::STANDARD);
        // X on 0, 1, 2 of the bottom row; O stacked on top
        let state = position(&map, &[0, 0, 1, 1, 2, 2]);
        let choice = choose(&map, state, Player::Zero, 4, &ScoreDifference, 1).unwrap();
        assert_eq!(choice.column, 3);
        assert_eq!(choice.source, MoveSource::ImmediateWin);
    }

    #[test]
    fn blocks_opponent_win() {
        let map = WinMap::build(Dimensions::STANDARD);
        // X on 0, 1, 2 of the bottom row, O to move
        let state = position(&map, &[0, 6, 1, 6, 2]);
        let choice = choose(&map, state, Player::One, 2, &ScoreDifference, 1).unwrap();
        assert_eq!(choice.column, 3);
        assert_eq!(choice.source, MoveSource::Search);
    }

    #[test]
    fn full_board_has_no_choice() {
        let map = WinMap::build(Dimensions::new(2, 1, 2).unwrap());
        let mut state = GameState::new(&map);
        state.drop_piece(Player::Zero, 0, &map);
        state.drop_piece(Player::One, 1, &map);
        assert_eq!(choose(&map, state, Player::Zero, 1, &ScoreDifference, 1), None);
    }

    #[test]
    fn skips_full_columns() {
        let map = WinMap::build(Dimensions::new(3, 1, 3).unwrap());
        let state = position(&map, &[1, 0]);
        let choice = choose(&map, state, Player::Zero, 1, &ScoreDifference, 1).unwrap();
        assert_eq!(choice.column, 2);
    }

    #[test]
    fn ties_are_broken_at_random() {
        let map = WinMap::build(Dimensions::new(7, 6, 4).unwrap());
        let mut seen = [false; 7];
        for seed in 0..64 {
            let state = GameState::new(&map);
            let choice = choose(&map, state, Player::Zero, 1, &Flat, seed).unwrap();
            assert_eq!(choice.score, Some(0));
            seen[choice.column] = true;
        }
        let distinct = seen.iter().filter(|&&s| s).count();
        assert!(distinct > 1, "every seed picked the same column");
    }

    /// Evaluator that rates every position as lost.
    struct Hopeless;

    impl Evaluator for Hopeless {
        fn goodness(&self, _: &GameState, _: Player) -> i32 {
            i32::MIN
        }
    }

    #[test]
    fn out_of_range_evaluator_still_picks_a_column() {
        let map = WinMap::build(Dimensions::new(5, 4, 3).unwrap());
        let choice = choose(&map, GameState::new(&map), Player::Zero, 1, &Hopeless, 1).unwrap();
        assert_eq!(choice.source, MoveSource::Search);
        assert!(choice.column < 5);
    }

    #[test]
    fn same_seed_same_choice() {
        let map = WinMap::build(Dimensions::new(7, 6, 4).unwrap());
        let a = choose(&map, GameState::new(&map), Player::Zero, 1, &Flat, 7);
        let b = choose(&map, GameState::new(&map), Player::Zero, 1, &Flat, 7);
        assert_eq!(a, b);
    }
}
