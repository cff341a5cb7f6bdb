//! The game context: one game, its search machinery and its random source.

use std::fmt;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use c4_core::{Board, Dimensions, DropOrder, GameError, GameState, Player, StateStack, WinLine, WinMap};

use crate::book::book_move;
use crate::eval::{Evaluator, ScoreDifference};
use crate::search::control::{PollAction, SearchControl};
use crate::search::negamax::SearchContext;
use crate::search::{MAX_LEVEL, MoveSource, SearchOutcome, choose_column};

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 95;

/// Settings for the search that outlive a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Seed for the tie-breaking random number generator.
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { seed: DEFAULT_SEED }
    }
}

/// Everything that lives exactly as long as one game.
#[derive(Debug)]
struct ActiveGame {
    map: WinMap,
    order: DropOrder,
    stack: StateStack,
}

/// A Connect-N game and the engine that plays it.
///
/// Contexts are independent: several games can run side by side. Every
/// mutating call takes `&mut self`, so the game cannot change while the
/// engine is searching it.
pub struct GameContext {
    game: Option<ActiveGame>,
    control: SearchControl,
    evaluator: Box<dyn Evaluator>,
    rng: StdRng,
}

impl GameContext {
    /// Context with the default seed and evaluator and no game started.
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    /// Context using `config`.
    pub fn with_config(config: SearchConfig) -> Self {
        Self::with_evaluator(config, Box::new(ScoreDifference))
    }

    /// Context scoring search leaves with `evaluator`.
    pub fn with_evaluator(config: SearchConfig, evaluator: Box<dyn Evaluator>) -> Self {
        Self {
            game: None,
            control: SearchControl::new(),
            evaluator,
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    /// Call `hook` every `interval` of wall-clock time while the engine
    /// searches. Replaces any earlier hook.
    pub fn set_poll<F>(&mut self, hook: F, interval: Duration)
    where
        F: FnMut() -> PollAction + Send + 'static,
    {
        self.control.set_hook(Box::new(hook), interval);
    }

    /// Remove the poll hook.
    pub fn clear_poll(&mut self) {
        self.control.clear_hook();
    }

    /// Restart the random number generator from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Start a game on a `width` x `height` board where `connect` pieces in a
    /// row win.
    pub fn new_game(&mut self, width: usize, height: usize, connect: usize) -> Result<(), GameError> {
        if self.game.is_some() {
            return Err(GameError::GameInProgress);
        }
        let dims = Dimensions::new(width, height, connect)?;
        let map = WinMap::build(dims);
        let root = GameState::new(&map);
        info!(%dims, lines = map.line_count(), "new game");
        self.game = Some(ActiveGame {
            order: DropOrder::new(width),
            stack: StateStack::new(root, MAX_LEVEL),
            map,
        });
        Ok(())
    }

    /// Return `true` while a game is running.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.game.is_some()
    }

    /// Drop a piece for `player` into `column`.
    ///
    /// Returns the row the piece landed on, or `None` when the column is
    /// full or off the board.
    pub fn make_move(&mut self, player: impl Into<Player>, column: usize) -> Result<Option<usize>, GameError> {
        let game = self.game.as_mut().ok_or(GameError::NoActiveGame)?;
        let player = player.into();
        let row = game.stack.current_mut().drop_piece(player, column, &game.map);
        debug!(%player, column, ?row, "move");
        Ok(row)
    }

    /// Let the engine choose and play a move for `player`, searching `level`
    /// plies ahead.
    ///
    /// Returns `None` when the board is full.
    ///
    /// # Panics
    ///
    /// Panics if the chosen column is full. The book and the root search only
    /// return columns that still have room.
    pub fn auto_move(&mut self, player: impl Into<Player>, level: usize) -> Result<Option<SearchOutcome>, GameError> {
        if !(1..=MAX_LEVEL).contains(&level) {
            return Err(GameError::LevelOutOfRange { level, max: MAX_LEVEL });
        }
        let game = self.game.as_mut().ok_or(GameError::NoActiveGame)?;
        let player = player.into();

        let (column, score, source, nodes) = match book_move(game.stack.root(), game.map.dims()) {
            Some(column) => (column, None, MoveSource::Book, 0),
            None => {
                let mut ctx = SearchContext {
                    stack: &mut game.stack,
                    map: &game.map,
                    order: &game.order,
                    evaluator: self.evaluator.as_ref(),
                    control: &mut self.control,
                    nodes: 0,
                };
                let Some(choice) = choose_column(player, level, &mut ctx, &mut self.rng) else {
                    debug!(%player, "no legal move");
                    return Ok(None);
                };
                (choice.column, choice.score, choice.source, ctx.nodes)
            }
        };

        let row = game
            .stack
            .current_mut()
            .drop_piece(player, column, &game.map)
            .expect("chosen column has room");
        debug!(%player, column, row, ?score, ?source, nodes, "engine move");

        Ok(Some(SearchOutcome {
            column,
            row,
            score,
            source,
            nodes,
        }))
    }

    /// The board of the running game.
    pub fn board(&self) -> Result<&Board, GameError> {
        self.state().map(GameState::board)
    }

    /// The full state of the running game.
    pub fn state(&self) -> Result<&GameState, GameError> {
        Ok(self.active()?.stack.root())
    }

    /// Aggregate line score of `player`.
    pub fn score_of_player(&self, player: impl Into<Player>) -> Result<i32, GameError> {
        Ok(self.state()?.score(player.into()))
    }

    /// Return `true` if `player` has completed a line.
    pub fn is_winner(&self, player: impl Into<Player>) -> Result<bool, GameError> {
        Ok(self.state()?.winner() == Some(player.into()))
    }

    /// Return `true` if the board is full and nobody has won.
    pub fn is_tie(&self) -> Result<bool, GameError> {
        let state = self.state()?;
        Ok(state.is_full() && state.winner().is_none())
    }

    /// The player who completed a line first, if any.
    pub fn winner(&self) -> Result<Option<Player>, GameError> {
        Ok(self.state()?.winner())
    }

    /// Endpoints of the winning line.
    pub fn win_coords(&self) -> Result<WinLine, GameError> {
        let game = self.active()?;
        game.stack.root().winning_line(&game.map).ok_or(GameError::NoWinner)
    }

    /// Dimensions of the running game.
    pub fn dimensions(&self) -> Result<Dimensions, GameError> {
        Ok(self.active()?.map.dims())
    }

    /// Number of search states allocated so far in this game.
    pub fn allocated_states(&self) -> Result<usize, GameError> {
        Ok(self.active()?.stack.allocated())
    }

    /// Finish the running game and release its memory.
    pub fn end_game(&mut self) -> Result<(), GameError> {
        let game = self.game.take().ok_or(GameError::NoActiveGame)?;
        let state = game.stack.root();
        info!(winner = ?state.winner(), pieces = state.pieces(), "game over");
        Ok(())
    }

    /// End the running game, if any, and remove the poll hook.
    pub fn reset(&mut self) {
        if self.game.is_some() {
            let _ = self.end_game();
        }
        self.clear_poll();
    }

    fn active(&self) -> Result<&ActiveGame, GameError> {
        self.game.as_ref().ok_or(GameError::NoActiveGame)
    }
}

impl Default for GameContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GameContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameContext")
            .field("game", &self.game)
            .field("control", &self.control)
            .finish_non_exhaustive()
    }
}
