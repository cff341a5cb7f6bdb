//! Search and evaluation for Connect-N.

pub mod eval;
pub mod game;
pub mod search;
pub(crate) mod book;

pub use eval::{Evaluator, ScoreDifference};
pub use game::{DEFAULT_SEED, GameContext, SearchConfig};
pub use search::control::{PollAction, PollHook, SearchControl};
pub use search::negamax::{HEURISTIC_LIMIT, WIN_SCORE};
pub use search::{MAX_LEVEL, MoveSource, SearchOutcome};
