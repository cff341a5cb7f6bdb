//! Errors for API calls made out of sequence or with bad arguments.

/// Contract violations reported by the game API.
///
/// A full column is not an error; moves report it by returning `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Width, height or connect length is zero or above the supported maximum.
    #[error("invalid board dimensions: {width}x{height}, connect {connect}")]
    InvalidDimensions {
        /// Requested number of columns.
        width: usize,
        /// Requested number of rows.
        height: usize,
        /// Requested number of pieces in a row needed to win.
        connect: usize,
    },
    /// The operation needs a game, but none was started.
    #[error("no game in progress")]
    NoActiveGame,
    /// `new_game` was called while a game is still running.
    #[error("a game is already in progress")]
    GameInProgress,
    /// The requested search depth is outside `1..=max`.
    #[error("search level {level} out of range 1..={max}")]
    LevelOutOfRange {
        /// The rejected level.
        level: usize,
        /// Largest supported level.
        max: usize,
    },
    /// Win coordinates were requested but nobody has won.
    #[error("no player has completed a line")]
    NoWinner,
}
