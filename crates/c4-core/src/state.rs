//! One point-in-time snapshot of a game and its only mutator, [`GameState::drop_piece`].
//!
//! Every winning line carries a score per player. It starts at 1, doubles
//! each time the player takes a cell of the line, and drops to 0 for the
//! opponent as soon as the player takes any cell of it. A line score of
//! `2^connect` means the player owns the whole line. The aggregate score of
//! a player is the sum of their line scores and is kept up to date
//! incrementally on every drop.

use crate::board::Board;
use crate::player::Player;
use crate::win_map::{WinLine, WinMap};

/// Board, per-line scores, aggregate scores, winner and piece count.
#[derive(Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    /// Per-line scores, indexed by [`Player::index()`] then line index.
    line_scores: [Vec<u32>; Player::COUNT],
    /// Aggregate scores, indexed by [`Player::index()`].
    scores: [i32; Player::COUNT],
    winner: Option<Player>,
    pieces: usize,
}

impl GameState {
    /// Return the starting state for the board described by `map`.
    pub fn new(map: &WinMap) -> GameState {
        let lines = map.line_count();
        GameState {
            board: Board::empty(map.dims()),
            line_scores: [vec![1; lines], vec![1; lines]],
            scores: [lines as i32; Player::COUNT],
            winner: None,
            pieces: 0,
        }
    }

    /// Board contents.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Per-line scores of `player`.
    #[inline]
    pub fn line_scores(&self, player: Player) -> &[u32] {
        &self.line_scores[player.index()]
    }

    /// Aggregate score of `player`.
    #[inline]
    pub fn score(&self, player: Player) -> i32 {
        self.scores[player.index()]
    }

    /// How much better `player` stands than the opponent.
    #[inline]
    pub fn goodness(&self, player: Player) -> i32 {
        self.scores[player.index()] - self.scores[player.other().index()]
    }

    /// The player who completed a line first, if any.
    #[inline]
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Number of pieces on the board.
    #[inline]
    pub fn pieces(&self) -> usize {
        self.pieces
    }

    /// Return `true` if every cell is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.pieces == self.board.dims().cell_count()
    }

    /// Drop a piece of `player` into `column`.
    ///
    /// Returns the row the piece landed on, or `None` (leaving the state
    /// untouched) if the column is full or off the board.
    pub fn drop_piece(&mut self, player: Player, column: usize, map: &WinMap) -> Option<usize> {
        let row = self.board.landing_row(column)?;
        self.board.place(column, row, player);
        self.pieces += 1;
        self.update_score(player, column, row, map);
        Some(row)
    }

    /// Fold a new piece of `player` at `(x, y)` into the line scores.
    fn update_score(&mut self, player: Player, x: usize, y: usize, map: &WinMap) {
        let win_score = map.dims().win_score();
        let (me, them) = (player.index(), player.other().index());
        let mut this_difference = 0i32;
        let mut other_difference = 0i32;

        for &line in map.lines_through(x, y) {
            let line = line as usize;
            this_difference += self.line_scores[me][line] as i32;
            other_difference += self.line_scores[them][line] as i32;

            self.line_scores[me][line] <<= 1;
            self.line_scores[them][line] = 0;

            if self.line_scores[me][line] == win_score && self.winner.is_none() {
                self.winner = Some(player);
            }
        }

        self.scores[me] += this_difference;
        self.scores[them] -= other_difference;
    }

    /// The completed line of the winner with the lowest index.
    pub fn winning_line(&self, map: &WinMap) -> Option<WinLine> {
        let winner = self.winner?;
        let win_score = map.dims().win_score();
        self.line_scores[winner.index()]
            .iter()
            .position(|&score| score == win_score)
            .map(|index| map.line(index))
    }
}

impl Clone for GameState {
    fn clone(&self) -> GameState {
        GameState {
            board: self.board.clone(),
            line_scores: self.line_scores.clone(),
            scores: self.scores,
            winner: self.winner,
            pieces: self.pieces,
        }
    }

    fn clone_from(&mut self, source: &GameState) {
        self.board.clone_from(&source.board);
        for (dst, src) in self.line_scores.iter_mut().zip(&source.line_scores) {
            dst.clone_from(src);
        }
        self.scores = source.scores;
        self.winner = source.winner;
        self.pieces = source.pieces;
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::dimensions::Dimensions;
    use crate::player::Player;
    use crate::win_map::{WinLine, WinMap};

    fn map(w: usize, h: usize, n: usize) -> WinMap {
        WinMap::build(Dimensions::new(w, h, n).unwrap())
    }

    fn assert_scores_consistent(state: &GameState) {
        for player in Player::ALL {
            let sum: i64 = state.line_scores(player).iter().map(|&s| s as i64).sum();
            assert_eq!(
                state.score(player) as i64,
                sum,
                "aggregate score of {player} drifted from its line scores"
            );
        }
    }

    #[test]
    fn new_state_scores() {
        let m = map(7, 6, 4);
        let state = GameState::new(&m);
        assert_eq!(state.score(Player::Zero), 69);
        assert_eq!(state.score(Player::One), 69);
        assert_eq!(state.goodness(Player::Zero), 0);
        assert_eq!(state.winner(), None);
        assert_eq!(state.pieces(), 0);
    }

    #[test]
    fn drop_updates_line_scores() {
        let m = map(7, 6, 4);
        let mut state = GameState::new(&m);
        assert_eq!(state.drop_piece(Player::Zero, 0, &m), Some(0));
        // three lines through the corner doubled for X, killed for O
        assert_eq!(state.score(Player::Zero), 69 + 3);
        assert_eq!(state.score(Player::One), 69 - 3);
        for &line in m.lines_through(0, 0) {
            assert_eq!(state.line_scores(Player::Zero)[line as usize], 2);
            assert_eq!(state.line_scores(Player::One)[line as usize], 0);
        }
        assert_scores_consistent(&state);
    }

    #[test]
    fn pieces_stack_in_column() {
        let m = map(4, 4, 3);
        let mut state = GameState::new(&m);
        assert_eq!(state.drop_piece(Player::Zero, 2, &m), Some(0));
        assert_eq!(state.drop_piece(Player::One, 2, &m), Some(1));
        assert_eq!(state.board().cell(2, 1), Some(Player::One));
        assert_eq!(state.pieces(), 2);
    }

    #[test]
    fn full_column_is_rejected_without_mutation() {
        let m = map(3, 2, 2);
        let mut state = GameState::new(&m);
        state.drop_piece(Player::Zero, 1, &m);
        state.drop_piece(Player::One, 1, &m);
        let before = state.clone();
        assert_eq!(state.drop_piece(Player::Zero, 1, &m), None);
        assert_eq!(state, before);
        assert_eq!(state.drop_piece(Player::Zero, 7, &m), None);
        assert_eq!(state, before);
    }

    #[test]
    fn horizontal_win_detected() {
        let m = map(4, 4, 3);
        let mut state = GameState::new(&m);
        for column in 0..3 {
            assert_eq!(state.winner(), None);
            state.drop_piece(Player::Zero, column, &m);
        }
        assert_eq!(state.winner(), Some(Player::Zero));
        assert_eq!(
            state.winning_line(&m),
            Some(WinLine { start: (0, 0), end: (2, 0) })
        );
        assert_scores_consistent(&state);
    }

    #[test]
    fn winner_is_never_reassigned() {
        let m = map(4, 4, 2);
        let mut state = GameState::new(&m);
        state.drop_piece(Player::Zero, 0, &m);
        state.drop_piece(Player::Zero, 1, &m);
        assert_eq!(state.winner(), Some(Player::Zero));
        state.drop_piece(Player::One, 3, &m);
        state.drop_piece(Player::One, 3, &m);
        assert_eq!(state.winner(), Some(Player::Zero));
    }

    #[test]
    fn scores_stay_consistent_through_a_game() {
        let m = map(7, 6, 4);
        let mut state = GameState::new(&m);
        let columns = [3, 3, 2, 4, 4, 2, 5, 1, 0, 6, 6, 6, 3, 3, 1, 0];
        for (turn, &column) in columns.iter().enumerate() {
            state.drop_piece(Player::from_parity(turn as i64), column, &m);
            assert_scores_consistent(&state);
        }
    }

    #[test]
    fn tie_on_board_without_lines() {
        let m = map(2, 2, 3);
        let mut state = GameState::new(&m);
        for column in [0, 0, 1, 1] {
            let player = Player::from_parity(state.pieces() as i64);
            state.drop_piece(player, column, &m);
        }
        assert!(state.is_full());
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn clone_from_reuses_and_matches() {
        let m = map(5, 4, 3);
        let mut source = GameState::new(&m);
        source.drop_piece(Player::One, 2, &m);
        let mut target = GameState::new(&m);
        target.clone_from(&source);
        assert_eq!(target, source);
    }
}
