//! Opening book for the standard 7x6 connect-4 board.

use c4_core::{Dimensions, GameState};

/// The center column of the standard board.
const CENTER: usize = 3;

/// Return the book move for `state`, if there is one.
///
/// The center is the known best first move on the standard board. The book
/// plays it as the first move of the game, and as the reply when the opening
/// move went to the center too.
pub(crate) fn book_move(state: &GameState, dims: Dimensions) -> Option<usize> {
    if !dims.is_standard() {
        return None;
    }
    let opening = state.pieces() == 0
        || (state.pieces() == 1 && state.board().cell(CENTER, 0).is_some());
    opening.then_some(CENTER)
}

#[cfg(test)]
mod tests {
    use c4_core::{Dimensions, GameState, Player, WinMap};

    use super::book_move;

    fn standard() -> (WinMap, GameState) {
        let map = WinMap::build(Dimensions::STANDARD);
        let state = GameState::new(&map);
        (map, state)
    }

    #[test]
    fn empty_standard_board_plays_center() {
        let (map, state) = standard();
        assert_eq!(book_move(&state, map.dims()), Some(3));
    }

    #[test]
    fn answers_center_with_center() {
        let (map, mut state) = standard();
        state.drop_piece(Player::Zero, 3, &map);
        assert_eq!(book_move(&state, map.dims()), Some(3));
    }

    #[test]
    fn no_book_reply_to_side_opening() {
        let (map, mut state) = standard();
        state.drop_piece(Player::Zero, 0, &map);
        assert_eq!(book_move(&state, map.dims()), None);
    }

    #[test]
    fn book_ends_after_two_pieces() {
        let (map, mut state) = standard();
        state.drop_piece(Player::Zero, 3, &map);
        state.drop_piece(Player::One, 3, &map);
        assert_eq!(book_move(&state, map.dims()), None);
    }

    #[test]
    fn other_boards_have_no_book() {
        let map = WinMap::build(Dimensions::new(7, 6, 5).unwrap());
        let state = GameState::new(&map);
        assert_eq!(book_move(&state, map.dims()), None);
        let map = WinMap::build(Dimensions::new(8, 6, 4).unwrap());
        let state = GameState::new(&map);
        assert_eq!(book_move(&state, map.dims()), None);
    }

    #[test]
    fn narrow_board_with_one_piece_has_no_book() {
        for width in 1..=3 {
            let map = WinMap::build(Dimensions::new(width, 3, 3).unwrap());
            let mut state = GameState::new(&map);
            state.drop_piece(Player::Zero, 0, &map);
            assert_eq!(book_move(&state, map.dims()), None, "width {width}");
        }
    }
}
