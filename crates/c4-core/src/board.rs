//! The grid of cells, filled column by column from the bottom.

use std::fmt;

use crate::dimensions::Dimensions;
use crate::player::Player;
use crate::win_map::WinLine;

/// Contents of a single cell: empty, or a piece of one player.
pub type Cell = Option<Player>;

/// Board contents. Row 0 is the bottom row.
#[derive(PartialEq, Eq)]
pub struct Board {
    dims: Dimensions,
    /// Flat cell storage indexed by [`Dimensions::index`].
    cells: Vec<Cell>,
}

impl Board {
    /// Return an empty board.
    pub fn empty(dims: Dimensions) -> Board {
        Board {
            dims,
            cells: vec![None; dims.cell_count()],
        }
    }

    /// Board dimensions.
    #[inline]
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.dims.width()
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.dims.height()
    }

    /// Return the piece at column `x`, row `y`, if any.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is off the board.
    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        assert!(x < self.width() && y < self.height(), "cell ({x}, {y}) off the board");
        self.cells[self.dims.index(x, y)]
    }

    /// Return `true` if the top cell of `column` is occupied.
    ///
    /// Out-of-range columns count as full.
    #[inline]
    pub fn column_is_full(&self, column: usize) -> bool {
        column >= self.width() || self.cells[self.dims.index(column, self.height() - 1)].is_some()
    }

    /// Row a piece dropped into `column` would land on, or `None` if it is full.
    pub fn landing_row(&self, column: usize) -> Option<usize> {
        if column >= self.width() {
            return None;
        }
        (0..self.height()).find(|&y| self.cells[self.dims.index(column, y)].is_none())
    }

    /// Put `player`'s piece at `(x, y)`.
    #[inline]
    pub(crate) fn place(&mut self, x: usize, y: usize, player: Player) {
        let index = self.dims.index(x, y);
        debug_assert!(self.cells[index].is_none(), "cell ({x}, {y}) already occupied");
        self.cells[index] = Some(player);
    }

    /// Return a pretty-printable wrapper for this board.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard {
            board: self,
            highlight: None,
        }
    }

    /// Like [`pretty`](Self::pretty), but marks the cells of `line` with `*`.
    pub fn pretty_with_line(&self, line: WinLine) -> PrettyBoard<'_> {
        PrettyBoard {
            board: self,
            highlight: Some(line),
        }
    }
}

impl Clone for Board {
    fn clone(&self) -> Board {
        Board {
            dims: self.dims,
            cells: self.cells.clone(),
        }
    }

    // Reuses the existing cell buffer.
    fn clone_from(&mut self, source: &Board) {
        self.dims = source.dims;
        self.cells.clone_from(&source.cells);
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})\n{}", self.dims, self.pretty())
    }
}

/// Wrapper for printing a board as a grid, top row first.
pub struct PrettyBoard<'a> {
    board: &'a Board,
    highlight: Option<WinLine>,
}

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.board;
        let width = board.width();
        for y in (0..board.height()).rev() {
            for x in 0..width {
                let marked = self.highlight.is_some_and(|line| line.contains(x, y));
                let c = match board.cell(x, y) {
                    Some(_) if marked => '*',
                    Some(player) => player.symbol(),
                    None => '.',
                };
                if x + 1 < width {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        let labels: Vec<String> = (1..=width).map(|col| (col % 10).to_string()).collect();
        write!(f, "{}", labels.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::dimensions::Dimensions;
    use crate::player::Player;
    use crate::win_map::WinLine;

    fn small() -> Board {
        Board::empty(Dimensions::new(4, 3, 3).unwrap())
    }

    #[test]
    fn empty_board_has_no_pieces() {
        let board = small();
        for x in 0..4 {
            for y in 0..3 {
                assert_eq!(board.cell(x, y), None);
            }
            assert!(!board.column_is_full(x));
            assert_eq!(board.landing_row(x), Some(0));
        }
    }

    #[test]
    fn landing_row_follows_gravity() {
        let mut board = small();
        board.place(1, 0, Player::Zero);
        board.place(1, 1, Player::One);
        assert_eq!(board.landing_row(1), Some(2));
        board.place(1, 2, Player::Zero);
        assert_eq!(board.landing_row(1), None);
        assert!(board.column_is_full(1));
    }

    #[test]
    fn out_of_range_column_is_full() {
        let board = small();
        assert!(board.column_is_full(4));
        assert_eq!(board.landing_row(9), None);
    }

    #[test]
    #[should_panic(expected = "off the board")]
    fn cell_off_board_panics() {
        small().cell(4, 0);
    }

    #[test]
    fn clone_from_copies_contents() {
        let mut source = small();
        source.place(2, 0, Player::One);
        let mut target = small();
        target.clone_from(&source);
        assert_eq!(target, source);
        assert_eq!(target.cell(2, 0), Some(Player::One));
    }

    #[test]
    fn pretty_print() {
        let mut board = small();
        board.place(0, 0, Player::Zero);
        board.place(1, 0, Player::One);
        let output = format!("{}", board.pretty());
        assert_eq!(output, ". . . .\n. . . .\nX O . .\n1 2 3 4");
    }

    #[test]
    fn pretty_print_marks_line() {
        let mut board = small();
        for x in 0..3 {
            board.place(x, 0, Player::Zero);
        }
        let line = WinLine { start: (0, 0), end: (2, 0) };
        let output = format!("{}", board.pretty_with_line(line));
        assert!(output.contains("* * * ."), "unexpected output:\n{output}");
    }
}
