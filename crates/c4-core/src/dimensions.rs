//! Board geometry and the connect length.

use std::fmt;

use crate::error::GameError;

/// Validated board size plus the number of pieces in a row needed to win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: usize,
    height: usize,
    connect: usize,
}

impl Dimensions {
    /// Largest supported width or height.
    pub const MAX_SIDE: usize = 64;

    /// Largest supported connect length.
    ///
    /// With 64x64 boards this keeps every aggregate score inside `i32`.
    pub const MAX_CONNECT: usize = 16;

    /// The classic 7 columns, 6 rows, connect 4.
    pub const STANDARD: Dimensions = Dimensions {
        width: 7,
        height: 6,
        connect: 4,
    };

    /// Validate and build a set of dimensions.
    pub fn new(width: usize, height: usize, connect: usize) -> Result<Dimensions, GameError> {
        let side_ok = |n: usize| (1..=Self::MAX_SIDE).contains(&n);
        if !side_ok(width) || !side_ok(height) || !(1..=Self::MAX_CONNECT).contains(&connect) {
            return Err(GameError::InvalidDimensions {
                width,
                height,
                connect,
            });
        }
        Ok(Dimensions {
            width,
            height,
            connect,
        })
    }

    /// Number of columns.
    #[inline]
    pub const fn width(self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub const fn height(self) -> usize {
        self.height
    }

    /// Pieces in a row needed to win.
    #[inline]
    pub const fn connect(self) -> usize {
        self.connect
    }

    /// Total number of cells.
    #[inline]
    pub const fn cell_count(self) -> usize {
        self.width * self.height
    }

    /// Line score a player reaches once they own every cell of a line.
    #[inline]
    pub const fn win_score(self) -> u32 {
        1 << self.connect
    }

    /// Return `true` for the classic 7x6 connect-4 setup.
    #[inline]
    pub fn is_standard(self) -> bool {
        self == Self::STANDARD
    }

    /// Flat cell index for column `x`, row `y` (row 0 is the bottom).
    #[inline]
    pub const fn index(self, x: usize, y: usize) -> usize {
        x + y * self.width
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} connect {}", self.width, self.height, self.connect)
    }
}
