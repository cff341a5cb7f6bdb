//! The two sides of a game.

use std::fmt;
use std::ops::Not;

/// One of the two players.
///
/// Callers may number their players however they like: any integer maps to a
/// player through its low bit (even = [`Player::Zero`], odd = [`Player::One`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Player {
    Zero = 0,
    One = 1,
}

impl Player {
    /// Total number of players.
    pub const COUNT: usize = 2;

    /// All players in index order.
    pub const ALL: [Player; 2] = [Player::Zero, Player::One];

    /// Map an arbitrary player number onto a player by parity.
    #[inline]
    pub const fn from_parity(n: i64) -> Player {
        if n & 1 == 0 { Player::Zero } else { Player::One }
    }

    /// Return the index (0 or 1).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Return the opponent.
    #[inline]
    pub const fn other(self) -> Player {
        match self {
            Player::Zero => Player::One,
            Player::One => Player::Zero,
        }
    }

    /// Board symbol used when printing.
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            Player::Zero => 'X',
            Player::One => 'O',
        }
    }
}

impl Not for Player {
    type Output = Player;

    #[inline]
    fn not(self) -> Player {
        self.other()
    }
}

impl From<i32> for Player {
    fn from(n: i32) -> Player {
        Player::from_parity(n as i64)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
