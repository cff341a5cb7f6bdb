//! Core Connect-N types: board, winning lines, incremental scoring and the search state stack.

mod board;
mod dimensions;
mod drop_order;
mod error;
mod player;
mod stack;
mod state;
mod win_map;

pub use board::{Board, Cell, PrettyBoard};
pub use dimensions::Dimensions;
pub use drop_order::DropOrder;
pub use error::GameError;
pub use player::Player;
pub use stack::StateStack;
pub use state::GameState;
pub use win_map::{WinLine, WinMap, win_line_count};
