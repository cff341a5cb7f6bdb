//! Text console for playing Connect-N against the engine.

pub mod command;
pub mod engine;
pub mod error;

pub use command::{Command, ConsoleOption, NewGameParams, parse_command};
pub use engine::{ConsoleEngine, EngineConfig, Tally};
pub use error::ConsoleError;
