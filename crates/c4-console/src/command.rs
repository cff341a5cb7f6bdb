//! Console command parsing.

use std::str::FromStr;

use crate::error::ConsoleError;

/// Board size given to `new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewGameParams {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Pieces in a row needed to win.
    pub connect: usize,
}

/// An option settable with `setoption`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleOption {
    /// Search depth of the computer player.
    Level(usize),
    /// Seed for the computer's tie-breaking.
    Seed(u64),
    /// Default board width for `new`.
    Width(usize),
    /// Default board height for `new`.
    Height(usize),
    /// Default connect length for `new`.
    Connect(usize),
    /// Thinking time limit per computer move in milliseconds; 0 means none.
    MoveTime(u64),
}

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a game, with the configured board size if none is given.
    New(Option<NewGameParams>),
    /// Drop the human's piece into a column, stored zero-based.
    Play(usize),
    /// Let the computer move now.
    Go,
    /// Print the board.
    Board,
    /// Print the line scores and the session tally.
    Score,
    /// Change a setting.
    SetOption(ConsoleOption),
    /// List the commands.
    Help,
    /// Leave the console.
    Quit,
    /// Unrecognized command.
    Unknown(String),
}

/// Parse a single line of console input into a [`Command`].
///
/// Keywords and option names are case-insensitive.
pub fn parse_command(line: &str) -> Result<Command, ConsoleError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(first) = tokens.first() else {
        return Ok(Command::Unknown(String::new()));
    };

    match first.to_ascii_lowercase().as_str() {
        "new" => parse_new(&tokens[1..]),
        "play" => parse_play(&tokens[1..]),
        "go" => Ok(Command::Go),
        "board" | "d" => Ok(Command::Board),
        "score" => Ok(Command::Score),
        "setoption" => parse_setoption(&tokens[1..]),
        "help" => Ok(Command::Help),
        "quit" => Ok(Command::Quit),
        _ => Ok(Command::Unknown(first.to_string())),
    }
}

/// Parse the `new` command arguments.
fn parse_new(tokens: &[&str]) -> Result<Command, ConsoleError> {
    match tokens {
        [] => Ok(Command::New(None)),
        [width, height, connect] => Ok(Command::New(Some(NewGameParams {
            width: parse_value(width, "width")?,
            height: parse_value(height, "height")?,
            connect: parse_value(connect, "connect")?,
        }))),
        _ => Err(ConsoleError::MalformedNew),
    }
}

/// Parse the `play` command argument: a column number starting at 1.
fn parse_play(tokens: &[&str]) -> Result<Command, ConsoleError> {
    let value = tokens.first().ok_or_else(|| ConsoleError::MissingValue {
        param: "column".to_string(),
    })?;
    let column: usize = parse_value(value, "column")?;
    if column == 0 {
        return Err(ConsoleError::InvalidValue {
            param: "column".to_string(),
            value: value.to_string(),
        });
    }
    Ok(Command::Play(column - 1))
}

/// Parse the `setoption` command arguments.
///
/// Format: `setoption name <option> value <v>`.
fn parse_setoption(tokens: &[&str]) -> Result<Command, ConsoleError> {
    let [keyword, name, rest @ ..] = tokens else {
        return Err(ConsoleError::MalformedSetOption);
    };
    if !keyword.eq_ignore_ascii_case("name") {
        return Err(ConsoleError::MalformedSetOption);
    }
    let value = match rest {
        [keyword, value] if keyword.eq_ignore_ascii_case("value") => *value,
        [keyword] if keyword.eq_ignore_ascii_case("value") => {
            return Err(ConsoleError::MissingValue {
                param: name.to_string(),
            });
        }
        _ => return Err(ConsoleError::MalformedSetOption),
    };

    let option = match name.to_ascii_lowercase().as_str() {
        "level" => ConsoleOption::Level(parse_value(value, name)?),
        "seed" => ConsoleOption::Seed(parse_value(value, name)?),
        "width" => ConsoleOption::Width(parse_value(value, name)?),
        "height" => ConsoleOption::Height(parse_value(value, name)?),
        "connect" => ConsoleOption::Connect(parse_value(value, name)?),
        "movetime" => ConsoleOption::MoveTime(parse_value(value, name)?),
        _ => {
            return Err(ConsoleError::UnknownOption {
                name: name.to_string(),
            });
        }
    };
    Ok(Command::SetOption(option))
}

/// Parse a numeric token.
fn parse_value<T: FromStr>(value: &str, param: &str) -> Result<T, ConsoleError> {
    value.parse().map_err(|_| ConsoleError::InvalidValue {
        param: param.to_string(),
        value: value.to_string(),
    })
}
