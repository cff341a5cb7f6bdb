//! Line-oriented console session: a human against the computer.

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use c4_core::Player;
use c4_engine::{DEFAULT_SEED, GameContext, MAX_LEVEL, MoveSource, PollAction, SearchConfig};

use crate::command::{Command, ConsoleOption, NewGameParams, parse_command};
use crate::error::ConsoleError;

/// The human plays the first colour.
const HUMAN: Player = Player::Zero;
/// The computer plays the second colour.
const COMPUTER: Player = Player::One;

/// Configuration knobs adjustable via `setoption`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Board width used by a bare `new`.
    pub width: usize,
    /// Board height used by a bare `new`.
    pub height: usize,
    /// Connect length used by a bare `new`.
    pub connect: usize,
    /// Search depth of the computer player.
    pub level: usize,
    /// Seed for the computer's tie-breaking.
    pub seed: u64,
    /// How often the search checks the clock.
    pub poll_interval: Duration,
    /// Thinking time limit per computer move.
    pub move_time: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 7,
            height: 6,
            connect: 4,
            level: 7,
            seed: DEFAULT_SEED,
            poll_interval: Duration::from_millis(100),
            move_time: None,
        }
    }
}

/// Games won by each side and drawn during one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Games the human won.
    pub human: u32,
    /// Games the computer won.
    pub computer: u32,
    /// Drawn games.
    pub draws: u32,
}

/// The console engine, holding the game context and the session tally.
pub struct ConsoleEngine {
    ctx: GameContext,
    config: EngineConfig,
    tally: Tally,
}

impl ConsoleEngine {
    /// Create a console with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create a console with `config`.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            ctx: GameContext::with_config(SearchConfig { seed: config.seed }),
            config,
            tally: Tally::default(),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Results so far.
    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Run the session on stdin and stdout until `quit` or input closes.
    pub fn run(mut self) -> Result<(), ConsoleError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), &mut stdout.lock())
    }

    /// Run the session on arbitrary input and output.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<(), ConsoleError> {
        writeln!(out, "Connect-{} against the computer. Type 'help' for commands.", self.config.connect)?;
        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!(cmd = %trimmed, "received console command");
            match parse_command(trimmed) {
                Ok(Command::Quit) => break,
                Ok(cmd) => self.dispatch(cmd, out)?,
                Err(e) => {
                    warn!(error = %e, "console parse error");
                    writeln!(out, "error: {e}")?;
                }
            }
            out.flush()?;
        }

        self.ctx.reset();
        info!(
            human = self.tally.human,
            computer = self.tally.computer,
            draws = self.tally.draws,
            "console shutting down"
        );
        Ok(())
    }

    fn dispatch<W: Write>(&mut self, cmd: Command, out: &mut W) -> io::Result<()> {
        match cmd {
            Command::New(params) => self.handle_new(params, out),
            Command::Play(column) => self.handle_play(column, out),
            Command::Go => self.handle_go(out),
            Command::Board => self.handle_board(out),
            Command::Score => self.handle_score(out),
            Command::SetOption(option) => self.handle_setoption(option, out),
            Command::Help => handle_help(out),
            Command::Quit => Ok(()),
            Command::Unknown(name) => writeln!(out, "unknown command: {name}"),
        }
    }

    fn handle_new<W: Write>(&mut self, params: Option<NewGameParams>, out: &mut W) -> io::Result<()> {
        let params = params.unwrap_or(NewGameParams {
            width: self.config.width,
            height: self.config.height,
            connect: self.config.connect,
        });
        if self.ctx.is_active() {
            info!("abandoning unfinished game");
            let _ = self.ctx.end_game();
        }
        match self.ctx.new_game(params.width, params.height, params.connect) {
            Ok(()) => {
                writeln!(out, "new game: {}x{} connect {}", params.width, params.height, params.connect)?;
                writeln!(out, "you are {HUMAN}, the computer is {COMPUTER}")?;
                self.handle_board(out)
            }
            Err(e) => writeln!(out, "error: {e}"),
        }
    }

    fn handle_play<W: Write>(&mut self, column: usize, out: &mut W) -> io::Result<()> {
        match self.ctx.make_move(HUMAN, column) {
            Ok(Some(_)) => {}
            Ok(None) => return writeln!(out, "column {} is not playable", column + 1),
            Err(e) => return writeln!(out, "error: {e}"),
        }
        if self.finish_if_over(out)? {
            return Ok(());
        }
        self.computer_move(out)
    }

    fn handle_go<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if !self.ctx.is_active() {
            return writeln!(out, "error: no game in progress");
        }
        self.computer_move(out)
    }

    fn computer_move<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        match self.config.move_time.and_then(|limit| Instant::now().checked_add(limit)) {
            Some(deadline) => {
                self.ctx.set_poll(
                    move || {
                        if Instant::now() >= deadline {
                            PollAction::Stop
                        } else {
                            PollAction::Continue
                        }
                    },
                    self.config.poll_interval,
                );
            }
            None => self.ctx.clear_poll(),
        }

        let outcome = match self.ctx.auto_move(COMPUTER, self.config.level) {
            Ok(Some(outcome)) => outcome,
            Ok(None) => return writeln!(out, "no legal move"),
            Err(e) => return writeln!(out, "error: {e}"),
        };
        let note = match outcome.source {
            MoveSource::Book => " (book)",
            MoveSource::ImmediateWin => " (winning move)",
            MoveSource::Interrupted => " (out of time)",
            MoveSource::Search => "",
        };
        writeln!(out, "computer plays {}{note}", outcome.column + 1)?;
        if !self.finish_if_over(out)? {
            self.handle_board(out)?;
        }
        Ok(())
    }

    /// Announce the result and end the game if it is over.
    fn finish_if_over<W: Write>(&mut self, out: &mut W) -> io::Result<bool> {
        let (Ok(winner), Ok(tie)) = (self.ctx.winner(), self.ctx.is_tie()) else {
            return Ok(false);
        };
        if winner.is_none() && !tie {
            return Ok(false);
        }

        if let (Ok(board), Ok(line)) = (self.ctx.board(), self.ctx.win_coords()) {
            writeln!(out, "{}", board.pretty_with_line(line))?;
        } else if let Ok(board) = self.ctx.board() {
            writeln!(out, "{}", board.pretty())?;
        }

        match winner {
            Some(HUMAN) => {
                self.tally.human += 1;
                writeln!(out, "You win!")?;
            }
            Some(_) => {
                self.tally.computer += 1;
                writeln!(out, "Computer wins!")?;
            }
            None => {
                self.tally.draws += 1;
                writeln!(out, "Draw.")?;
            }
        }
        self.write_tally(out)?;
        let _ = self.ctx.end_game();
        Ok(true)
    }

    fn handle_board<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        match self.ctx.board() {
            Ok(board) => writeln!(out, "{}", board.pretty()),
            Err(e) => writeln!(out, "error: {e}"),
        }
    }

    fn handle_score<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if let (Ok(you), Ok(computer)) = (self.ctx.score_of_player(HUMAN), self.ctx.score_of_player(COMPUTER)) {
            writeln!(out, "line scores: you {you}, computer {computer}")?;
        }
        self.write_tally(out)
    }

    fn write_tally<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let t = self.tally;
        writeln!(out, "tally: you {}, computer {}, draws {}", t.human, t.computer, t.draws)
    }

    fn handle_setoption<W: Write>(&mut self, option: ConsoleOption, out: &mut W) -> io::Result<()> {
        match option {
            ConsoleOption::Level(level) => {
                if !(1..=MAX_LEVEL).contains(&level) {
                    return writeln!(out, "error: level must be between 1 and {MAX_LEVEL}");
                }
                self.config.level = level;
            }
            ConsoleOption::Seed(seed) => {
                self.config.seed = seed;
                self.ctx.reseed(seed);
            }
            // Board sizes are checked when the next game starts.
            ConsoleOption::Width(width) => self.config.width = width,
            ConsoleOption::Height(height) => self.config.height = height,
            ConsoleOption::Connect(connect) => self.config.connect = connect,
            ConsoleOption::MoveTime(0) => self.config.move_time = None,
            ConsoleOption::MoveTime(ms) => self.config.move_time = Some(Duration::from_millis(ms)),
        }
        debug!(?option, "option set");
        Ok(())
    }
}

impl Default for ConsoleEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn handle_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "commands:")?;
    writeln!(out, "  new [width height connect]   start a game")?;
    writeln!(out, "  play <column>                drop a piece (columns start at 1)")?;
    writeln!(out, "  go                           let the computer move")?;
    writeln!(out, "  board | d                    show the board")?;
    writeln!(out, "  score                        show scores and the tally")?;
    writeln!(out, "  setoption name <Level|Seed|Width|Height|Connect|MoveTime> value <v>")?;
    writeln!(out, "  quit                         leave")
}
