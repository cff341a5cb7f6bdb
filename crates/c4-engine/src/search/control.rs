//! Search control: the optional poll hook and the stop request it can raise.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::trace;

/// What the poll hook wants the search to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollAction {
    /// Keep searching.
    Continue,
    /// Abandon the search; the move is chosen from what was finished so far.
    Stop,
}

/// Host callback run at a fixed wall-clock interval during search.
///
/// The hook has no access to the game, so it cannot disturb the search state.
pub type PollHook = Box<dyn FnMut() -> PollAction + Send>;

/// Decides when to call the poll hook and remembers a stop request.
///
/// The deadline is armed before each root candidate is searched and then
/// advanced by one interval per poll.
pub struct SearchControl {
    hook: Option<PollHook>,
    interval: Duration,
    next_poll: Option<Instant>,
    stopped: bool,
    polls: u64,
}

impl SearchControl {
    /// Control without a poll hook.
    pub fn new() -> Self {
        Self {
            hook: None,
            interval: Duration::ZERO,
            next_poll: None,
            stopped: false,
            polls: 0,
        }
    }

    /// Install `hook`, to be called every `interval` while searching.
    pub fn set_hook(&mut self, hook: PollHook, interval: Duration) {
        self.hook = Some(hook);
        self.interval = interval;
        self.next_poll = None;
    }

    /// Remove the poll hook.
    pub fn clear_hook(&mut self) {
        self.hook = None;
        self.next_poll = None;
    }

    /// Return `true` if a hook is installed.
    pub fn has_hook(&self) -> bool {
        self.hook.is_some()
    }

    /// Start a new search: forget any earlier stop request.
    pub(crate) fn begin(&mut self) {
        self.stopped = false;
    }

    /// Schedule the next poll one interval from now. An interval too long
    /// to represent as an instant means the hook is never called.
    pub(crate) fn arm(&mut self) {
        if self.hook.is_some() {
            self.next_poll = Instant::now().checked_add(self.interval);
        }
    }

    /// Run the hook if its deadline has passed. Returns `true` once a stop
    /// has been requested.
    pub(crate) fn poll(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        let (Some(hook), Some(next)) = (self.hook.as_mut(), self.next_poll) else {
            return false;
        };
        if Instant::now() < next {
            return false;
        }

        self.next_poll = next.checked_add(self.interval);
        self.polls += 1;
        trace!(polls = self.polls, "poll hook");
        if hook() == PollAction::Stop {
            self.stopped = true;
        }
        self.stopped
    }

    /// Return `true` if the hook asked the current search to stop.
    #[inline]
    pub fn stopped(&self) -> bool {
        self.stopped
    }

    /// Number of hook calls since this control was created.
    #[inline]
    pub fn polls(&self) -> u64 {
        self.polls
    }
}

impl Default for SearchControl {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SearchControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchControl")
            .field("hook", &self.hook.is_some())
            .field("interval", &self.interval)
            .field("stopped", &self.stopped)
            .field("polls", &self.polls)
            .finish()
    }
}
