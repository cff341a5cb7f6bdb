//! Depth-indexed stack of game states for search.
//!
//! Depth 0 holds the live game. [`StateStack::push`] copies the current
//! state one slot up and makes the copy current; [`StateStack::pop`] only
//! moves the cursor back. A slot is allocated the first time a search
//! reaches its depth and reused by every later push, so after warm-up a
//! search allocates nothing.

use tracing::trace;

use crate::state::GameState;

/// Stack of [`GameState`] copies indexed by search depth.
#[derive(Debug, Clone)]
pub struct StateStack {
    states: Vec<GameState>,
    depth: usize,
    max_depth: usize,
}

impl StateStack {
    /// Create a stack whose root is `root`, allowing pushes up to `max_depth`.
    pub fn new(root: GameState, max_depth: usize) -> StateStack {
        let mut states = Vec::with_capacity(max_depth + 1);
        states.push(root);
        StateStack {
            states,
            depth: 0,
            max_depth,
        }
    }

    /// Current depth (0 = the live game).
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Deepest depth a push may reach.
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Number of slots allocated so far.
    #[inline]
    pub fn allocated(&self) -> usize {
        self.states.len()
    }

    /// The state at the current depth.
    #[inline]
    pub fn current(&self) -> &GameState {
        &self.states[self.depth]
    }

    /// Mutable access to the state at the current depth.
    #[inline]
    pub fn current_mut(&mut self) -> &mut GameState {
        &mut self.states[self.depth]
    }

    /// The live game state at depth 0.
    #[inline]
    pub fn root(&self) -> &GameState {
        &self.states[0]
    }

    /// Copy the current state one level up and make the copy current.
    ///
    /// # Panics
    ///
    /// Panics if the stack is already at its maximum depth.
    pub fn push(&mut self) {
        assert!(
            self.depth < self.max_depth,
            "state stack overflow: depth {} is the limit",
            self.max_depth
        );
        let next = self.depth + 1;
        if next == self.states.len() {
            let copy = self.states[self.depth].clone();
            self.states.push(copy);
            trace!(depth = next, "allocated state slot");
        } else {
            let (below, above) = self.states.split_at_mut(next);
            above[0].clone_from(&below[self.depth]);
        }
        self.depth = next;
    }

    /// Return to the previous depth. The abandoned slot is kept for reuse.
    ///
    /// # Panics
    ///
    /// Panics when called at depth 0.
    pub fn pop(&mut self) {
        assert!(self.depth > 0, "state stack underflow");
        self.depth -= 1;
    }
}
