use std::fmt;

pub type OnCompleteHdlrFn = Box<dyn FnOnce() + Send + 'static>;

enum LatchState {
    Idle,
    Armed(OnCompleteHdlrFn),
    Fired,
}

/// CompletionLatch delivers "gathering is over" exactly once per
/// negotiation round, however many completion signals the engine emits.
///
/// It moves `Idle -> Armed -> Fired`. Arming always starts a fresh round,
/// dropping a callback that never fired. Triggering an idle or fired latch
/// does nothing.
pub struct CompletionLatch {
    state: LatchState,
    round: u64,
}

impl Default for CompletionLatch {
    fn default() -> Self {
        CompletionLatch {
            state: LatchState::Idle,
            round: 0,
        }
    }
}

impl CompletionLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// arm stores the callback for a new round and returns the round number.
    /// Returns true as the second value if an unfired callback was dropped.
    pub fn arm(&mut self, on_complete: OnCompleteHdlrFn) -> (u64, bool) {
        let replaced = matches!(self.state, LatchState::Armed(_));
        self.state = LatchState::Armed(on_complete);
        self.round += 1;
        (self.round, replaced)
    }

    /// trigger fires the armed callback. Returns whether this call fired it.
    pub fn trigger(&mut self) -> bool {
        match std::mem::replace(&mut self.state, LatchState::Fired) {
            LatchState::Armed(on_complete) => {
                on_complete();
                true
            }
            previous => {
                self.state = previous;
                false
            }
        }
    }

    /// disarm returns the latch to idle without firing. A pending callback
    /// is dropped.
    pub fn disarm(&mut self) -> bool {
        let was_armed = matches!(self.state, LatchState::Armed(_));
        self.state = LatchState::Idle;
        was_armed
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, LatchState::Armed(_))
    }

    pub fn is_fired(&self) -> bool {
        matches!(self.state, LatchState::Fired)
    }

    pub fn round(&self) -> u64 {
        self.round
    }
}

impl fmt::Debug for CompletionLatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            LatchState::Idle => "idle",
            LatchState::Armed(_) => "armed",
            LatchState::Fired => "fired",
        };
        f.debug_struct("CompletionLatch")
            .field("state", &state)
            .field("round", &self.round)
            .finish()
    }
}
