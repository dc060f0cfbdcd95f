//! Per-character state container with a phase counter.

/// Current and previous state of one archetype's own state enum, plus a
/// progress counter used as a phase index inside the current state.
///
/// There is no transition table here: each state's update function reads
/// [`StateMachine::progress`] to gate its one-time setup and calls
/// [`StateMachine::change_state`] itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateMachine<S: Copy + Eq> {
    current: S,
    previous: S,
    progress: u32,
}

impl<S: Copy + Eq> StateMachine<S> {
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            previous: initial,
            progress: 0,
        }
    }

    pub fn current(&self) -> S {
        self.current
    }

    pub fn previous(&self) -> S {
        self.previous
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    /// Enter `next`. Always resets progress, even when re-entering the
    /// current state.
    pub fn change_state(&mut self, next: S) {
        self.previous = self.current;
        self.current = next;
        self.progress = 0;
    }

    pub fn add_progress(&mut self, amount: u32) {
        self.progress += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Phase {
        Ready,
        Running,
    }

    #[test]
    fn change_state_records_previous_and_resets_progress() {
        let mut machine = StateMachine::new(Phase::Ready);
        machine.add_progress(2);

        machine.change_state(Phase::Running);

        assert_eq!(machine.current(), Phase::Running);
        assert_eq!(machine.previous(), Phase::Ready);
        assert_eq!(machine.progress(), 0);
    }

    #[test]
    fn reentering_the_same_state_still_resets_progress() {
        let mut machine = StateMachine::new(Phase::Running);
        machine.add_progress(1);

        machine.change_state(Phase::Running);

        assert_eq!(machine.progress(), 0);
        assert_eq!(machine.previous(), Phase::Running);
    }
}
