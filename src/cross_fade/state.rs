#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Phase {
    Idle,          // No fade in flight, the "from" slot may be frozen
    Transitioning, // Key changed, both slots render until the timeout elapses
}

/// Everything the controller remembers between renders.
#[derive(Debug)]
pub struct TransitionState<C> {
    /// Content that was current right before the last key change.
    pub previous: Option<C>,
    pub current: C,
    /// Which physical slot holds the current content.
    pub swapped: bool,
    pub phase: Phase,
}

impl<C> TransitionState<C> {
    pub fn new(current: C) -> Self {
        Self {
            previous: None,
            current,
            swapped: false,
            phase: Phase::Idle,
        }
    }

    /// Records a key change: the outgoing content moves to `previous` and
    /// the slot assignment flips.
    pub fn begin(&mut self, next: C) {
        let outgoing = std::mem::replace(&mut self.current, next);
        self.previous = Some(outgoing);
        self.swapped = !self.swapped;
        self.phase = Phase::Transitioning;
    }

    pub fn finish(&mut self) {
        self.phase = Phase::Idle;
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase == Phase::Transitioning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_moves_current_to_previous_and_flips() {
        let mut state = TransitionState::new("a");
        state.begin("b");
        assert_eq!(state.previous, Some("a"));
        assert_eq!(state.current, "b");
        assert!(state.swapped);
        assert!(state.is_transitioning());

        state.begin("c");
        assert_eq!(state.previous, Some("b"));
        assert!(!state.swapped);
    }

    #[test]
    fn finish_keeps_previous_content() {
        let mut state = TransitionState::new(1);
        state.begin(2);
        state.finish();
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.previous, Some(1));
    }
}
