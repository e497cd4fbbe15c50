//! Serve session state machine.

use std::fmt;

/// Where a session is in its lifecycle.
///
/// `Created → Bound → Serving → ShuttingDown → Closed`. Nothing leaves
/// `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionState {
    Created,
    Bound,
    Serving,
    ShuttingDown,
    Closed,
}

impl SessionState {
    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (Created, Bound)
                | (Bound, Serving)
                | (Bound, ShuttingDown)
                | (Serving, ShuttingDown)
                | (ShuttingDown, Closed)
        )
    }

    /// Whether the session has finished.
    pub fn is_terminal(self) -> bool {
        self == SessionState::Closed
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Created => "created",
            SessionState::Bound => "bound",
            SessionState::Serving => "serving",
            SessionState::ShuttingDown => "shutting-down",
            SessionState::Closed => "closed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_path_is_legal() {
        use SessionState::*;
        let path = [Created, Bound, Serving, ShuttingDown, Closed];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn closed_is_terminal() {
        use SessionState::*;
        for next in [Created, Bound, Serving, ShuttingDown, Closed] {
            assert!(!Closed.can_transition_to(next));
        }
        assert!(Closed.is_terminal());
        assert!(!Serving.is_terminal());
    }

    #[test]
    fn no_rebinding() {
        use SessionState::*;
        assert!(!Serving.can_transition_to(Bound));
        assert!(!ShuttingDown.can_transition_to(Serving));
    }
}
