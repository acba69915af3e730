// state.rs — PipelineState: the goal pipeline's lifecycle.
//
// The state machine enforces a strictly sequential run:
//   Idle → Decomposing → Persisting → Refreshing → Done
//   (or Error from any non-terminal state)
// Done and Error return to Idle only through a reset.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    /// Waiting for a goal title.
    Idle,

    /// The backend is breaking the goal into steps.
    Decomposing,

    /// The new goal is being added to the collection.
    Persisting,

    /// The goal collection is being re-read.
    Refreshing,

    /// The run completed; the goal is in the refreshed collection.
    Done,

    /// The run failed. Any goal it added has been removed again.
    Error,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Idle => write!(f, "idle"),
            PipelineState::Decomposing => write!(f, "decomposing"),
            PipelineState::Persisting => write!(f, "persisting"),
            PipelineState::Refreshing => write!(f, "refreshing"),
            PipelineState::Done => write!(f, "done"),
            PipelineState::Error => write!(f, "error"),
        }
    }
}

impl PipelineState {
    /// Done and Error end a run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Error)
    }

    /// A run is underway.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            PipelineState::Decomposing | PipelineState::Persisting | PipelineState::Refreshing
        )
    }

    /// Check whether moving from this state to `next` is valid.
    pub fn can_transition_to(&self, next: PipelineState) -> bool {
        if next == PipelineState::Error {
            return !self.is_terminal();
        }

        matches!(
            (self, next),
            (PipelineState::Idle, PipelineState::Decomposing)
                | (PipelineState::Decomposing, PipelineState::Persisting)
                | (PipelineState::Persisting, PipelineState::Refreshing)
                | (PipelineState::Refreshing, PipelineState::Done)
                // Re-arm after a finished run.
                | (PipelineState::Done, PipelineState::Idle)
                | (PipelineState::Error, PipelineState::Idle)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_path_is_valid() {
        let path = [
            PipelineState::Idle,
            PipelineState::Decomposing,
            PipelineState::Persisting,
            PipelineState::Refreshing,
            PipelineState::Done,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn steps_cannot_be_skipped() {
        assert!(!PipelineState::Idle.can_transition_to(PipelineState::Persisting));
        assert!(!PipelineState::Decomposing.can_transition_to(PipelineState::Done));
        assert!(!PipelineState::Refreshing.can_transition_to(PipelineState::Persisting));
    }

    #[test]
    fn error_only_from_non_terminal_states() {
        assert!(PipelineState::Decomposing.can_transition_to(PipelineState::Error));
        assert!(PipelineState::Refreshing.can_transition_to(PipelineState::Error));
        assert!(!PipelineState::Done.can_transition_to(PipelineState::Error));
        assert!(!PipelineState::Error.can_transition_to(PipelineState::Error));
    }

    #[test]
    fn terminal_states_rearm_to_idle() {
        assert!(PipelineState::Done.can_transition_to(PipelineState::Idle));
        assert!(PipelineState::Error.can_transition_to(PipelineState::Idle));
        assert!(!PipelineState::Persisting.can_transition_to(PipelineState::Idle));
    }

    #[test]
    fn state_display_format() {
        assert_eq!(PipelineState::Decomposing.to_string(), "decomposing");
        assert_eq!(
            serde_json::to_string(&PipelineState::Refreshing).unwrap(),
            "\"refreshing\""
        );
    }
}
