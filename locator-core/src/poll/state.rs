use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PollState {
    Idle = 0,
    Polling = 1,
}

impl fmt::Display for PollState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollState::Idle => write!(f, "Idle"),
            PollState::Polling => write!(f, "Polling"),
        }
    }
}

pub(super) fn load_state(state: &AtomicU8) -> PollState {
    match state.load(Ordering::Acquire) {
        1 => PollState::Polling,
        _ => PollState::Idle,
    }
}

/// Moves `from -> to` only if the current state is `from`.
pub(super) fn cas_state(id: &str, state: &AtomicU8, from: PollState, to: PollState) -> bool {
    let ok = state
        .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
        .is_ok();
    if ok {
        info!("[{}]{} -> {}", id, from, to);
    }
    ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cas_only_from_expected_state() {
        let state = AtomicU8::new(PollState::Idle as u8);
        assert!(cas_state("t", &state, PollState::Idle, PollState::Polling));
        assert!(!cas_state("t", &state, PollState::Idle, PollState::Polling));
        assert_eq!(load_state(&state), PollState::Polling);
        assert!(cas_state("t", &state, PollState::Polling, PollState::Idle));
        assert_eq!(load_state(&state), PollState::Idle);
    }
}
