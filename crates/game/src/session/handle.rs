use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_session_id() -> u64 {
    NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed)
}

/// Capability to advance one session's authoritative simulation.
///
/// Exactly one exists per session; it is handed to the host when it joins
/// and cannot be cloned.
#[derive(Debug, PartialEq, Eq)]
pub struct TickOwnerHandle {
    session_id: u64,
}

impl TickOwnerHandle {
    pub(crate) fn new(session_id: u64) -> Self {
        Self { session_id }
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }
}
