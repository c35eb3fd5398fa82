//! Run tokens and completion signals
//!
//! A [`RunSource`] hands out [`RunToken`]s backed by a shared generation
//! counter. Issuing a new token invalidates every token issued before it, so a
//! reset only has to call [`RunSource::issue`] to stop stale runs at their next
//! suspension point.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Issues run tokens for one puzzle slot
#[derive(Debug, Default)]
pub struct RunSource {
    generation: Arc<AtomicU64>,
}

impl RunSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token, cancelling all earlier ones
    pub fn issue(&self) -> RunToken {
        let issued = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        RunToken {
            generation: Arc::clone(&self.generation),
            issued,
        }
    }

    /// Cancel whatever token is current without issuing a new one
    pub fn cancel_all(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

/// Cancellation handle for a single run
#[derive(Debug, Clone)]
pub struct RunToken {
    generation: Arc<AtomicU64>,
    issued: u64,
}

impl RunToken {
    /// A token that is not tied to any source
    pub fn detached() -> Self {
        RunSource::new().issue()
    }

    pub fn is_cancelled(&self) -> bool {
        self.generation.load(Ordering::Acquire) != self.issued
    }

    /// Cancel this run. A no-op when a newer run already superseded it.
    pub fn cancel(&self) {
        let _ = self.generation.compare_exchange(
            self.issued,
            self.issued + 1,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    pub fn generation(&self) -> u64 {
        self.issued
    }
}

/// One-shot completion signal for a visual transition.
///
/// Clones share the same flag: the host keeps one and calls
/// [`complete`](Completion::complete), the driver polls the other.
#[derive(Debug, Clone, Default)]
pub struct Completion {
    done: Arc<AtomicBool>,
}

impl Completion {
    pub fn new() -> Self {
        Self::default()
    }

    /// A signal that has already fired
    pub fn completed() -> Self {
        let completion = Self::new();
        completion.complete();
        completion
    }

    pub fn complete(&self) {
        self.done.store(true, Ordering::Release);
    }

    pub fn is_complete(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_invalidates_previous() {
        let source = RunSource::new();
        let first = source.issue();
        assert!(!first.is_cancelled());

        let second = source.issue();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
    }

    #[test]
    fn test_stale_cancel_does_not_touch_newer_run() {
        let source = RunSource::new();
        let stale = source.issue();
        let current = source.issue();

        stale.cancel();
        assert!(!current.is_cancelled());

        current.cancel();
        assert!(current.is_cancelled());
    }

    #[test]
    fn test_cancel_all() {
        let source = RunSource::new();
        let token = source.issue();
        source.cancel_all();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_completion_shared_between_clones() {
        let host_side = Completion::new();
        let driver_side = host_side.clone();
        assert!(!driver_side.is_complete());
        host_side.complete();
        assert!(driver_side.is_complete());
        assert!(Completion::completed().is_complete());
    }
}
