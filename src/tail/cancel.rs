use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A token for cooperative cancellation of a running scan
///
/// Cloning a CancelToken creates a new handle to the same underlying
/// cancellation state. The scan checks the token between window reads, never
/// in the middle of one.
#[derive(Clone, Debug)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request cancellation. Non-blocking; the scan stops at its next check.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Wrap an externally owned flag, e.g. the one set by the signal handlers.
    pub fn from_flag(flag: Arc<AtomicBool>) -> Self {
        Self { cancelled: flag }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_new_token_not_cancelled() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_clone_shares_state() {
        let token1 = CancelToken::new();
        let token2 = token1.clone();

        token2.cancel();

        assert!(token1.is_cancelled());
        assert!(token2.is_cancelled());
    }

    #[test]
    fn test_from_flag_observes_external_store() {
        let flag = Arc::new(AtomicBool::new(false));
        let token = CancelToken::from_flag(Arc::clone(&flag));

        flag.store(true, Ordering::SeqCst);
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cancel_from_other_thread() {
        let token = CancelToken::new();
        let token_clone = token.clone();

        thread::spawn(move || token_clone.cancel()).join().unwrap();

        assert!(token.is_cancelled());
    }
}
