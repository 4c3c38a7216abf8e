//! Provides a token-based mechanism for graceful cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A token that signals cancellation to long-running walks.
///
/// Cloneable, thread-safe wrapper around an `Arc<AtomicBool>`. The walker
/// checks it at every directory batch and candidate; a cancelled token makes
/// the walk return [`crate::errors::Error::Interrupted`] instead of a
/// partial report.
///
/// # Examples
///
/// ```
/// use srcunify::CancellationToken;
///
/// let token = CancellationToken::new();
/// assert!(!token.is_cancelled());
///
/// let walker_view = token.clone();
/// token.cancel();
/// assert!(walker_view.is_cancelled());
/// ```
#[derive(Debug, Clone)]
pub struct CancellationToken {
    inner: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a new `CancellationToken` in a non-cancelled state.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(AtomicBool::new(false)), // false means not cancelled
        }
    }

    /// Signals cancellation.
    ///
    /// All subsequent calls to `is_cancelled()` on this token or any of its
    /// clones will return `true`.
    pub fn cancel(&self) {
        self.inner.store(true, Ordering::SeqCst);
    }

    /// Checks if the token has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::Relaxed)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
