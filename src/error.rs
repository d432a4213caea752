use std::error::Error as StdError;
use std::sync::Arc;

/// Why a [`CancellationToken`] fired.
///
/// [`CancellationToken`]: crate::CancellationToken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum CancelReason {
    /// The token was cancelled explicitly.
    #[error("wait cancelled")]
    Cancelled,
    /// The token was cancelled because a caller-owned deadline passed.
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

/// The error type shared by promises, futures and the race combinator.
///
/// `Error` is cheap to clone: a single completion is delivered to every
/// waiter, so the error travels by reference count rather than by move.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The promise was already completed, or the future was already waited on.
    #[error("already done")]
    AlreadyDone,

    /// The cancellation token fired before an outcome was available.
    #[error(transparent)]
    Cancelled(#[from] CancelReason),

    /// Every handle to the promise was dropped before it was completed.
    #[error("promise dropped before completion")]
    Dropped,

    /// `race_any` was called without any futures to race.
    #[error("no futures to race")]
    Empty,

    /// The computation itself failed.
    #[error(transparent)]
    Failed(Arc<dyn StdError + Send + Sync + 'static>),
}

impl Error {
    /// Wrap an arbitrary computation error.
    ///
    /// # Examples
    ///
    /// ```
    /// use promise_concurrency::Error;
    ///
    /// let err = Error::failed("connection refused");
    /// assert_eq!(err.to_string(), "connection refused");
    /// ```
    pub fn failed<E>(error: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        Self::Failed(Arc::from(error.into()))
    }

    /// Returns `true` if this is [`Error::AlreadyDone`].
    pub fn is_already_done(&self) -> bool {
        matches!(self, Self::AlreadyDone)
    }

    /// Returns the reason if this error came from a cancelled wait.
    pub fn cancel_reason(&self) -> Option<CancelReason> {
        match self {
            Self::Cancelled(reason) => Some(*reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io;

    #[test]
    fn failed_forwards_display() {
        let err = Error::failed(io::Error::new(io::ErrorKind::Other, "oh no"));
        assert_eq!(err.to_string(), "oh no");
        assert!(err.source().is_none());
    }

    #[test]
    fn clones_share_the_failure() {
        let err = Error::failed("boom");
        let copy = err.clone();
        match (err, copy) {
            (Error::Failed(a), Error::Failed(b)) => assert!(Arc::ptr_eq(&a, &b)),
            _ => unreachable!(),
        }
    }

    #[test]
    fn cancellation_keeps_its_reason() {
        let err = Error::from(CancelReason::DeadlineExceeded);
        assert_eq!(err.cancel_reason(), Some(CancelReason::DeadlineExceeded));
        assert_eq!(err.to_string(), "deadline exceeded");
        assert!(!err.is_already_done());
        assert!(Error::AlreadyDone.is_already_done());
    }
}
