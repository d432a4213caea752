use core::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use smallvec::SmallVec;
use tokio::sync::oneshot;

use crate::{Error, Future, Outcome};

/// The write side of a single-assignment asynchronous value.
///
/// A `Promise` is completed at most once. Every [`Future`] taken from it,
/// before or after completion, observes that same outcome. Clones refer to
/// the same promise, so completion may be attempted from several tasks;
/// exactly one attempt wins.
///
/// If every handle to a pending promise is dropped, its outstanding futures
/// resolve to [`Error::Dropped`].
///
/// # Examples
///
/// ```
/// use promise_concurrency::{CancellationToken, Promise};
/// use futures_lite::future::block_on;
///
/// let promise = Promise::new();
/// let future = promise.future();
///
/// promise.complete(Some("hello"), None).unwrap();
/// assert!(promise.complete(Some("world"), None).unwrap_err().is_already_done());
///
/// let (value, error) = block_on(future.wait(&CancellationToken::new())).into_parts();
/// assert_eq!(value, Some("hello"));
/// assert!(error.is_none());
/// ```
pub struct Promise<T> {
    state: Arc<RwLock<State<T>>>,
}

struct State<T> {
    outcome: Option<Outcome<T>>,
    // One waiter is by far the common case.
    waiters: SmallVec<[oneshot::Sender<Outcome<T>>; 1]>,
}

impl<T> Promise<T> {
    /// Create a pending promise.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(State {
                outcome: None,
                waiters: SmallVec::new(),
            })),
        }
    }

    /// Returns `true` once the promise has been completed.
    pub fn is_completed(&self) -> bool {
        self.state.read().outcome.is_some()
    }
}

impl<T: Clone> Promise<T> {
    /// Settle the promise and deliver the outcome to every registered future.
    ///
    /// Only the first call succeeds. Any later call, from this handle or a
    /// clone of it, returns [`Error::AlreadyDone`] and leaves the stored
    /// outcome untouched.
    pub fn complete(&self, value: Option<T>, error: Option<Error>) -> Result<(), Error> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        if state.outcome.is_some() {
            return Err(Error::AlreadyDone);
        }

        let outcome = state.outcome.insert(Outcome::new(value, error));
        for waiter in state.waiters.drain(..) {
            // A future dropped before completion has nobody left to tell.
            let _ = waiter.send(outcome.clone());
        }
        Ok(())
    }

    /// Take a new single-use [`Future`] for this promise.
    ///
    /// Once the promise is completed this returns an immediate future holding
    /// a copy of the outcome. Before that, each call registers its own
    /// delivery slot, so every caller gets an independent future.
    pub fn future(&self) -> Future<T> {
        let state = self.state.upgradable_read();
        if let Some(outcome) = &state.outcome {
            return Future::from(outcome.clone());
        }

        // Still holding the upgradable lock: `complete` cannot slip in
        // between the check above and the registration below.
        let mut state = RwLockUpgradableReadGuard::upgrade(state);
        let (sender, receiver) = oneshot::channel();
        state.waiters.push(sender);
        Future::from_receiver(receiver)
    }
}

impl<T> Clone for Promise<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> Default for Promise<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Promise<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Promise")
            .field("completed", &state.outcome.is_some())
            .field("waiters", &state.waiters.len())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::CancellationToken;
    use futures_lite::future::block_on;

    #[test]
    fn futures_before_and_after_completion_agree() {
        let promise = Promise::new();
        let early = promise.future();
        let also_early = promise.future();
        assert_eq!(promise.state.read().waiters.len(), 2);

        promise.complete(Some(7), None).unwrap();
        assert!(promise.state.read().waiters.is_empty());
        let late = promise.future();

        let token = CancellationToken::new();
        for future in [early, also_early, late] {
            let outcome = block_on(future.wait(&token));
            assert_eq!(outcome.value(), Some(&7));
            assert!(outcome.is_success());
        }
    }

    #[test]
    fn second_completion_is_rejected() {
        let promise = Promise::new();
        promise.complete(Some(1), Some(Error::failed("error"))).unwrap();
        let err = promise.complete(Some(2), None).unwrap_err();
        assert!(err.is_already_done());

        let outcome = block_on(promise.future().wait(&CancellationToken::new()));
        let (value, error) = outcome.into_parts();
        assert_eq!(value, Some(1));
        assert_eq!(error.unwrap().to_string(), "error");
    }

    #[test]
    fn dropping_every_handle_resolves_to_dropped() {
        let promise = Promise::<u8>::new();
        let clone = promise.clone();
        let future = promise.future();
        drop(promise);
        assert!(!clone.is_completed());
        drop(clone);

        let outcome = block_on(future.wait(&CancellationToken::new()));
        assert!(matches!(outcome.error(), Some(Error::Dropped)));
    }

    #[test]
    fn dropped_future_does_not_block_completion() {
        let promise = Promise::new();
        drop(promise.future());
        assert!(promise.complete(Some(()), None).is_ok());
        assert!(promise.is_completed());
    }

    #[test]
    fn debug_reports_state() {
        let promise = Promise::<u8>::new();
        let _future = promise.future();
        assert_eq!(
            format!("{promise:?}"),
            "Promise { completed: false, waiters: 1 }"
        );
    }
}
