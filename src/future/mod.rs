//! The read side of a promise.
//!
//! A [`Future`] resolves to exactly one [`Outcome`]. There are two kinds:
//!
//! | Kind            | Created by                                    | Waits allowed |
//! | ---             | ---                                           | ---           |
//! | channel-backed  | [`Promise::future`] on a pending promise      | one           |
//! | immediate       | [`Future::succeeded`], [`Future::failed`], [`Future::resolved`], or [`Promise::future`] after completion | any |
//!
//! A channel-backed future is a one-shot ticket rather than a subscription:
//! the first [`wait`] claims it, and every later `wait` on the same instance
//! fails with [`Error::AlreadyDone`]. Callers that need several observers take
//! one future per observer from the promise.
//!
//! [`Promise::future`]: crate::Promise::future
//! [`wait`]: Future::wait

use core::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::{CancellationToken, Error, Outcome};

pub use wait::Wait;

mod wait;

/// A handle that resolves to the outcome of an asynchronous computation.
///
/// See the [module documentation](self) for the difference between
/// channel-backed and immediate futures.
#[derive(Debug)]
pub struct Future<T> {
    inner: Inner<T>,
}

#[derive(Debug)]
enum Inner<T> {
    Channel {
        receiver: Mutex<Option<oneshot::Receiver<Outcome<T>>>>,
        claimed: AtomicBool,
    },
    Fixed(Outcome<T>),
}

impl<T> Future<T> {
    pub(crate) fn from_receiver(receiver: oneshot::Receiver<Outcome<T>>) -> Self {
        Self {
            inner: Inner::Channel {
                receiver: Mutex::new(Some(receiver)),
                claimed: AtomicBool::new(false),
            },
        }
    }

    /// An immediate future holding a value and no error.
    pub fn succeeded(value: T) -> Self {
        Self::from(Outcome::success(value))
    }

    /// An immediate future holding an error and no value.
    pub fn failed(error: Error) -> Self {
        Self::from(Outcome::failure(error))
    }

    /// An immediate future holding both halves as given.
    pub fn resolved(value: Option<T>, error: Option<Error>) -> Self {
        Self::from(Outcome::new(value, error))
    }

    /// Returns `true` for futures that were resolved at construction.
    pub fn is_immediate(&self) -> bool {
        matches!(self.inner, Inner::Fixed(_))
    }
}

impl<T: Clone> Future<T> {
    /// Wait for the outcome, giving up when `token` is cancelled.
    ///
    /// An immediate future returns its outcome right away and ignores the
    /// token. A channel-backed future is claimed when `wait` is called, not
    /// when the returned future is first polled: the second call on the same
    /// instance yields [`Error::AlreadyDone`] even if the first `Wait` is still
    /// in flight or was dropped unpolled.
    ///
    /// If the token fires first the outcome carries
    /// [`Error::Cancelled`] with the token's reason. An outcome that is
    /// already available is preferred over an already-cancelled token.
    ///
    /// # Examples
    ///
    /// ```
    /// use promise_concurrency::{CancellationToken, Error, Promise};
    /// use futures_lite::future::block_on;
    ///
    /// let promise = Promise::<u8>::new();
    /// let future = promise.future();
    /// let token = CancellationToken::new();
    /// token.cancel();
    ///
    /// block_on(async {
    ///     let outcome = future.wait(&token).await;
    ///     assert!(matches!(outcome.error(), Some(Error::Cancelled(_))));
    ///
    ///     let outcome = future.wait(&token).await;
    ///     assert!(outcome.error().unwrap().is_already_done());
    /// });
    /// ```
    pub fn wait<'a>(&self, token: &'a CancellationToken) -> Wait<'a, T> {
        match &self.inner {
            Inner::Fixed(outcome) => Wait::ready(outcome.clone()),
            Inner::Channel { receiver, claimed } => {
                if claimed
                    .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                    .is_err()
                {
                    return Wait::ready(Outcome::failure(Error::AlreadyDone));
                }
                match receiver.lock().take() {
                    Some(receiver) => Wait::receiving(receiver, token),
                    None => Wait::ready(Outcome::failure(Error::AlreadyDone)),
                }
            }
        }
    }

    /// Block the current thread until [`wait`](Future::wait) resolves.
    ///
    /// Intended for synchronous callers. Calling this from inside an async
    /// task stalls that task's worker thread.
    pub fn wait_blocking(&self, token: &CancellationToken) -> Outcome<T> {
        futures_lite::future::block_on(self.wait(token))
    }
}

impl<T> From<Outcome<T>> for Future<T> {
    fn from(outcome: Outcome<T>) -> Self {
        Self {
            inner: Inner::Fixed(outcome),
        }
    }
}
