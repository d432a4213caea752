use core::future::Future;
use core::pin::Pin;
use core::task::{ready, Context, Poll};
use std::sync::{Arc, OnceLock};

use tokio::sync::futures::Notified;
use tokio::sync::Notify;

use crate::CancelReason;

/// An externally triggered signal that aborts in-flight waits.
///
/// Clones share the same state: cancelling any clone cancels all of them.
/// The first call to [`cancel_with`] decides the [`CancelReason`] every
/// interrupted wait reports; later calls are no-ops.
///
/// This crate never cancels a caller's token on its own. Deadlines are
/// implemented by the caller, for example by a timer task that calls
/// `cancel_with(CancelReason::DeadlineExceeded)`.
///
/// [`cancel_with`]: CancellationToken::cancel_with
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    reason: OnceLock<CancelReason>,
    notify: Notify,
}

impl CancellationToken {
    /// Create a token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel with [`CancelReason::Cancelled`].
    ///
    /// Returns `true` if this call is the one that cancelled the token.
    pub fn cancel(&self) -> bool {
        self.cancel_with(CancelReason::Cancelled)
    }

    /// Cancel with the given reason.
    ///
    /// Returns `true` if this call is the one that cancelled the token.
    pub fn cancel_with(&self, reason: CancelReason) -> bool {
        if self.inner.reason.set(reason).is_err() {
            return false;
        }
        self.inner.notify.notify_waiters();
        true
    }

    /// Returns `true` once the token has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.inner.reason.get().is_some()
    }

    /// The reason the token was cancelled with, if it has been.
    pub fn reason(&self) -> Option<CancelReason> {
        self.inner.reason.get().copied()
    }

    /// Wait until the token is cancelled.
    pub fn cancelled(&self) -> WaitForCancellation<'_> {
        WaitForCancellation {
            token: self,
            notified: self.inner.notify.notified(),
        }
    }

    /// Returns a guard that cancels the token when dropped.
    pub fn drop_guard(self) -> DropGuard {
        DropGuard { token: self }
    }
}

/// Resolves to the [`CancelReason`] once its token is cancelled.
///
/// This `struct` is created by [`CancellationToken::cancelled`].
#[derive(Debug)]
#[pin_project::pin_project]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct WaitForCancellation<'a> {
    token: &'a CancellationToken,
    #[pin]
    notified: Notified<'a>,
}

impl Future for WaitForCancellation<'_> {
    type Output = CancelReason;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();
        let token = *this.token;
        loop {
            // The listener is registered before the reason is checked, so a
            // cancellation landing in between still wakes us.
            if let Some(reason) = token.reason() {
                return Poll::Ready(reason);
            }
            ready!(this.notified.as_mut().poll(cx));
            this.notified.set(token.inner.notify.notified());
        }
    }
}

/// Cancels its token when dropped.
///
/// This `struct` is created by [`CancellationToken::drop_guard`].
#[derive(Debug)]
#[must_use = "the token is cancelled as soon as the guard is dropped"]
pub struct DropGuard {
    token: CancellationToken,
}

impl Drop for DropGuard {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
