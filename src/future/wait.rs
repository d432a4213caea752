use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures_core::future::FusedFuture;
use pin_project::pin_project;
use tokio::sync::oneshot;

use crate::cancel::WaitForCancellation;
use crate::{CancellationToken, Error, Outcome};

/// Waits for a future's outcome or for cancellation, whichever is first.
///
/// This `struct` is created by the [`wait`] method on [`Future`]. See its
/// documentation for more.
///
/// [`wait`]: crate::Future::wait
/// [`Future`]: crate::Future
#[derive(Debug)]
#[pin_project]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Wait<'a, T> {
    #[pin]
    state: State<'a, T>,
}

/// The internal state
#[derive(Debug)]
#[pin_project(project = StateProj)]
enum State<'a, T> {
    Ready(Option<Outcome<T>>),
    Receiving {
        #[pin]
        receiver: oneshot::Receiver<Outcome<T>>,
        #[pin]
        cancelled: WaitForCancellation<'a>,
    },
    Completed,
}

impl<'a, T> Wait<'a, T> {
    pub(super) fn ready(outcome: Outcome<T>) -> Self {
        Self {
            state: State::Ready(Some(outcome)),
        }
    }

    pub(super) fn receiving(
        receiver: oneshot::Receiver<Outcome<T>>,
        token: &'a CancellationToken,
    ) -> Self {
        Self {
            state: State::Receiving {
                receiver,
                cancelled: token.cancelled(),
            },
        }
    }
}

impl<T> Future for Wait<'_, T> {
    type Output = Outcome<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();
        let outcome = match this.state.as_mut().project() {
            StateProj::Ready(outcome) => match outcome.take() {
                Some(outcome) => outcome,
                None => panic!("future polled after completing"),
            },
            StateProj::Receiving {
                receiver,
                cancelled,
            } => {
                if let Poll::Ready(received) = receiver.poll(cx) {
                    received.unwrap_or_else(|_| Outcome::failure(Error::Dropped))
                } else if let Poll::Ready(reason) = cancelled.poll(cx) {
                    Outcome::failure(Error::Cancelled(reason))
                } else {
                    return Poll::Pending;
                }
            }
            StateProj::Completed => panic!("future polled after completing"),
        };
        this.state.set(State::Completed);
        Poll::Ready(outcome)
    }
}

impl<T> FusedFuture for Wait<'_, T> {
    fn is_terminated(&self) -> bool {
        matches!(self.state, State::Completed)
    }
}
