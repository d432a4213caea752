//! Running computations concurrently and handing back their [`Future`].
//!
//! Both helpers require a Tokio runtime to be active on the calling thread.

use crate::{Future, Outcome, Promise};

/// Run `computation` as an independent task and return its [`Future`].
///
/// The returned future is registered before the task starts, so it always
/// observes the computation's outcome. If the computation panics the promise
/// is dropped and the future resolves to [`Error::Dropped`].
///
/// # Panics
///
/// Panics if called outside of a Tokio runtime.
///
/// # Examples
///
/// ```
/// use promise_concurrency::{spawn, CancellationToken, Outcome};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let future = spawn(async { Outcome::success(40 + 2) });
/// let outcome = future.wait(&CancellationToken::new()).await;
/// assert_eq!(outcome.value(), Some(&42));
/// # }
/// ```
///
/// [`Error::Dropped`]: crate::Error::Dropped
pub fn spawn<T, F>(computation: F) -> Future<T>
where
    T: Clone + Send + Sync + 'static,
    F: core::future::Future<Output = Outcome<T>> + Send + 'static,
{
    let promise = Promise::new();
    let future = promise.future();
    tokio::spawn(async move {
        let outcome = computation.await;
        settle(&promise, outcome);
    });
    future
}

/// Run a blocking `computation` on the runtime's blocking pool and return
/// its [`Future`].
///
/// # Panics
///
/// Panics if called outside of a Tokio runtime.
pub fn spawn_blocking<T, F>(computation: F) -> Future<T>
where
    T: Clone + Send + Sync + 'static,
    F: FnOnce() -> Outcome<T> + Send + 'static,
{
    let promise = Promise::new();
    let future = promise.future();
    tokio::task::spawn_blocking(move || {
        let outcome = computation();
        settle(&promise, outcome);
    });
    future
}

/// Complete a promise that nothing else can reach.
fn settle<T: Clone>(promise: &Promise<T>, outcome: Outcome<T>) {
    log::trace!("spawned computation finished, success: {}", outcome.is_success());
    let (value, error) = outcome.into_parts();
    if let Err(err) = promise.complete(value, error) {
        // The task owns the only handle to its promise, so a second
        // completion means the primitive itself is broken.
        log::error!("spawned task completed its promise twice: {err}");
        unreachable!("this is a bug in promise-concurrency: {err}");
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{CancellationToken, Error};
    use std::time::Duration;

    #[tokio::test]
    async fn spawn_forwards_both_halves() {
        let future = spawn(async { Outcome::new(Some(1), Some(Error::failed("error"))) });
        let (value, error) = future.wait(&CancellationToken::new()).await.into_parts();
        assert_eq!(value, Some(1));
        assert_eq!(error.unwrap().to_string(), "error");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn spawn_blocking_runs_off_the_runtime() {
        let future = spawn_blocking(|| {
            std::thread::sleep(Duration::from_millis(2));
            Outcome::success("done")
        });
        let outcome = future.wait(&CancellationToken::new()).await;
        assert_eq!(outcome.value(), Some(&"done"));
    }

    #[tokio::test]
    async fn panicking_computation_drops_the_promise() {
        let future = spawn(async {
            if true {
                panic!("computation blew up");
            }
            Outcome::success(())
        });
        let outcome = future.wait(&CancellationToken::new()).await;
        assert!(matches!(outcome.error(), Some(Error::Dropped)));
    }
}
