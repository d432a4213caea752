use tokio::sync::mpsc;

use crate::{spawn, CancellationToken, Error, Future, Outcome};

pub(crate) mod array;
pub(crate) mod vec;

/// Wait for the first future to succeed.
///
/// Races every future concurrently and resolves to the first outcome that
/// carries no error. If every future fails, resolves to the error that was
/// observed last. Once a winner is found the remaining waits are cancelled.
pub trait RaceAny {
    /// The value type of the racing futures.
    type Output;

    /// Wait for the first future to succeed.
    ///
    /// Returns immediately with a [`Future`]; the race itself runs on a
    /// spawned task. Which failure is reported when all inputs fail depends
    /// on the order their outcomes arrive and is not deterministic.
    ///
    /// An empty collection resolves to [`Error::Empty`].
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime with a non-empty
    /// collection.
    ///
    /// # Examples
    ///
    /// ```
    /// use promise_concurrency::prelude::*;
    /// use promise_concurrency::{CancellationToken, Error, Future};
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let err = Error::failed("error");
    /// let race = vec![
    ///     Future::failed(err.clone()),
    ///     Future::succeeded(1),
    ///     Future::failed(err),
    /// ]
    /// .race_any();
    ///
    /// let outcome = race.wait(&CancellationToken::new()).await;
    /// assert_eq!(outcome.value(), Some(&1));
    /// assert!(outcome.error().is_none());
    /// # }
    /// ```
    fn race_any(self) -> Future<Self::Output>;
}

/// Race any number of futures; see [`RaceAny::race_any`].
pub fn race_any<T, I>(futures: I) -> Future<T>
where
    T: Clone + Send + Sync + 'static,
    I: IntoIterator<Item = Future<T>>,
{
    let futures: Vec<_> = futures.into_iter().collect();
    if futures.is_empty() {
        return Future::failed(Error::Empty);
    }
    spawn(race(futures))
}

async fn race<T>(futures: Vec<Future<T>>) -> Outcome<T>
where
    T: Clone + Send + Sync + 'static,
{
    let token = CancellationToken::new();
    let _guard = token.clone().drop_guard();

    let count = futures.len();
    log::trace!("racing {count} futures");

    // Room for every outcome, so no worker blocks on a decided race.
    let (sender, mut receiver) = mpsc::channel(count);
    for future in futures {
        let token = token.clone();
        let sender = sender.clone();
        tokio::spawn(async move {
            let outcome = future.wait(&token).await;
            if token.is_cancelled() {
                return;
            }
            let send = async move {
                let _ = sender.send(outcome).await;
            };
            let cancelled = async {
                token.cancelled().await;
            };
            futures_lite::future::or(cancelled, send).await;
        });
    }
    drop(sender);

    let mut last_error = None;
    for index in 0..count {
        let Some(outcome) = receiver.recv().await else {
            break;
        };
        let (value, error) = outcome.into_parts();
        match error {
            None => {
                log::trace!("race decided after {} of {count} outcomes", index + 1);
                return Outcome::new(value, None);
            }
            Some(error) => last_error = Some(error),
        }
    }

    log::trace!("all {count} racing futures failed");
    // Workers only go silent without reporting if the runtime is shutting down.
    Outcome::failure(last_error.unwrap_or(Error::Dropped))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Promise;

    #[tokio::test]
    async fn empty_input_is_rejected() {
        let race = race_any(Vec::<Future<u8>>::new());
        assert!(race.is_immediate());
        let outcome = race.wait(&CancellationToken::new()).await;
        assert!(matches!(outcome.error(), Some(Error::Empty)));
    }

    #[tokio::test]
    async fn winner_does_not_wait_for_pending_inputs() {
        let pending = Promise::<u8>::new();
        let race = race_any([pending.future(), Future::succeeded(4)]);
        let outcome = race.wait(&CancellationToken::new()).await;
        assert_eq!(outcome.value(), Some(&4));
        assert!(!pending.is_completed());
    }

    #[tokio::test]
    async fn consumed_input_counts_as_failure() {
        let promise = Promise::new();
        let future = promise.future();
        promise.complete(Some(9), None).unwrap();
        let token = CancellationToken::new();
        assert!(future.wait(&token).await.is_success());

        let outcome = race_any([future]).wait(&token).await;
        assert!(outcome.error().unwrap().is_already_done());
    }
}
