use super::RaceAny as RaceAnyTrait;
use crate::Future;

impl<T> RaceAnyTrait for Vec<Future<T>>
where
    T: Clone + Send + Sync + 'static,
{
    type Output = T;

    fn race_any(self) -> Future<Self::Output> {
        super::race_any(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{spawn, CancellationToken, Error, Outcome};

    #[tokio::test]
    async fn all_err() {
        let err = Error::failed("error");
        let outcome = vec![
            Future::<u8>::failed(err.clone()),
            Future::failed(err.clone()),
            Future::failed(err.clone()),
            Future::failed(err),
        ]
        .race_any()
        .wait(&CancellationToken::new())
        .await;

        let (value, error) = outcome.into_parts();
        assert!(value.is_none());
        assert_eq!(error.unwrap().to_string(), "error");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn success_beats_spawned_failure() {
        let err = Error::failed("error");
        let outcome = vec![
            spawn(async { Outcome::new(Some(1), Some(Error::failed("error"))) }),
            Future::failed(err.clone()),
            spawn(async { Outcome::success(2) }),
            Future::failed(err),
        ]
        .race_any()
        .wait(&CancellationToken::new())
        .await;

        assert_eq!(outcome.value(), Some(&2));
        assert!(outcome.is_success());
    }
}
