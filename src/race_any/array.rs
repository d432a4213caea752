use super::RaceAny as RaceAnyTrait;
use crate::Future;

impl<T, const N: usize> RaceAnyTrait for [Future<T>; N]
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
    use crate::{CancellationToken, Error};

    #[tokio::test]
    async fn one_ok() {
        let err = Error::failed("error");
        let outcome = [
            Future::failed(err.clone()),
            Future::failed(err.clone()),
            Future::succeeded("hello"),
            Future::failed(err),
        ]
        .race_any()
        .wait(&CancellationToken::new())
        .await;

        assert_eq!(outcome.into_result().unwrap(), Some("hello"));
    }

    #[tokio::test]
    async fn empty() {
        let outcome = <[Future<u8>; 0]>::default()
            .race_any()
            .wait(&CancellationToken::new())
            .await;
        assert!(matches!(outcome.error(), Some(Error::Empty)));
    }
}
