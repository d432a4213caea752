use crate::Error;

/// The settled outcome of an asynchronous computation.
///
/// Both halves are always present: an outcome may carry a value, an error,
/// neither, or both. Which half is meaningful is up to the producer; the
/// race combinator treats any outcome without an error as a success.
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    value: Option<T>,
    error: Option<Error>,
}

impl<T> Outcome<T> {
    /// Create an outcome from both of its halves.
    pub fn new(value: Option<T>, error: Option<Error>) -> Self {
        Self { value, error }
    }

    /// A value with no error.
    pub fn success(value: T) -> Self {
        Self::new(Some(value), None)
    }

    /// An error with no value.
    pub fn failure(error: Error) -> Self {
        Self::new(None, Some(error))
    }

    /// The value half, if any.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// The error half, if any.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Returns `true` when the outcome carries no error.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Split the outcome into its `(value, error)` halves.
    pub fn into_parts(self) -> (Option<T>, Option<Error>) {
        (self.value, self.error)
    }

    /// Convert into a `Result`, discarding the value if an error is present.
    pub fn into_result(self) -> Result<Option<T>, Error> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.value),
        }
    }
}

impl<T> From<Result<T, Error>> for Outcome<T> {
    fn from(result: Result<T, Error>) -> Self {
        match result {
            Ok(value) => Self::success(value),
            Err(error) => Self::failure(error),
        }
    }
}
