//! Write-once promises, single-use futures, and a first-success race.
//!
//! A [`Promise`] is the write side of an asynchronous value: it is completed
//! exactly once with an [`Outcome`], a `(value, error)` pair. Any number of
//! [`Future`]s can be taken from it, and each resolves to that same outcome.
//! Waiting on a future takes a [`CancellationToken`], so a caller can always
//! give up on a wait without affecting the promise.
//!
//! # Operations
//!
//! - [`Promise::complete`]: settle a promise; only the first call wins.
//! - [`Promise::future`]: take a single-use future for a promise.
//! - [`Future::wait`]: wait for an outcome or for cancellation.
//! - [`Future::succeeded`], [`Future::failed`], [`Future::resolved`]: futures
//!   whose outcome is known up front.
//! - [`spawn`] and [`spawn_blocking`]: run a computation concurrently and get
//!   its future.
//! - [`RaceAny`]: resolve to the first successful future, or to the last
//!   failure if none succeed.
//!
//! # Examples
//!
//! ```rust
//! use promise_concurrency::prelude::*;
//! use promise_concurrency::{spawn, CancellationToken, Error, Future, Outcome};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let slow = spawn(async {
//!     tokio::time::sleep(Duration::from_millis(20)).await;
//!     Outcome::success("slow")
//! });
//! let fast = spawn(async { Outcome::success("fast") });
//! let broken = Future::failed(Error::failed("unreachable mirror"));
//!
//! let outcome = vec![slow, fast, broken]
//!     .race_any()
//!     .wait(&CancellationToken::new())
//!     .await;
//! assert_eq!(outcome.value(), Some(&"fast"));
//! # }
//! ```
//!
//! # Runtime
//!
//! Promises, futures and cancellation tokens work on any executor. The task
//! helpers and the race combinator spawn onto the current Tokio runtime.

#![deny(missing_debug_implementations, nonstandard_style)]
#![warn(missing_docs, unreachable_pub)]

mod cancel;
mod error;
mod outcome;
mod promise;
mod race_any;
mod task;

/// The promise-concurrency prelude.
pub mod prelude {
    pub use super::race_any::RaceAny as _;
}

pub mod future;

pub use cancel::{CancellationToken, DropGuard, WaitForCancellation};
pub use error::{CancelReason, Error};
pub use future::{Future, Wait};
pub use outcome::Outcome;
pub use promise::Promise;
pub use race_any::{race_any, RaceAny};
pub use task::{spawn, spawn_blocking};
