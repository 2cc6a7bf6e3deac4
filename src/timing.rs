//! Wall-clock timing around business function calls.

use serde::Serialize;
use std::future::Future;
use std::time::Instant;

/// A result annotated with how long the call that produced it took.
///
/// Serializes as the inner value's fields plus `exec_time` (seconds).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timed<T> {
    #[serde(flatten)]
    inner: T,
    exec_time: f64,
}

impl<T> Timed<T> {
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Elapsed seconds. Never negative.
    pub fn exec_time(&self) -> f64 {
        self.exec_time
    }
}

/// Invoke `call` and measure it.
///
/// The clock starts immediately before `call` runs and stops when its future
/// resolves. Errors are returned untouched and carry no timing.
pub async fn timed<F, Fut, T, E>(call: F) -> Result<Timed<T>, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let start = Instant::now();
    let inner = call().await?;
    let exec_time = start.elapsed().as_secs_f64();

    Ok(Timed { inner, exec_time })
}
