//! Retry an async operation with a caller-supplied delay schedule.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

/// Run `op` up to `attempts` times, sleeping `delay_of(attempt)` between
/// attempts. There is no delay before the first attempt. Errors for which
/// `retryable` returns false are returned immediately.
pub async fn retry_async<F, Fut, T, E, D, P>(
    mut op: F,
    attempts: usize,
    delay_of: D,
    retryable: P,
) -> Result<T, E>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    D: Fn(usize) -> Duration,
    P: Fn(&E) -> bool,
{
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Ok(v) => return Ok(v),
            Err(e) if attempt < attempts && retryable(&e) => {
                sleep(delay_of(attempt)).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
