//! Polling helpers for integration tests: wait for a condition with a
//! bounded timeout instead of sleeping fixed amounts.

use std::time::Duration;

use thiserror::Error;
use tokio::time::{sleep, Instant};
use tracing::debug;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct WaitTimeout(pub String);

/// Poll `cond` until it returns true or `timeout` elapses.
pub async fn until<F>(mut cond: F, timeout: Duration, poll: Duration) -> Result<(), WaitTimeout>
where
    F: FnMut() -> bool,
{
    let deadline = Instant::now() + timeout;
    loop {
        if cond() {
            return Ok(());
        }
        if Instant::now() > deadline {
            return Err(WaitTimeout(
                "expected condition not met within timeout".to_string(),
            ));
        }
        debug!(?poll, "condition not met yet, polling again");
        sleep(poll).await;
    }
}

/// Poll `cond` until it returns false or `timeout` elapses.
pub async fn until_not<F>(mut cond: F, timeout: Duration, poll: Duration) -> Result<(), WaitTimeout>
where
    F: FnMut() -> bool,
{
    until(move || !cond(), timeout, poll)
        .await
        .map_err(|_| WaitTimeout("expected condition met within timeout".to_string()))
}
