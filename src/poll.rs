//! Agent-status watch loop for `dmc ocr status --watch`.
//!
//! DESIGN
//! ======
//! The loop is generic over the probe so it runs against the real client in
//! the binary and against scripted answers under Tokio's paused clock in
//! tests. Spacing and stopping follow [`PollSchedule`]; a failed probe is
//! logged and counts as "still extracting".

#[cfg(test)]
#[path = "poll_test.rs"]
mod poll_test;

use std::future::Future;
use std::time::Duration;

use wire::ApiError;
use wire::poll::{PollPolicy, PollSchedule, PollStep};

/// How a watch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    /// The agent reported idle after `polls` requests.
    Idle { polls: u32 },
    /// The wait cap ran out while the agent was still busy.
    TimedOut { waited: Duration },
}

/// Poll `probe` until it reports idle or the policy's cap is reached.
///
/// `on_status` sees every successful answer, in order.
pub async fn watch<P, Fut, F>(policy: PollPolicy, mut probe: P, mut on_status: F) -> WatchOutcome
where
    P: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, ApiError>>,
    F: FnMut(bool),
{
    let mut schedule = PollSchedule::new(policy);
    loop {
        let active = match probe().await {
            Ok(active) => {
                on_status(active);
                active
            }
            Err(e) => {
                tracing::warn!(error = %e, "agent status poll failed");
                true
            }
        };
        match schedule.observe(active) {
            PollStep::Wait(delay) => tokio::time::sleep(delay).await,
            PollStep::Finished => return WatchOutcome::Idle { polls: schedule.polls() },
            PollStep::TimedOut => return WatchOutcome::TimedOut { waited: schedule.waited() },
        }
    }
}
