//! OCR agent status polling for the import wizard.
//!
//! SYSTEM CONTEXT
//! ==============
//! While the OCR button is visible the wizard polls
//! `agent_is_extracting_status`: once immediately, then every
//! [`DEFAULT_INTERVAL`] until the agent reports idle. A failed poll keeps the
//! last known value and is retried on the next tick.

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use wire::poll::{PollPolicy, PollSchedule, PollStep};
use wire::poll::DEFAULT_INTERVAL;

use crate::util::lifetime::CancelToken;

/// Start polling into `extracting`. Stops on idle or when `token` is cancelled.
pub fn watch_agent(extracting: RwSignal<bool>, token: CancelToken) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let mut schedule = PollSchedule::new(PollPolicy::fixed(DEFAULT_INTERVAL));
        loop {
            let reported = match crate::net::api::agent_is_extracting().await {
                Ok(active) => Some(active),
                Err(e) => {
                    log::warn!("agent status poll failed: {e}");
                    None
                }
            };
            if !token.is_live() {
                return;
            }
            if let Some(active) = reported {
                extracting.set(active);
            }
            match schedule.observe(reported.unwrap_or(true)) {
                PollStep::Wait(delay) => {
                    gloo_timers::future::sleep(delay).await;
                    if !token.is_live() {
                        return;
                    }
                }
                PollStep::Finished | PollStep::TimedOut => return,
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (extracting, token, DEFAULT_INTERVAL);
}
