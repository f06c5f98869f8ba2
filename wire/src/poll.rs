//! Status-polling schedule shared by the portal and the CLI watch.
//!
//! DESIGN
//! ======
//! The schedule is a pure state machine: the caller polls, reports whether
//! the job is still active, and is told how long to wait (or to stop). The
//! first poll is issued immediately by the caller, so the schedule only ever
//! answers "what after this result". Failed polls count as "still active";
//! the next tick simply tries again.
//!
//! The default policy is a fixed 5 second interval with no cap. Backoff and a
//! total-wait cap are opt-in.

#[cfg(test)]
#[path = "poll_test.rs"]
mod poll_test;

use std::time::Duration;

/// Interval between agent-status polls.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// How a poll loop spaces its requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// Multiplier applied to the interval after each active result; `1.0` is fixed.
    pub backoff: f64,
    pub max_interval: Option<Duration>,
    /// Give up once this much waiting has accumulated.
    pub max_wait: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::fixed(DEFAULT_INTERVAL)
    }
}

impl PollPolicy {
    #[must_use]
    pub fn fixed(interval: Duration) -> Self {
        Self { interval, backoff: 1.0, max_interval: None, max_wait: None }
    }

    #[must_use]
    pub fn with_backoff(mut self, factor: f64, max_interval: Option<Duration>) -> Self {
        self.backoff = if factor.is_finite() && factor >= 1.0 { factor } else { 1.0 };
        self.max_interval = max_interval;
        self
    }

    #[must_use]
    pub fn with_max_wait(mut self, max_wait: Option<Duration>) -> Self {
        self.max_wait = max_wait;
        self
    }
}

/// What the poll loop should do after a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStep {
    /// Sleep this long, then poll again.
    Wait(Duration),
    /// The job reported completion; issue no further polls.
    Finished,
    /// The total-wait cap would be exceeded.
    TimedOut,
}

#[derive(Debug, Clone)]
pub struct PollSchedule {
    policy: PollPolicy,
    next: Duration,
    waited: Duration,
    polls: u32,
    outcome: Option<PollStep>,
}

impl PollSchedule {
    #[must_use]
    pub fn new(policy: PollPolicy) -> Self {
        Self {
            next: policy.interval,
            policy,
            waited: Duration::ZERO,
            polls: 0,
            outcome: None,
        }
    }

    /// Record one poll result and decide the next step.
    ///
    /// `still_active` is the job-active flag; pass `true` when the poll itself
    /// failed. Once `Finished` or `TimedOut` is returned, every later call
    /// returns the same terminal step.
    pub fn observe(&mut self, still_active: bool) -> PollStep {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        self.polls = self.polls.saturating_add(1);
        if !still_active {
            return self.finish(PollStep::Finished);
        }

        let wait = self.next;
        if let Some(cap) = self.policy.max_wait {
            if self.waited.saturating_add(wait) > cap {
                return self.finish(PollStep::TimedOut);
            }
        }
        self.waited = self.waited.saturating_add(wait);
        self.next = self.grow(wait);
        PollStep::Wait(wait)
    }

    #[must_use]
    pub fn polls(&self) -> u32 {
        self.polls
    }

    #[must_use]
    pub fn waited(&self) -> Duration {
        self.waited
    }

    fn finish(&mut self, step: PollStep) -> PollStep {
        self.outcome = Some(step);
        step
    }

    fn grow(&self, current: Duration) -> Duration {
        let grown = Duration::try_from_secs_f64(current.as_secs_f64() * self.policy.backoff)
            .unwrap_or(Duration::MAX);
        match self.policy.max_interval {
            Some(max) => grown.min(max),
            None => grown,
        }
    }
}
