use std::time::Duration;

use scrape_logging::scrape_debug;

use crate::timing::Sleeper;

/// Pauses inserted after engine events so the upstream board is not polled
/// aggressively. Errors wait longer than metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownPolicy {
    pub after_metrics: Duration,
    pub after_error: Duration,
}

impl Default for CooldownPolicy {
    fn default() -> Self {
        Self {
            after_metrics: Duration::from_secs(125),
            after_error: Duration::from_secs(200),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownReason {
    Metrics,
    PageError,
}

/// Per-run cooldown state. The current cooldown is replaced on every signal
/// and the caller blocks for it before the engine fetches the next page.
pub struct Throttle {
    policy: CooldownPolicy,
    current: Duration,
    total_waited: Duration,
    sleep: Sleeper,
}

impl Throttle {
    pub fn new(policy: CooldownPolicy, sleep: Sleeper) -> Self {
        Self {
            policy,
            current: Duration::ZERO,
            total_waited: Duration::ZERO,
            sleep,
        }
    }

    pub fn signal(&mut self, reason: CooldownReason) {
        self.current = match reason {
            CooldownReason::Metrics => self.policy.after_metrics,
            CooldownReason::PageError => self.policy.after_error,
        };
        if self.current.is_zero() {
            return;
        }
        scrape_debug!(
            "Cooling down for {:.1}s after {:?}",
            self.current.as_secs_f64(),
            reason
        );
        (self.sleep)(self.current);
        self.total_waited += self.current;
    }

    /// Cooldown applied by the most recent signal.
    pub fn cooldown(&self) -> Duration {
        self.current
    }

    pub fn total_waited(&self) -> Duration {
        self.total_waited
    }
}
