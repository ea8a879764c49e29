//! Reconnection delay policy

use crate::core::ReconnectSettings;
use std::time::Duration;

/// Capped exponential backoff
///
/// The first delay after a reset is zero. Each further call doubles from
/// `initial` until `max`.
#[derive(Debug, Clone)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    failures: u32,
}

impl Backoff {
    pub fn new(settings: &ReconnectSettings) -> Self {
        Self {
            initial: settings.initial_delay(),
            max: settings.max_delay(),
            failures: 0,
        }
    }

    /// Delay before the next attempt, advancing the schedule
    pub fn next_delay(&mut self) -> Duration {
        let delay = match self.failures {
            0 => Duration::ZERO,
            n => {
                let factor = 1u32.checked_shl(n - 1).unwrap_or(u32::MAX);
                self.initial.saturating_mul(factor).min(self.max)
            }
        };
        self.failures = self.failures.saturating_add(1);
        delay
    }

    pub fn reset(&mut self) {
        self.failures = 0;
    }

    /// Attempts scheduled since the last reset
    pub fn attempts(&self) -> u32 {
        self.failures
    }
}
