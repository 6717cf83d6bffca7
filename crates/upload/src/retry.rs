use std::time::Duration;

/// Backoff policy for transfer-loop iterations that make no forward
/// progress.
///
/// The wire protocol itself puts no bound on re-probing; a server that
/// keeps reporting the same offset would spin the loop forever.
/// Consecutive stalled attempts therefore back off exponentially and
/// abort past `max_stalled_attempts`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Delay before the first re-probe.
    pub initial_delay: Duration,
    /// Cap for the exponential backoff.
    pub max_delay: Duration,
    /// Multiplier per consecutive stalled attempt.
    pub backoff_factor: f64,
    /// Consecutive stalled attempts after which the upload aborts.
    pub max_stalled_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
            backoff_factor: 2.0,
            max_stalled_attempts: 5,
        }
    }
}

impl RetryPolicy {
    /// Calculates the delay for a given attempt number (1-based),
    /// with ±25% jitter so parallel uploads don't re-probe in lockstep.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(63) as i32;
        let secs = self.initial_delay.as_secs_f64() * self.backoff_factor.powi(exp);
        let capped = secs.min(self.max_delay.as_secs_f64());
        let jitter = capped * 0.25;
        let offset = (std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .subsec_nanos() as f64
            / u32::MAX as f64)
            * 2.0
            - 1.0; // [-1.0, 1.0)
        let with_jitter = (capped + jitter * offset).max(0.01);
        Duration::from_secs_f64(with_jitter)
    }
}
