//! Per-client sliding-window request limiter.
//!
//! Tracks request timestamps per client identifier inside a trailing window
//! and admits or rejects each call. State is process-local and lost on
//! restart; this is a best-effort throttle, not a durable ledger.
//!
//! The read-prune-append sequence runs as one atomic unit under a single
//! mutex, so two concurrent requests for the same identifier can never both
//! slip under the limit. Stale identifiers are evicted by an opportunistic
//! sweep, keeping the table bounded over the process lifetime.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

/// Sentinel bucket for requests that carry no client address.
///
/// All such clients share one window. That pooling is a known fairness
/// weakness of the original behavior, kept intentionally.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Admissions between opportunistic full-table sweeps.
const SWEEP_EVERY: u64 = 256;

/// Window size and quota for the limiter.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub max_requests: usize,
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window_secs: 60,
        }
    }
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allowed,
    Limited { retry_after_secs: u64 },
}

impl Admission {
    pub fn is_allowed(self) -> bool {
        matches!(self, Admission::Allowed)
    }
}

/// In-memory sliding-window limiter keyed by client identifier.
pub struct RateLimiter {
    config: RateLimitConfig,
    state: Mutex<LimiterState>,
}

#[derive(Default)]
struct LimiterState {
    requests: HashMap<String, Vec<DateTime<Utc>>>,
    calls_since_sweep: u64,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            state: Mutex::new(LimiterState::default()),
        }
    }

    /// Limiter with the default quota of 10 requests per 60 seconds.
    pub fn with_defaults() -> Self {
        Self::new(RateLimitConfig::default())
    }

    /// Checks `identifier` against the window at instant `now`.
    ///
    /// Prunes timestamps older than the window, rejects with a retry-after
    /// hint when the quota is already spent, and otherwise records `now`.
    pub fn admit(&self, identifier: &str, now: DateTime<Utc>) -> Admission {
        let window = Duration::seconds(self.config.window_secs as i64);
        let mut state = self.lock_state();

        state.calls_since_sweep += 1;
        if state.calls_since_sweep >= SWEEP_EVERY {
            state.calls_since_sweep = 0;
            sweep_table(&mut state.requests, now, window);
        }

        let timestamps = state.requests.entry(identifier.to_owned()).or_default();
        timestamps.retain(|ts| now.signed_duration_since(*ts) < window);

        if timestamps.len() >= self.config.max_requests {
            // Oldest survivor is strictly inside the window, so the
            // remainder is positive and the hint rounds up to >= 1.
            let retry_after_secs = match timestamps.first() {
                Some(oldest) => {
                    let elapsed = now.signed_duration_since(*oldest);
                    let remaining_ms = (window - elapsed).num_milliseconds().max(0);
                    ((remaining_ms + 999) / 1000) as u64
                }
                // Quota of zero: nothing recorded, a full window applies.
                None => self.config.window_secs,
            };
            tracing::debug!(identifier, retry_after_secs, "request rate limited");
            return Admission::Limited { retry_after_secs };
        }

        timestamps.push(now);
        Admission::Allowed
    }

    /// Drops identifiers whose every timestamp has aged out of the window.
    pub fn sweep(&self, now: DateTime<Utc>) {
        let window = Duration::seconds(self.config.window_secs as i64);
        let mut state = self.lock_state();
        sweep_table(&mut state.requests, now, window);
    }

    /// Number of identifiers currently tracked.
    pub fn tracked_identifiers(&self) -> usize {
        self.lock_state().requests.len()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, LimiterState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn sweep_table(
    requests: &mut HashMap<String, Vec<DateTime<Utc>>>,
    now: DateTime<Utc>,
    window: Duration,
) {
    requests.retain(|_, timestamps| {
        timestamps.retain(|ts| now.signed_duration_since(*ts) < window);
        !timestamps.is_empty()
    });
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn admits_up_to_the_quota() {
        let limiter = RateLimiter::with_defaults();
        for i in 0..10 {
            assert!(limiter.admit("1.2.3.4", at(i)).is_allowed());
        }
    }

    #[test]
    fn eleventh_call_in_window_is_rejected_with_positive_hint() {
        let limiter = RateLimiter::with_defaults();
        for i in 0..10 {
            limiter.admit("1.2.3.4", at(i));
        }
        match limiter.admit("1.2.3.4", at(10)) {
            Admission::Limited { retry_after_secs } => {
                // Oldest entry is at t=0; the window frees up at t=60.
                assert_eq!(retry_after_secs, 50);
            }
            Admission::Allowed => panic!("expected rejection"),
        }
    }

    #[test]
    fn next_call_succeeds_once_retry_hint_elapses() {
        let limiter = RateLimiter::with_defaults();
        for i in 0..10 {
            limiter.admit("1.2.3.4", at(i));
        }
        let retry = match limiter.admit("1.2.3.4", at(30)) {
            Admission::Limited { retry_after_secs } => retry_after_secs,
            Admission::Allowed => panic!("expected rejection"),
        };
        assert!(retry > 0);
        assert!(limiter.admit("1.2.3.4", at(30 + retry as i64)).is_allowed());
    }

    #[test]
    fn identifiers_have_independent_windows() {
        let limiter = RateLimiter::with_defaults();
        for i in 0..10 {
            limiter.admit("1.2.3.4", at(i));
        }
        assert!(!limiter.admit("1.2.3.4", at(10)).is_allowed());
        assert!(limiter.admit("5.6.7.8", at(10)).is_allowed());
    }

    #[test]
    fn window_cap_holds_across_any_trailing_window() {
        let limiter = RateLimiter::new(RateLimitConfig {
            max_requests: 3,
            window_secs: 10,
        });
        let mut admitted = Vec::new();
        for i in 0..40 {
            if limiter.admit("client", at(i)).is_allowed() {
                admitted.push(i);
            }
        }
        for (index, &second) in admitted.iter().enumerate() {
            let in_window = admitted[..=index]
                .iter()
                .filter(|&&other| second - other < 10)
                .count();
            assert!(in_window <= 3, "window exceeded at t={second}");
        }
    }

    #[test]
    fn sweep_evicts_stale_identifiers() {
        let limiter = RateLimiter::with_defaults();
        limiter.admit("gone", at(0));
        limiter.admit("fresh", at(100));
        assert_eq!(limiter.tracked_identifiers(), 2);
        limiter.sweep(at(120));
        assert_eq!(limiter.tracked_identifiers(), 1);
    }

    #[test]
    fn table_stays_bounded_under_many_one_shot_identifiers() {
        let limiter = RateLimiter::with_defaults();
        for i in 0..2_000 {
            limiter.admit(&format!("10.0.0.{i}"), at(i * 61));
        }
        // Opportunistic sweeps keep long-dead identifiers from piling up.
        assert!(limiter.tracked_identifiers() < 300);
    }

    #[test]
    fn concurrent_requests_never_exceed_the_quota() {
        use std::sync::Arc;

        let limiter = Arc::new(RateLimiter::with_defaults());
        let now = at(0);
        let handles: Vec<_> = (0..32)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                std::thread::spawn(move || limiter.admit("shared", now).is_allowed())
            })
            .collect();
        let admitted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&admitted| admitted)
            .count();
        assert_eq!(admitted, 10);
    }
}
