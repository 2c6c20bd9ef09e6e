//! In-process fixed-window admission gate.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use signup_core::ports::{AdmissionGate, Clock, RateLimitError, RateLimitResult};

use super::clock::SystemClock;

/// Fixed-window gate configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum admitted requests per window.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 5,
            window: Duration::from_millis(600_000),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    started: Instant,
}

/// Per-client fixed-window counter.
///
/// The first request of a window always passes and opens it. Later
/// requests pass while the window's count is below `max_requests`;
/// rejected requests are not counted. A request arriving more than
/// `window` after the window opened starts a fresh one. Because windows
/// are fixed, a client can get up to `2 * max_requests` through around a
/// window boundary.
///
/// Each check is one entry-locked read-modify-write on the map shard, so
/// concurrent requests for the same client cannot double-count.
/// Note: Limits are per-process, not shared across instances.
pub struct FixedWindowGate<C: Clock = SystemClock> {
    windows: DashMap<String, Window>,
    config: RateLimitConfig,
    clock: C,
}

impl FixedWindowGate<SystemClock> {
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> FixedWindowGate<C> {
    pub fn with_clock(config: RateLimitConfig, clock: C) -> Self {
        Self {
            windows: DashMap::new(),
            config,
            clock,
        }
    }

    /// Count a request for `key` and decide whether it is admitted.
    pub fn admit(&self, key: &str) -> RateLimitResult {
        let now = self.clock.now();
        let max = self.config.max_requests;

        let mut entry = self.windows.entry(key.to_string()).or_insert(Window {
            count: 0,
            started: now,
        });
        let window = entry.value_mut();
        let elapsed = now.saturating_duration_since(window.started);

        if window.count == 0 || elapsed > self.config.window {
            *window = Window {
                count: 1,
                started: now,
            };
            return RateLimitResult {
                allowed: true,
                remaining: max.saturating_sub(1),
                reset_after: self.config.window,
            };
        }

        let reset_after = self.config.window.saturating_sub(elapsed);

        if window.count >= max {
            return RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_after,
            };
        }

        window.count += 1;
        RateLimitResult {
            allowed: true,
            remaining: max.saturating_sub(window.count),
            reset_after,
        }
    }

    /// Shorthand for `admit(key).allowed`.
    pub fn allow(&self, key: &str) -> bool {
        self.admit(key).allowed
    }

    /// Drop clients whose window opened more than two windows ago.
    /// Returns how many were dropped.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let horizon = self.config.window * 2;
        let before = self.windows.len();

        self.windows
            .retain(|_, window| now.saturating_duration_since(window.started) <= horizon);

        before.saturating_sub(self.windows.len())
    }

    /// Number of clients currently tracked.
    pub fn tracked(&self) -> usize {
        self.windows.len()
    }
}

#[async_trait]
impl<C: Clock> AdmissionGate for FixedWindowGate<C> {
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError> {
        Ok(self.admit(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_limit::MockClock;

    fn gate(max_requests: u32, window_secs: u64) -> (FixedWindowGate<MockClock>, MockClock) {
        let clock = MockClock::default();
        let gate = FixedWindowGate::with_clock(
            RateLimitConfig {
                max_requests,
                window: Duration::from_secs(window_secs),
            },
            clock.clone(),
        );
        (gate, clock)
    }

    #[test]
    fn test_request_after_max_is_denied() {
        let (gate, _clock) = gate(5, 600);

        for _ in 0..5 {
            assert!(gate.allow("1.2.3.4"));
        }
        assert!(!gate.allow("1.2.3.4"));
        assert!(!gate.allow("1.2.3.4"));
    }

    #[test]
    fn test_identities_are_counted_separately() {
        let (gate, _clock) = gate(1, 600);

        assert!(gate.allow("1.2.3.4"));
        assert!(!gate.allow("1.2.3.4"));
        assert!(gate.allow("5.6.7.8"));
        assert!(gate.allow("unknown"));
    }

    #[test]
    fn test_expired_window_admits_again() {
        let (gate, clock) = gate(2, 600);

        assert!(gate.allow("client"));
        assert!(gate.allow("client"));
        assert!(!gate.allow("client"));

        clock.advance(Duration::from_secs(601));
        assert!(gate.allow("client"));
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let (gate, clock) = gate(1, 600);

        assert!(gate.allow("client"));
        clock.advance(Duration::from_secs(600));
        assert!(!gate.allow("client"));
    }

    #[test]
    fn test_boundary_burst_admits_twice_max() {
        // Fixed windows: a burst at the end of one window plus a burst at the
        // start of the next gets 2 * max through within a short span.
        let (gate, clock) = gate(3, 600);

        assert!(gate.allow("client"));
        clock.advance(Duration::from_secs(599));
        assert!(gate.allow("client"));
        assert!(gate.allow("client"));

        clock.advance(Duration::from_secs(2));
        let admitted = (0..4).filter(|_| gate.allow("client")).count();
        assert_eq!(admitted, 3);
    }

    #[test]
    fn test_denied_requests_are_not_counted() {
        let (gate, clock) = gate(1, 600);

        assert!(gate.allow("client"));
        for _ in 0..10 {
            assert!(!gate.allow("client"));
        }

        clock.advance(Duration::from_secs(601));
        let result = gate.admit("client");
        assert!(result.allowed);
        assert_eq!(result.remaining, 0);
    }

    #[test]
    fn test_result_reports_remaining_and_reset() {
        let (gate, clock) = gate(3, 600);

        let first = gate.admit("client");
        assert_eq!(first.remaining, 2);
        assert_eq!(first.reset_after, Duration::from_secs(600));

        clock.advance(Duration::from_secs(100));
        let second = gate.admit("client");
        assert_eq!(second.remaining, 1);
        assert_eq!(second.reset_after, Duration::from_secs(500));
    }

    #[test]
    fn test_sweep_drops_only_stale_windows() {
        let (gate, clock) = gate(5, 600);

        gate.allow("stale");
        clock.advance(Duration::from_secs(1000));
        gate.allow("fresh");
        clock.advance(Duration::from_secs(201));

        assert_eq!(gate.sweep(), 1);
        assert_eq!(gate.tracked(), 1);
        // The swept client starts over with a full window.
        assert_eq!(gate.admit("stale").remaining, 4);
    }

    #[tokio::test]
    async fn test_gate_port_never_errors() {
        let (gate, _clock) = gate(1, 600);
        let gate: &dyn AdmissionGate = &gate;

        assert!(gate.check("client").await.unwrap().allowed);
        assert!(!gate.check("client").await.unwrap().allowed);
    }
}
