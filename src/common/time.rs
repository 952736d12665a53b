//! Time utilities with a clock abstraction for testability.

use chrono::{TimeZone, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Current Unix timestamp in milliseconds (UTC)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        epoch_millis()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp in milliseconds
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Current Unix timestamp in milliseconds (UTC)
pub fn epoch_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a Unix timestamp in milliseconds to an RFC 3339 string (UTC)
pub fn millis_to_rfc3339(timestamp_millis: i64) -> String {
    match Utc.timestamp_millis_opt(timestamp_millis).single() {
        Some(dt) => dt.to_rfc3339(),
        // Out-of-range timestamps only come from hostile client input;
        // render the raw value instead of panicking.
        None => timestamp_millis.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_positive_timestamp() {
        // given: the system clock
        let clock = SystemClock;

        // when: reading the current time
        let timestamp = clock.now_millis();

        // then: it is after the Unix epoch
        assert!(timestamp > 0);
    }

    #[test]
    fn test_system_clock_is_monotonic_enough() {
        // given: the system clock
        let clock = SystemClock;

        // when: reading twice with a pause in between
        let first = clock.now_millis();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let second = clock.now_millis();

        // then: time did not go backwards
        assert!(second >= first);
    }

    #[test]
    fn test_fixed_clock_returns_fixed_timestamp() {
        // given: a fixed clock
        let clock = FixedClock::new(1_234_567_890_123);

        // when/then: every read returns the configured value
        assert_eq!(clock.now_millis(), 1_234_567_890_123);
        assert_eq!(clock.now_millis(), 1_234_567_890_123);
    }

    #[test]
    fn test_millis_to_rfc3339_format() {
        // given: 2023-01-01 00:00:00 UTC in milliseconds
        let timestamp = 1_672_531_200_000;

        // when: formatting
        let result = millis_to_rfc3339(timestamp);

        // then: RFC 3339 with UTC offset
        assert!(result.starts_with("2023-01-01T00:00:00"));
        assert!(result.ends_with("+00:00"));
    }

    #[test]
    fn test_millis_to_rfc3339_out_of_range_falls_back_to_raw() {
        // given: a timestamp chrono cannot represent
        let timestamp = i64::MAX;

        // when: formatting
        let result = millis_to_rfc3339(timestamp);

        // then: the raw value is rendered instead of panicking
        assert_eq!(result, i64::MAX.to_string());
    }
}
