//! Recipe id generation
//!
//! Ids are a base-36 millisecond timestamp followed by a base-36 random
//! suffix. The timestamp part never runs backwards within one generator, and
//! the suffix comes from a PCG stream seeded from the clock. This gives
//! practical uniqueness, not a guarantee; the store checks for clashes.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::platform;

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Format an integer in lowercase base 36
pub fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::with_capacity(13);
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    // Only ASCII digits were pushed
    String::from_utf8(buf).unwrap_or_default()
}

pub struct IdGenerator {
    rng: Pcg32,
    clock: fn() -> u64,
    last_millis: u64,
}

impl IdGenerator {
    /// Generator using the platform clock, seeded from it
    pub fn new() -> Self {
        let now = platform::now_millis();
        Self::with_clock(now, platform::now_millis)
    }

    /// Generator with an explicit seed and clock (deterministic in tests)
    pub fn with_clock(seed: u64, clock: fn() -> u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            clock,
            last_millis: 0,
        }
    }

    /// Produce the next id
    pub fn next_id(&mut self) -> String {
        let now = (self.clock)().max(self.last_millis);
        self.last_millis = now;
        let suffix: u64 = self.rng.random();
        format!("{}{}", to_base36(now), to_base36(suffix))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn fixed_clock() -> u64 {
        1_700_000_000_000
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(u64::MAX), "3w5e11264sgsf");
    }

    #[test]
    fn test_ids_start_with_timestamp() {
        let mut ids = IdGenerator::with_clock(1, fixed_clock);
        let id = ids.next_id();
        assert!(id.starts_with(&to_base36(fixed_clock())));
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_same_millisecond_ids_differ() {
        let mut ids = IdGenerator::with_clock(7, fixed_clock);
        let seen: HashSet<String> = (0..1000).map(|_| ids.next_id()).collect();
        assert_eq!(seen.len(), 1000);
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let mut a = IdGenerator::with_clock(42, fixed_clock);
        let mut b = IdGenerator::with_clock(42, fixed_clock);
        for _ in 0..10 {
            assert_eq!(a.next_id(), b.next_id());
        }
    }

    #[test]
    fn test_platform_generator_produces_distinct_ids() {
        let mut ids = IdGenerator::new();
        assert_ne!(ids.next_id(), ids.next_id());
    }
}
