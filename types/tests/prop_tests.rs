use proptest::prelude::*;

use agora_types::Timestamp;

proptest! {
    /// `has_expired` must agree with saturating arithmetic on raw seconds.
    #[test]
    fn expiry_matches_raw_arithmetic(
        start in 0u64..u64::MAX / 2,
        duration in 0u64..u64::MAX / 2,
        now in 0u64..u64::MAX,
    ) {
        let t = Timestamp::new(start);
        let expired = t.has_expired(duration, Timestamp::new(now));
        prop_assert_eq!(expired, now >= start.saturating_add(duration));
    }

    /// Shifting forward then measuring elapsed time round-trips while the
    /// arithmetic does not saturate.
    #[test]
    fn add_then_elapsed_round_trips(
        start in 0u64..1_000_000_000,
        delta in 0u64..1_000_000_000,
    ) {
        let t = Timestamp::new(start);
        let later = t.add_secs(delta);
        prop_assert_eq!(t.elapsed_since(later), delta);
    }

    /// Elapsed time saturates at zero when `now` is behind the event.
    #[test]
    fn elapsed_never_underflows(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let elapsed = Timestamp::new(a).elapsed_since(Timestamp::new(b));
        prop_assert_eq!(elapsed, b.saturating_sub(a));
    }
}
