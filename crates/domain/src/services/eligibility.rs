//! Donation eligibility window.

use chrono::{DateTime, Duration, Utc};

/// Minimum interval between whole-blood donations, in days.
pub const MIN_DONATION_INTERVAL_DAYS: i64 = 56;

/// Resolves the next-eligible-donation timestamp for a donation made at
/// `donated_at`.
///
/// A caller-supplied date earlier than the 56-day floor is silently clamped
/// up to the floor; the second tuple element reports whether a clamp (or a
/// fill-in for a missing value) happened so the API can surface it.
pub fn resolve_next_eligible(
    donated_at: DateTime<Utc>,
    requested: Option<DateTime<Utc>>,
) -> (DateTime<Utc>, bool) {
    let floor = donated_at + Duration::days(MIN_DONATION_INTERVAL_DAYS);
    match requested {
        Some(ts) if ts >= floor => (ts, false),
        Some(_) => (floor, true),
        None => (floor, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn donated() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_missing_value_defaults_to_floor() {
        let (resolved, adjusted) = resolve_next_eligible(donated(), None);
        assert_eq!(resolved, donated() + Duration::days(56));
        assert!(!adjusted);
    }

    #[test]
    fn test_early_value_clamped_to_exactly_56_days() {
        let early = donated() + Duration::days(30);
        let (resolved, adjusted) = resolve_next_eligible(donated(), Some(early));
        assert_eq!(resolved, donated() + Duration::days(56));
        assert!(adjusted);
    }

    #[test]
    fn test_later_value_kept() {
        let later = donated() + Duration::days(90);
        let (resolved, adjusted) = resolve_next_eligible(donated(), Some(later));
        assert_eq!(resolved, later);
        assert!(!adjusted);
    }

    #[test]
    fn test_exact_floor_not_flagged() {
        let floor = donated() + Duration::days(56);
        let (resolved, adjusted) = resolve_next_eligible(donated(), Some(floor));
        assert_eq!(resolved, floor);
        assert!(!adjusted);
    }
}
