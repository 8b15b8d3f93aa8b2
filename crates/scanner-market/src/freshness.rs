//! Business-day freshness policy for the reference snapshot

use chrono::{NaiveDateTime, NaiveTime};

/// Default business-day boundary: the exchange close at 15:00 local time.
pub const DEFAULT_CUTOFF: NaiveTime = match NaiveTime::from_hms_opt(15, 0, 0) {
    Some(t) => t,
    None => unreachable!(),
};

/// Decides whether the persisted snapshot is stale.
///
/// A snapshot refreshed before today's cutoff stays valid until the cutoff
/// passes; a snapshot refreshed after the cutoff stays valid for the rest of
/// the day. Anything from a prior day is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    cutoff: NaiveTime,
}

impl FreshnessPolicy {
    pub fn new(cutoff: NaiveTime) -> Self {
        Self { cutoff }
    }

    pub fn cutoff(&self) -> NaiveTime {
        self.cutoff
    }

    /// Returns `true` when the snapshot must be refreshed.
    ///
    /// Rules:
    /// 1. No snapshot (`last_refresh` is `None`) -> refresh.
    /// 2. Snapshot from a different day -> refresh.
    /// 3. Same day: refresh only when the cutoff was crossed since the last
    ///    refresh (`last_refresh < cutoff <= now`).
    ///
    /// Callers that fail to produce a `last_refresh` timestamp (unreadable
    /// metadata, clock errors) must pass `None`, which resolves to a refresh
    /// rather than serving indefinitely stale data.
    pub fn needs_refresh(&self, last_refresh: Option<NaiveDateTime>, now: NaiveDateTime) -> bool {
        let Some(last) = last_refresh else {
            return true;
        };

        if last.date() != now.date() {
            return true;
        }

        let cutoff = now.date().and_time(self.cutoff);
        if last < cutoff && now < cutoff {
            // Both sides of today are pre-cutoff; snapshot still valid.
            return false;
        }
        if last >= cutoff {
            // Already refreshed after today's cutoff.
            return false;
        }

        // last < cutoff <= now: the boundary was crossed.
        true
    }
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_CUTOFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, day)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_missing_snapshot_always_refreshes() {
        let policy = FreshnessPolicy::default();
        assert!(policy.needs_refresh(None, at(29, 0, 0, 0)));
        assert!(policy.needs_refresh(None, at(29, 14, 59, 59)));
        assert!(policy.needs_refresh(None, at(29, 23, 59, 59)));
    }

    #[test]
    fn test_same_day_both_pre_cutoff_is_fresh() {
        let policy = FreshnessPolicy::default();
        assert!(!policy.needs_refresh(Some(at(29, 14, 0, 0)), at(29, 14, 59, 0)));
    }

    #[test]
    fn test_cutoff_crossed_same_day_refreshes() {
        let policy = FreshnessPolicy::default();
        assert!(policy.needs_refresh(Some(at(29, 14, 59, 59)), at(29, 15, 0, 1)));
    }

    #[test]
    fn test_post_cutoff_snapshot_valid_for_rest_of_day() {
        let policy = FreshnessPolicy::default();
        assert!(!policy.needs_refresh(Some(at(29, 15, 30, 0)), at(29, 23, 0, 0)));
    }

    #[test]
    fn test_prior_day_snapshot_refreshes() {
        let policy = FreshnessPolicy::default();
        assert!(policy.needs_refresh(Some(at(28, 16, 0, 0)), at(29, 10, 0, 0)));
    }

    #[test]
    fn test_refresh_exactly_at_cutoff() {
        let policy = FreshnessPolicy::default();
        // A refresh stamped exactly at the cutoff counts as post-cutoff.
        assert!(!policy.needs_refresh(Some(at(29, 15, 0, 0)), at(29, 16, 0, 0)));
        // "now" exactly at the cutoff with a pre-cutoff snapshot crosses it.
        assert!(policy.needs_refresh(Some(at(29, 14, 0, 0)), at(29, 15, 0, 0)));
    }

    #[test]
    fn test_custom_cutoff() {
        let policy = FreshnessPolicy::new(NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert!(!policy.needs_refresh(Some(at(29, 9, 0, 0)), at(29, 9, 15, 0)));
        assert!(policy.needs_refresh(Some(at(29, 9, 0, 0)), at(29, 9, 45, 0)));
    }
}
