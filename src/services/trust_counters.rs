use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;

/// Rolling spam-incident window for one user
#[derive(Debug, Clone, Copy)]
struct SpamWindow {
    count: u32,
    last_at: DateTime<Utc>,
}

/// Per-user trust counters held for the lifetime of the process.
///
/// Counters are an escalation signal, not a system of record: they reset on
/// restart and are not shared across instances. Entries are created lazily
/// and never evicted.
pub struct TrustCounters {
    reports: DashMap<Uuid, u32>,
    spam: DashMap<Uuid, SpamWindow>,
    window: Duration,
}

impl TrustCounters {
    pub fn new(window: Duration) -> Self {
        Self {
            reports: DashMap::new(),
            spam: DashMap::new(),
            window,
        }
    }

    /// Record a report against `user_id` and return the new total.
    pub fn record_report(&self, user_id: Uuid) -> u32 {
        let mut entry = self.reports.entry(user_id).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Record a spam incident at `now` and return the count within the
    /// current window. The window resets once `now` is more than the window
    /// duration past the previous incident; `last_at` is refreshed on every
    /// increment.
    pub fn record_spam_incident(&self, user_id: Uuid, now: DateTime<Utc>) -> u32 {
        let mut entry = self.spam.entry(user_id).or_insert(SpamWindow {
            count: 0,
            last_at: DateTime::<Utc>::MIN_UTC,
        });

        if now.signed_duration_since(entry.last_at) > self.window {
            entry.count = 0;
        }

        entry.count += 1;
        entry.last_at = now;
        entry.count
    }

    pub fn report_count(&self, user_id: Uuid) -> u32 {
        self.reports.get(&user_id).map(|c| *c).unwrap_or(0)
    }

    pub fn spam_count(&self, user_id: Uuid) -> u32 {
        self.spam.get(&user_id).map(|w| w.count).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counters() -> TrustCounters {
        TrustCounters::new(Duration::hours(1))
    }

    #[test]
    fn test_unknown_users_read_zero() {
        let counters = counters();
        let user = Uuid::new_v4();
        assert_eq!(counters.report_count(user), 0);
        assert_eq!(counters.spam_count(user), 0);
    }

    #[test]
    fn test_report_counts_are_monotonic() {
        let counters = counters();
        let user = Uuid::new_v4();
        assert_eq!(counters.record_report(user), 1);
        assert_eq!(counters.record_report(user), 2);
        assert_eq!(counters.record_report(user), 3);
        assert_eq!(counters.report_count(user), 3);
    }

    #[test]
    fn test_spam_incidents_accumulate_within_window() {
        let counters = counters();
        let user = Uuid::new_v4();
        let t0 = Utc::now();

        assert_eq!(counters.record_spam_incident(user, t0), 1);
        assert_eq!(
            counters.record_spam_incident(user, t0 + Duration::minutes(10)),
            2
        );
        assert_eq!(
            counters.record_spam_incident(user, t0 + Duration::minutes(20)),
            3
        );
    }

    #[test]
    fn test_spam_window_resets_after_expiry() {
        let counters = counters();
        let user = Uuid::new_v4();
        let t0 = Utc::now();

        assert_eq!(counters.record_spam_incident(user, t0), 1);
        assert_eq!(
            counters.record_spam_incident(user, t0 + Duration::hours(2)),
            1
        );
    }

    #[test]
    fn test_window_is_measured_from_last_incident() {
        let counters = counters();
        let user = Uuid::new_v4();
        let t0 = Utc::now();

        // Each incident refreshes last_at, so a slow drip never resets
        assert_eq!(counters.record_spam_incident(user, t0), 1);
        assert_eq!(
            counters.record_spam_incident(user, t0 + Duration::minutes(50)),
            2
        );
        assert_eq!(
            counters.record_spam_incident(user, t0 + Duration::minutes(100)),
            3
        );
    }

    #[test]
    fn test_counters_are_independent_per_user() {
        let counters = counters();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        counters.record_report(a);
        assert_eq!(counters.report_count(a), 1);
        assert_eq!(counters.report_count(b), 0);
    }
}
