//! Policy layer tying classification and trust counters to enforcement

use crate::config::Config;
use crate::db::ModerationStore;
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateBanInput, CreateListingReportInput, CreateUserReportInput, Listing, ListingRecord,
    ListingReport, ListingStatus, Message, NewListing, NewMessage, UserBan, UserBlock, UserReport,
    Verdict,
};
use crate::services::{ContentClassifier, TrustCounters};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

pub const AUTO_BAN_SPAM_REASON: &str = "Auto-banned for spam";
pub const AUTO_BAN_REPORTS_REASON: &str = "Auto-banned for multiple reports";

const REVIEW_STATUSES: &[&str] = &["resolved", "dismissed"];

/// Escalation thresholds and durations
#[derive(Debug, Clone)]
pub struct ModerationPolicy {
    pub report_ban_threshold: u32,
    pub spam_ban_threshold: u32,
    pub spam_window: Duration,
    pub auto_ban_days: i64,
}

impl ModerationPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            report_ban_threshold: config.report_ban_threshold,
            spam_ban_threshold: config.spam_ban_threshold,
            spam_window: Duration::seconds(config.spam_window_secs),
            auto_ban_days: config.auto_ban_days,
        }
    }
}

impl Default for ModerationPolicy {
    fn default() -> Self {
        Self {
            report_ban_threshold: 3,
            spam_ban_threshold: 3,
            spam_window: Duration::hours(1),
            auto_ban_days: 7,
        }
    }
}

/// Moderation coordinator: classifies submissions, updates trust counters,
/// and issues enforcement writes through the store.
pub struct ModerationService {
    store: Arc<dyn ModerationStore>,
    classifier: ContentClassifier,
    counters: TrustCounters,
    policy: ModerationPolicy,
}

impl ModerationService {
    pub fn new(store: Arc<dyn ModerationStore>, policy: ModerationPolicy) -> Self {
        Self {
            store,
            classifier: ContentClassifier::new(),
            counters: TrustCounters::new(policy.spam_window),
            policy,
        }
    }

    /// Classify a title/body pair without side effects
    pub fn classify(&self, title: &str, body: &str) -> Verdict {
        self.classifier.classify(title, body)
    }

    /// Create a listing. Flagged submissions are stored in pending review
    /// instead of going publicly active.
    pub async fn submit_listing(&self, input: NewListing) -> AppResult<Listing> {
        if input.title.trim().is_empty()
            || input.description.trim().is_empty()
            || input.category.trim().is_empty()
        {
            return Err(AppError::BadRequest(
                "Missing required fields: title, description, and category are required"
                    .to_string(),
            ));
        }

        let verdict = self.classifier.classify(&input.title, &input.description);
        let status = if verdict.flagged {
            ListingStatus::PendingReview
        } else {
            ListingStatus::Active
        };

        if verdict.flagged {
            tracing::info!(
                user_id = %input.user_id,
                reasons = ?verdict.reasons,
                "Listing flagged for review"
            );
        }

        self.store
            .insert_listing(ListingRecord {
                user_id: input.user_id,
                title: input.title,
                description: input.description,
                category: input.category,
                status,
                flagged: verdict.flagged,
                flag_reasons: verdict.reasons,
            })
            .await
    }

    /// Send a message. Rejects if the sender is banned, the body trips the
    /// spam rule, or the receiver has blocked the sender. A rejected spam
    /// message is never persisted.
    pub async fn send_message(&self, input: NewMessage) -> AppResult<Message> {
        if let Some(ban) = self.store.active_ban(input.sender_id).await? {
            return Err(AppError::Banned(ban.reason));
        }

        if self
            .check_spam_at(input.sender_id, &input.content, Utc::now())
            .await?
        {
            return Err(AppError::SpamRejected);
        }

        if self.is_blocked(input.sender_id, input.receiver_id).await? {
            return Err(AppError::BlockedByRecipient);
        }

        self.store.insert_message(input).await
    }

    /// Test `content` against the spam-pattern rule for `user_id`.
    ///
    /// A match records a spam incident; reaching the threshold within the
    /// window auto-bans the user. Returns whether the content matched.
    pub async fn check_spam(&self, user_id: Uuid, content: &str) -> AppResult<bool> {
        self.check_spam_at(user_id, content, Utc::now()).await
    }

    pub async fn check_spam_at(
        &self,
        user_id: Uuid,
        content: &str,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        if !self.classifier.matches_spam_patterns(content) {
            return Ok(false);
        }

        let count = self.counters.record_spam_incident(user_id, now);
        tracing::info!(
            user_id = %user_id,
            spam_count = %count,
            "Spam incident recorded"
        );

        if count >= self.policy.spam_ban_threshold {
            self.auto_ban(user_id, AUTO_BAN_SPAM_REASON).await?;
        }

        Ok(true)
    }

    /// File a report against a user. The third report within the process
    /// lifetime auto-bans the reported user.
    pub async fn report_user(
        &self,
        reporter_id: Uuid,
        reported_user_id: Uuid,
        reason: &str,
    ) -> AppResult<UserReport> {
        if reporter_id == reported_user_id {
            return Err(AppError::BadRequest("Cannot report yourself".to_string()));
        }
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(AppError::BadRequest(
                "Report reason is required".to_string(),
            ));
        }

        let report = self
            .store
            .insert_user_report(CreateUserReportInput {
                reporter_id,
                reported_user_id,
                reason: reason.to_string(),
            })
            .await?;

        let count = self.counters.record_report(reported_user_id);
        if count >= self.policy.report_ban_threshold {
            self.auto_ban(reported_user_id, AUTO_BAN_REPORTS_REASON)
                .await?;
        }

        Ok(report)
    }

    /// File a report against a listing (manual flag for the review queue)
    pub async fn flag_listing(
        &self,
        listing_id: Uuid,
        reporter_id: Uuid,
        reason: &str,
    ) -> AppResult<ListingReport> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(AppError::BadRequest(
                "Report reason is required".to_string(),
            ));
        }

        self.store
            .insert_listing_report(CreateListingReportInput {
                listing_id,
                reporter_id,
                reason: reason.to_string(),
            })
            .await
    }

    /// Ban a user. `banned_by` is the acting admin, or None for policy bans;
    /// a missing duration means permanent.
    pub async fn ban_user(
        &self,
        user_id: Uuid,
        reason: &str,
        banned_by: Option<Uuid>,
        duration_days: Option<i64>,
    ) -> AppResult<UserBan> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(AppError::BadRequest("Ban reason is required".to_string()));
        }

        self.store
            .insert_ban(CreateBanInput {
                user_id,
                reason: reason.to_string(),
                banned_by,
                duration_days,
            })
            .await
    }

    /// Lift a user's active ban. Trust counters are deliberately not reset,
    /// so repeat offenses keep accumulating across ban/unban cycles.
    pub async fn unban_user(&self, user_id: Uuid) -> AppResult<UserBan> {
        self.store.lift_ban(user_id).await
    }

    /// Record a one-directional block edge (blocker -> blocked)
    pub async fn block_user(&self, blocker_id: Uuid, blocked_id: Uuid) -> AppResult<UserBlock> {
        if blocker_id == blocked_id {
            return Err(AppError::BadRequest("Cannot block yourself".to_string()));
        }
        self.store.insert_block(blocker_id, blocked_id).await
    }

    /// Ids blocked by `user_id`
    pub async fn blocked_users(&self, user_id: Uuid) -> AppResult<Vec<Uuid>> {
        self.store.blocked_ids(user_id).await
    }

    /// Whether `receiver_id` has blocked `sender_id`
    pub async fn is_blocked(&self, sender_id: Uuid, receiver_id: Uuid) -> AppResult<bool> {
        self.store.is_blocked(receiver_id, sender_id).await
    }

    pub async fn active_ban(&self, user_id: Uuid) -> AppResult<Option<UserBan>> {
        self.store.active_ban(user_id).await
    }

    /// Whether `user_id` currently has an active ban
    pub async fn is_banned(&self, user_id: Uuid) -> AppResult<bool> {
        self.store.is_banned(user_id).await
    }

    pub async fn ban_history(&self, user_id: Uuid, active_only: bool) -> AppResult<Vec<UserBan>> {
        self.store.ban_history(user_id, active_only).await
    }

    pub async fn pending_user_reports(&self, limit: i64, offset: i64) -> AppResult<Vec<UserReport>> {
        self.store.pending_user_reports(limit, offset).await
    }

    pub async fn pending_listing_reports(
        &self,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<ListingReport>> {
        self.store.pending_listing_reports(limit, offset).await
    }

    /// Resolve or dismiss a user report (admin action)
    pub async fn review_user_report(
        &self,
        report_id: Uuid,
        reviewer_id: Uuid,
        status: &str,
        resolution: Option<String>,
    ) -> AppResult<UserReport> {
        Self::validate_review_status(status)?;
        self.store
            .review_user_report(report_id, reviewer_id, status, resolution)
            .await
    }

    /// Resolve or dismiss a listing report (admin action)
    pub async fn review_listing_report(
        &self,
        report_id: Uuid,
        reviewer_id: Uuid,
        status: &str,
        resolution: Option<String>,
    ) -> AppResult<ListingReport> {
        Self::validate_review_status(status)?;
        self.store
            .review_listing_report(report_id, reviewer_id, status, resolution)
            .await
    }

    fn validate_review_status(status: &str) -> AppResult<()> {
        if REVIEW_STATUSES.contains(&status) {
            Ok(())
        } else {
            Err(AppError::BadRequest(format!(
                "Invalid review status: {}",
                status
            )))
        }
    }

    async fn auto_ban(&self, user_id: Uuid, reason: &str) -> AppResult<UserBan> {
        tracing::warn!(
            user_id = %user_id,
            reason = %reason,
            "Auto-ban threshold reached"
        );

        self.store
            .insert_ban(CreateBanInput {
                user_id,
                reason: reason.to_string(),
                banned_by: None,
                duration_days: Some(self.policy.auto_ban_days),
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MockModerationStore;

    fn service(store: MockModerationStore) -> ModerationService {
        ModerationService::new(Arc::new(store), ModerationPolicy::default())
    }

    fn user_report_row(input: CreateUserReportInput) -> UserReport {
        UserReport {
            id: Uuid::new_v4(),
            reporter_id: input.reporter_id,
            reported_user_id: input.reported_user_id,
            reason: input.reason,
            status: "pending".to_string(),
            reviewed_by: None,
            reviewed_at: None,
            resolution: None,
            created_at: Utc::now(),
        }
    }

    fn ban_row(input: CreateBanInput) -> UserBan {
        let now = Utc::now();
        UserBan {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            reason: input.reason,
            banned_by: input.banned_by,
            starts_at: now,
            ends_at: input.duration_days.map(|days| now + Duration::days(days)),
            lifted_at: None,
            created_at: now,
        }
    }

    fn message_row(input: NewMessage) -> Message {
        Message {
            id: Uuid::new_v4(),
            sender_id: input.sender_id,
            receiver_id: input.receiver_id,
            listing_id: input.listing_id,
            content: input.content,
            read: false,
            created_at: Utc::now(),
        }
    }

    fn listing_row(record: ListingRecord) -> Listing {
        Listing {
            id: Uuid::new_v4(),
            user_id: record.user_id,
            title: record.title,
            description: record.description,
            category: record.category,
            status: record.status.as_str().to_string(),
            flagged: record.flagged,
            flag_reasons: record.flag_reasons,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_three_reports_trigger_exactly_one_auto_ban() {
        let mut store = MockModerationStore::new();
        let reported = Uuid::new_v4();

        store
            .expect_insert_user_report()
            .times(3)
            .returning(|input| Ok(user_report_row(input)));
        store
            .expect_insert_ban()
            .withf(move |input| {
                input.user_id == reported
                    && input.reason == AUTO_BAN_REPORTS_REASON
                    && input.banned_by.is_none()
                    && input.duration_days == Some(7)
            })
            .times(1)
            .returning(|input| Ok(ban_row(input)));

        let service = service(store);
        for _ in 0..3 {
            service
                .report_user(Uuid::new_v4(), reported, "spam listings")
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_two_reports_do_not_ban() {
        let mut store = MockModerationStore::new();
        store
            .expect_insert_user_report()
            .times(2)
            .returning(|input| Ok(user_report_row(input)));

        let service = service(store);
        let reported = Uuid::new_v4();
        service
            .report_user(Uuid::new_v4(), reported, "rude")
            .await
            .unwrap();
        service
            .report_user(Uuid::new_v4(), reported, "rude")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_report_counts_survive_unban() {
        let mut store = MockModerationStore::new();
        let reported = Uuid::new_v4();

        store
            .expect_insert_user_report()
            .times(3)
            .returning(|input| Ok(user_report_row(input)));
        store
            .expect_lift_ban()
            .times(1)
            .returning(|user_id| {
                let mut ban = ban_row(CreateBanInput {
                    user_id,
                    reason: "manual".to_string(),
                    banned_by: None,
                    duration_days: Some(7),
                });
                ban.lifted_at = Some(Utc::now());
                Ok(ban)
            });
        store
            .expect_insert_ban()
            .withf(|input| input.reason == AUTO_BAN_REPORTS_REASON)
            .times(1)
            .returning(|input| Ok(ban_row(input)));

        let service = service(store);
        service
            .report_user(Uuid::new_v4(), reported, "scam")
            .await
            .unwrap();
        service
            .report_user(Uuid::new_v4(), reported, "scam")
            .await
            .unwrap();
        service.unban_user(reported).await.unwrap();
        // Third report still crosses the threshold: counters were not reset
        service
            .report_user(Uuid::new_v4(), reported, "scam")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_self_report_is_rejected() {
        let store = MockModerationStore::new();
        let service = service(store);
        let user = Uuid::new_v4();

        let err = service.report_user(user, user, "meta").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_third_spam_incident_within_window_auto_bans() {
        let mut store = MockModerationStore::new();
        let sender = Uuid::new_v4();

        store
            .expect_insert_ban()
            .withf(move |input| {
                input.user_id == sender
                    && input.reason == AUTO_BAN_SPAM_REASON
                    && input.duration_days == Some(7)
            })
            .times(1)
            .returning(|input| Ok(ban_row(input)));

        let service = service(store);
        let t0 = Utc::now();

        assert!(service
            .check_spam_at(sender, "FREE MONEY click here", t0)
            .await
            .unwrap());
        assert!(service
            .check_spam_at(sender, "act now!!!!! viagra", t0 + Duration::minutes(5))
            .await
            .unwrap());
        assert!(service
            .check_spam_at(sender, "winner winner lottery", t0 + Duration::minutes(10))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_spam_incidents_outside_window_never_ban() {
        let store = MockModerationStore::new();
        let service = service(store);
        let sender = Uuid::new_v4();
        let t0 = Utc::now();

        // Each incident is two hours after the previous: the window resets
        for hours in [0, 2, 4, 6] {
            assert!(service
                .check_spam_at(sender, "easy money here", t0 + Duration::hours(hours))
                .await
                .unwrap());
        }
    }

    #[tokio::test]
    async fn test_clean_content_is_not_a_spam_incident() {
        let store = MockModerationStore::new();
        let service = service(store);

        let spam = service
            .check_spam(Uuid::new_v4(), "Would you trade the bike for my kayak?")
            .await
            .unwrap();
        assert!(!spam);
    }

    #[tokio::test]
    async fn test_spam_message_is_rejected_and_not_persisted() {
        let mut store = MockModerationStore::new();
        store.expect_active_ban().returning(|_| Ok(None));

        let service = service(store);
        let err = service
            .send_message(NewMessage {
                sender_id: Uuid::new_v4(),
                receiver_id: Uuid::new_v4(),
                listing_id: None,
                content: "click here for free money".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::SpamRejected));
    }

    #[tokio::test]
    async fn test_message_from_banned_sender_is_rejected() {
        let mut store = MockModerationStore::new();
        store.expect_active_ban().returning(|user_id| {
            Ok(Some(ban_row(CreateBanInput {
                user_id,
                reason: AUTO_BAN_SPAM_REASON.to_string(),
                banned_by: None,
                duration_days: Some(7),
            })))
        });

        let service = service(store);
        let err = service
            .send_message(NewMessage {
                sender_id: Uuid::new_v4(),
                receiver_id: Uuid::new_v4(),
                listing_id: None,
                content: "hello".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Banned(_)));
    }

    #[tokio::test]
    async fn test_message_to_blocking_receiver_is_rejected() {
        let mut store = MockModerationStore::new();
        let sender = Uuid::new_v4();
        let receiver = Uuid::new_v4();

        store.expect_active_ban().returning(|_| Ok(None));
        store
            .expect_is_blocked()
            .withf(move |blocker, blocked| *blocker == receiver && *blocked == sender)
            .times(1)
            .returning(|_, _| Ok(true));

        let service = service(store);
        let err = service
            .send_message(NewMessage {
                sender_id: sender,
                receiver_id: receiver,
                listing_id: None,
                content: "hello there".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BlockedByRecipient));
    }

    #[tokio::test]
    async fn test_clean_message_is_stored() {
        let mut store = MockModerationStore::new();
        store.expect_active_ban().returning(|_| Ok(None));
        store.expect_is_blocked().returning(|_, _| Ok(false));
        store
            .expect_insert_message()
            .times(1)
            .returning(|input| Ok(message_row(input)));

        let service = service(store);
        let message = service
            .send_message(NewMessage {
                sender_id: Uuid::new_v4(),
                receiver_id: Uuid::new_v4(),
                listing_id: None,
                content: "Is the kayak still available?".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(message.content, "Is the kayak still available?");
    }

    #[tokio::test]
    async fn test_flagged_listing_goes_to_pending_review() {
        let mut store = MockModerationStore::new();
        store
            .expect_insert_listing()
            .withf(|record| {
                record.status == ListingStatus::PendingReview
                    && record.flagged
                    && !record.flag_reasons.is_empty()
            })
            .times(1)
            .returning(|record| Ok(listing_row(record)));

        let service = service(store);
        let listing = service
            .submit_listing(NewListing {
                user_id: Uuid::new_v4(),
                title: "Selling my phone for cash".to_string(),
                description: "best price".to_string(),
                category: "electronics".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(listing.status, "pending_review");
    }

    #[tokio::test]
    async fn test_clean_listing_goes_active() {
        let mut store = MockModerationStore::new();
        store
            .expect_insert_listing()
            .withf(|record| {
                record.status == ListingStatus::Active
                    && !record.flagged
                    && record.flag_reasons.is_empty()
            })
            .times(1)
            .returning(|record| Ok(listing_row(record)));

        let service = service(store);
        let listing = service
            .submit_listing(NewListing {
                user_id: Uuid::new_v4(),
                title: "Mountain bike".to_string(),
                description: "Trade for a kayak".to_string(),
                category: "sports".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(listing.status, "active");
    }

    #[tokio::test]
    async fn test_listing_with_missing_fields_is_rejected_before_any_write() {
        let store = MockModerationStore::new();
        let service = service(store);

        let err = service
            .submit_listing(NewListing {
                user_id: Uuid::new_v4(),
                title: "  ".to_string(),
                description: "something".to_string(),
                category: "misc".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_is_blocked_checks_receivers_block_list() {
        let mut store = MockModerationStore::new();
        let sender = Uuid::new_v4();
        let receiver = Uuid::new_v4();

        store
            .expect_is_blocked()
            .withf(move |blocker, blocked| *blocker == receiver && *blocked == sender)
            .times(1)
            .returning(|_, _| Ok(true));

        let service = service(store);
        assert!(service.is_blocked(sender, receiver).await.unwrap());
    }

    #[tokio::test]
    async fn test_self_block_is_rejected() {
        let store = MockModerationStore::new();
        let service = service(store);
        let user = Uuid::new_v4();

        let err = service.block_user(user, user).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_admin_ban_without_duration_is_permanent() {
        let mut store = MockModerationStore::new();
        let admin = Uuid::new_v4();

        store
            .expect_insert_ban()
            .withf(move |input| input.banned_by == Some(admin) && input.duration_days.is_none())
            .times(1)
            .returning(|input| Ok(ban_row(input)));

        let service = service(store);
        let ban = service
            .ban_user(Uuid::new_v4(), "ToS violation", Some(admin), None)
            .await
            .unwrap();

        assert!(ban.ends_at.is_none());
    }

    #[tokio::test]
    async fn test_review_rejects_unknown_status() {
        let store = MockModerationStore::new();
        let service = service(store);

        let err = service
            .review_user_report(Uuid::new_v4(), Uuid::new_v4(), "pending", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
