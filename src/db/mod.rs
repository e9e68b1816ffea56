pub mod bans;
pub mod blocks;
pub mod content;
pub mod reports;

pub use bans::BansDb;
pub use blocks::BlocksDb;
pub use content::ContentDb;
pub use reports::ReportsDb;

use crate::error::AppResult;
use crate::models::{
    CreateBanInput, CreateListingReportInput, CreateUserReportInput, Listing, ListingRecord,
    ListingReport, Message, NewMessage, UserBan, UserBlock, UserReport,
};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Storage capabilities the moderation policy layer depends on.
///
/// The production implementation is [`PgStore`]; tests substitute a mock so
/// policy decisions can be exercised without a database.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModerationStore: Send + Sync {
    async fn insert_user_report(&self, input: CreateUserReportInput) -> AppResult<UserReport>;
    async fn insert_listing_report(
        &self,
        input: CreateListingReportInput,
    ) -> AppResult<ListingReport>;
    async fn insert_ban(&self, input: CreateBanInput) -> AppResult<UserBan>;
    async fn lift_ban(&self, user_id: Uuid) -> AppResult<UserBan>;
    async fn active_ban(&self, user_id: Uuid) -> AppResult<Option<UserBan>>;
    async fn is_banned(&self, user_id: Uuid) -> AppResult<bool>;
    async fn ban_history(&self, user_id: Uuid, active_only: bool) -> AppResult<Vec<UserBan>>;
    async fn insert_block(&self, blocker_id: Uuid, blocked_id: Uuid) -> AppResult<UserBlock>;
    async fn blocked_ids(&self, blocker_id: Uuid) -> AppResult<Vec<Uuid>>;
    async fn is_blocked(&self, blocker_id: Uuid, blocked_id: Uuid) -> AppResult<bool>;
    async fn insert_listing(&self, record: ListingRecord) -> AppResult<Listing>;
    async fn insert_message(&self, input: NewMessage) -> AppResult<Message>;
    async fn pending_user_reports(&self, limit: i64, offset: i64) -> AppResult<Vec<UserReport>>;
    async fn pending_listing_reports(
        &self,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<ListingReport>>;
    async fn review_user_report(
        &self,
        report_id: Uuid,
        reviewer_id: Uuid,
        status: &str,
        resolution: Option<String>,
    ) -> AppResult<UserReport>;
    async fn review_listing_report(
        &self,
        report_id: Uuid,
        reviewer_id: Uuid,
        status: &str,
        resolution: Option<String>,
    ) -> AppResult<ListingReport>;
}

/// PostgreSQL-backed store composed of per-aggregate database modules
pub struct PgStore {
    reports: ReportsDb,
    bans: BansDb,
    blocks: BlocksDb,
    content: ContentDb,
}

impl PgStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            reports: ReportsDb::new(pool.clone()),
            bans: BansDb::new(pool.clone()),
            blocks: BlocksDb::new(pool.clone()),
            content: ContentDb::new(pool),
        }
    }
}

#[async_trait]
impl ModerationStore for PgStore {
    async fn insert_user_report(&self, input: CreateUserReportInput) -> AppResult<UserReport> {
        self.reports.create_user_report(input).await
    }

    async fn insert_listing_report(
        &self,
        input: CreateListingReportInput,
    ) -> AppResult<ListingReport> {
        self.reports.create_listing_report(input).await
    }

    async fn insert_ban(&self, input: CreateBanInput) -> AppResult<UserBan> {
        self.bans.create_ban(input).await
    }

    async fn lift_ban(&self, user_id: Uuid) -> AppResult<UserBan> {
        self.bans.lift_ban(user_id).await
    }

    async fn active_ban(&self, user_id: Uuid) -> AppResult<Option<UserBan>> {
        self.bans.get_active_ban(user_id).await
    }

    async fn is_banned(&self, user_id: Uuid) -> AppResult<bool> {
        self.bans.is_user_banned(user_id).await
    }

    async fn ban_history(&self, user_id: Uuid, active_only: bool) -> AppResult<Vec<UserBan>> {
        self.bans.get_user_bans(user_id, active_only).await
    }

    async fn insert_block(&self, blocker_id: Uuid, blocked_id: Uuid) -> AppResult<UserBlock> {
        self.blocks.create_block(blocker_id, blocked_id).await
    }

    async fn blocked_ids(&self, blocker_id: Uuid) -> AppResult<Vec<Uuid>> {
        self.blocks.get_blocked_ids(blocker_id).await
    }

    async fn is_blocked(&self, blocker_id: Uuid, blocked_id: Uuid) -> AppResult<bool> {
        self.blocks.is_blocked(blocker_id, blocked_id).await
    }

    async fn insert_listing(&self, record: ListingRecord) -> AppResult<Listing> {
        self.content.create_listing(record).await
    }

    async fn insert_message(&self, input: NewMessage) -> AppResult<Message> {
        self.content.create_message(input).await
    }

    async fn pending_user_reports(&self, limit: i64, offset: i64) -> AppResult<Vec<UserReport>> {
        self.reports.get_pending_user_reports(limit, offset).await
    }

    async fn pending_listing_reports(
        &self,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<ListingReport>> {
        self.reports
            .get_pending_listing_reports(limit, offset)
            .await
    }

    async fn review_user_report(
        &self,
        report_id: Uuid,
        reviewer_id: Uuid,
        status: &str,
        resolution: Option<String>,
    ) -> AppResult<UserReport> {
        self.reports
            .review_user_report(report_id, reviewer_id, status, resolution.as_deref())
            .await
    }

    async fn review_listing_report(
        &self,
        report_id: Uuid,
        reviewer_id: Uuid,
        status: &str,
        resolution: Option<String>,
    ) -> AppResult<ListingReport> {
        self.reports
            .review_listing_report(report_id, reviewer_id, status, resolution.as_deref())
            .await
    }
}
