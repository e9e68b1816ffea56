//! Enforcement models (reports, bans, blocks)

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// User report record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserReport {
    pub id: Uuid,
    pub reporter_id: Uuid,
    pub reported_user_id: Uuid,
    pub reason: String,
    pub status: String,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub resolution: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Listing report record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ListingReport {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub reporter_id: Uuid,
    pub reason: String,
    pub status: String,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub resolution: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// User ban record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserBan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub reason: String,
    /// None for automatic bans issued by policy
    pub banned_by: Option<Uuid>,
    pub starts_at: DateTime<Utc>,
    /// None means permanent
    pub ends_at: Option<DateTime<Utc>>,
    pub lifted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Block edge record from database (blocker -> blocked)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserBlock {
    pub id: Uuid,
    pub blocker_id: Uuid,
    pub blocked_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user report
#[derive(Debug, Clone)]
pub struct CreateUserReportInput {
    pub reporter_id: Uuid,
    pub reported_user_id: Uuid,
    pub reason: String,
}

/// Input for creating a new listing report
#[derive(Debug, Clone)]
pub struct CreateListingReportInput {
    pub listing_id: Uuid,
    pub reporter_id: Uuid,
    pub reason: String,
}

/// Input for creating a new ban
#[derive(Debug, Clone)]
pub struct CreateBanInput {
    pub user_id: Uuid,
    pub reason: String,
    pub banned_by: Option<Uuid>,
    /// None means permanent
    pub duration_days: Option<i64>,
}
