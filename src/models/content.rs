use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Publication state of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Active,
    PendingReview,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Active => "active",
            ListingStatus::PendingReview => "pending_review",
        }
    }
}

/// Listing record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Listing {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub flagged: bool,
    pub flag_reasons: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Message record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub listing_id: Option<Uuid>,
    pub content: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new listing
#[derive(Debug, Clone)]
pub struct NewListing {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
}

/// Input for sending a message
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub listing_id: Option<Uuid>,
    pub content: String,
}

/// Listing fields as decided by moderation, ready for insertion
#[derive(Debug, Clone)]
pub struct ListingRecord {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: ListingStatus,
    pub flagged: bool,
    pub flag_reasons: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_status_as_str() {
        assert_eq!(ListingStatus::Active.as_str(), "active");
        assert_eq!(ListingStatus::PendingReview.as_str(), "pending_review");
    }
}
