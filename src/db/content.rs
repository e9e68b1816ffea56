//! Database operations for moderated content intake

use crate::error::AppResult;
use crate::models::{Listing, ListingRecord, Message, NewMessage};
use sqlx::PgPool;
use std::sync::Arc;

/// Database operations for listings and messages
pub struct ContentDb {
    pool: Arc<PgPool>,
}

impl ContentDb {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Insert a listing with its moderation outcome already applied
    pub async fn create_listing(&self, record: ListingRecord) -> AppResult<Listing> {
        let listing = sqlx::query_as::<_, Listing>(
            r#"
            INSERT INTO listings (
                user_id,
                title,
                description,
                category,
                status,
                flagged,
                flag_reasons,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            RETURNING id, user_id, title, description, category, status,
                      flagged, flag_reasons, created_at
            "#,
        )
        .bind(record.user_id)
        .bind(&record.title)
        .bind(&record.description)
        .bind(&record.category)
        .bind(record.status.as_str())
        .bind(record.flagged)
        .bind(&record.flag_reasons)
        .fetch_one(&*self.pool)
        .await?;

        tracing::info!(
            listing_id = %listing.id,
            user_id = %record.user_id,
            status = %listing.status,
            flagged = %listing.flagged,
            "Listing created"
        );

        Ok(listing)
    }

    /// Insert a message that has passed all policy gates
    pub async fn create_message(&self, input: NewMessage) -> AppResult<Message> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (
                sender_id,
                receiver_id,
                listing_id,
                content,
                read,
                created_at
            )
            VALUES ($1, $2, $3, $4, FALSE, NOW())
            RETURNING id, sender_id, receiver_id, listing_id, content,
                      read, created_at
            "#,
        )
        .bind(input.sender_id)
        .bind(input.receiver_id)
        .bind(input.listing_id)
        .bind(&input.content)
        .fetch_one(&*self.pool)
        .await?;

        tracing::info!(
            message_id = %message.id,
            sender_id = %input.sender_id,
            receiver_id = %input.receiver_id,
            "Message stored"
        );

        Ok(message)
    }
}
