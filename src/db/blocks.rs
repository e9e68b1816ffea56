//! Database operations for block edges

use crate::error::AppResult;
use crate::models::UserBlock;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Database operations for one-directional block edges
pub struct BlocksDb {
    pool: Arc<PgPool>,
}

impl BlocksDb {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Record a block edge (blocker -> blocked)
    pub async fn create_block(&self, blocker_id: Uuid, blocked_id: Uuid) -> AppResult<UserBlock> {
        let block = sqlx::query_as::<_, UserBlock>(
            r#"
            INSERT INTO user_blocks (blocker_id, blocked_id, created_at)
            VALUES ($1, $2, NOW())
            RETURNING id, blocker_id, blocked_id, created_at
            "#,
        )
        .bind(blocker_id)
        .bind(blocked_id)
        .fetch_one(&*self.pool)
        .await?;

        tracing::info!(
            blocker_id = %blocker_id,
            blocked_id = %blocked_id,
            "User blocked"
        );

        Ok(block)
    }

    /// Get the ids a user has blocked
    pub async fn get_blocked_ids(&self, blocker_id: Uuid) -> AppResult<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT blocked_id
            FROM user_blocks
            WHERE blocker_id = $1
            "#,
        )
        .bind(blocker_id)
        .fetch_all(&*self.pool)
        .await?;

        Ok(ids)
    }

    /// Check whether `blocker_id` has blocked `blocked_id`
    pub async fn is_blocked(&self, blocker_id: Uuid, blocked_id: Uuid) -> AppResult<bool> {
        let blocked: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM user_blocks
                WHERE blocker_id = $1 AND blocked_id = $2
            )
            "#,
        )
        .bind(blocker_id)
        .bind(blocked_id)
        .fetch_one(&*self.pool)
        .await?;

        Ok(blocked)
    }
}
