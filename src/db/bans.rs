//! Database operations for user bans

use crate::error::{AppError, AppResult};
use crate::models::{CreateBanInput, UserBan};
use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Database operations for user bans
pub struct BansDb {
    pool: Arc<PgPool>,
}

impl BansDb {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Ban a user
    pub async fn create_ban(&self, input: CreateBanInput) -> AppResult<UserBan> {
        let ends_at = input
            .duration_days
            .filter(|&days| days > 0)
            .map(|days| Utc::now() + Duration::days(days));

        let ban = sqlx::query_as::<_, UserBan>(
            r#"
            INSERT INTO user_bans (
                user_id,
                reason,
                banned_by,
                starts_at,
                ends_at,
                created_at
            )
            VALUES ($1, $2, $3, NOW(), $4, NOW())
            RETURNING id, user_id, reason, banned_by, starts_at, ends_at,
                      lifted_at, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.reason)
        .bind(input.banned_by)
        .bind(ends_at)
        .fetch_one(&*self.pool)
        .await?;

        tracing::warn!(
            ban_id = %ban.id,
            user_id = %input.user_id,
            reason = %input.reason,
            banned_by = ?input.banned_by,
            ends_at = ?ends_at,
            "User banned"
        );

        Ok(ban)
    }

    /// Get the active ban for a user, if any
    pub async fn get_active_ban(&self, user_id: Uuid) -> AppResult<Option<UserBan>> {
        let ban = sqlx::query_as::<_, UserBan>(
            r#"
            SELECT id, user_id, reason, banned_by, starts_at, ends_at,
                   lifted_at, created_at
            FROM user_bans
            WHERE user_id = $1
              AND lifted_at IS NULL
              AND (ends_at IS NULL OR ends_at > NOW())
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(ban)
    }

    /// Check if user is banned (simple boolean check)
    pub async fn is_user_banned(&self, user_id: Uuid) -> AppResult<bool> {
        let is_banned: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM user_bans
                WHERE user_id = $1
                  AND lifted_at IS NULL
                  AND (ends_at IS NULL OR ends_at > NOW())
            )
            "#,
        )
        .bind(user_id)
        .fetch_one(&*self.pool)
        .await?;

        Ok(is_banned)
    }

    /// Get ban history for a user
    pub async fn get_user_bans(&self, user_id: Uuid, active_only: bool) -> AppResult<Vec<UserBan>> {
        let bans = if active_only {
            sqlx::query_as::<_, UserBan>(
                r#"
                SELECT id, user_id, reason, banned_by, starts_at, ends_at,
                       lifted_at, created_at
                FROM user_bans
                WHERE user_id = $1
                  AND lifted_at IS NULL
                  AND (ends_at IS NULL OR ends_at > NOW())
                ORDER BY created_at DESC
                "#,
            )
            .bind(user_id)
            .fetch_all(&*self.pool)
            .await?
        } else {
            sqlx::query_as::<_, UserBan>(
                r#"
                SELECT id, user_id, reason, banned_by, starts_at, ends_at,
                       lifted_at, created_at
                FROM user_bans
                WHERE user_id = $1
                ORDER BY created_at DESC
                "#,
            )
            .bind(user_id)
            .fetch_all(&*self.pool)
            .await?
        };

        Ok(bans)
    }

    /// Lift every active ban for a user. Trust counters are left untouched.
    pub async fn lift_ban(&self, user_id: Uuid) -> AppResult<UserBan> {
        let lifted = sqlx::query_as::<_, UserBan>(
            r#"
            UPDATE user_bans
            SET lifted_at = NOW()
            WHERE user_id = $1
              AND lifted_at IS NULL
              AND (ends_at IS NULL OR ends_at > NOW())
            RETURNING id, user_id, reason, banned_by, starts_at, ends_at,
                      lifted_at, created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&*self.pool)
        .await?;

        let ban = lifted
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("No active ban for user {}", user_id)))?;

        tracing::info!(
            ban_id = %ban.id,
            user_id = %user_id,
            "Ban lifted"
        );

        Ok(ban)
    }
}
