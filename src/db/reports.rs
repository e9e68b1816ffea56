//! Database operations for user and listing reports

use crate::error::{AppError, AppResult};
use crate::models::{CreateListingReportInput, CreateUserReportInput, ListingReport, UserReport};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Database operations for reports
pub struct ReportsDb {
    pool: Arc<PgPool>,
}

impl ReportsDb {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Create a new user report
    pub async fn create_user_report(&self, input: CreateUserReportInput) -> AppResult<UserReport> {
        let report = sqlx::query_as::<_, UserReport>(
            r#"
            INSERT INTO user_reports (
                reporter_id,
                reported_user_id,
                reason,
                status,
                created_at
            )
            VALUES ($1, $2, $3, 'pending', NOW())
            RETURNING id, reporter_id, reported_user_id, reason, status,
                      reviewed_by, reviewed_at, resolution, created_at
            "#,
        )
        .bind(input.reporter_id)
        .bind(input.reported_user_id)
        .bind(&input.reason)
        .fetch_one(&*self.pool)
        .await?;

        tracing::info!(
            report_id = %report.id,
            reporter = %input.reporter_id,
            reported = %input.reported_user_id,
            "User report created"
        );

        Ok(report)
    }

    /// Create a new listing report
    pub async fn create_listing_report(
        &self,
        input: CreateListingReportInput,
    ) -> AppResult<ListingReport> {
        let report = sqlx::query_as::<_, ListingReport>(
            r#"
            INSERT INTO listing_reports (
                listing_id,
                reporter_id,
                reason,
                status,
                created_at
            )
            VALUES ($1, $2, $3, 'pending', NOW())
            RETURNING id, listing_id, reporter_id, reason, status,
                      reviewed_by, reviewed_at, resolution, created_at
            "#,
        )
        .bind(input.listing_id)
        .bind(input.reporter_id)
        .bind(&input.reason)
        .fetch_one(&*self.pool)
        .await?;

        tracing::info!(
            report_id = %report.id,
            listing_id = %input.listing_id,
            reporter = %input.reporter_id,
            "Listing report created"
        );

        Ok(report)
    }

    /// Get pending user reports (for admin queue)
    pub async fn get_pending_user_reports(
        &self,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<UserReport>> {
        let reports = sqlx::query_as::<_, UserReport>(
            r#"
            SELECT id, reporter_id, reported_user_id, reason, status,
                   reviewed_by, reviewed_at, resolution, created_at
            FROM user_reports
            WHERE status = 'pending'
            ORDER BY created_at ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&*self.pool)
        .await?;

        Ok(reports)
    }

    /// Get pending listing reports (for admin queue)
    pub async fn get_pending_listing_reports(
        &self,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<ListingReport>> {
        let reports = sqlx::query_as::<_, ListingReport>(
            r#"
            SELECT id, listing_id, reporter_id, reason, status,
                   reviewed_by, reviewed_at, resolution, created_at
            FROM listing_reports
            WHERE status = 'pending'
            ORDER BY created_at ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&*self.pool)
        .await?;

        Ok(reports)
    }

    /// Review a user report (admin action)
    pub async fn review_user_report(
        &self,
        report_id: Uuid,
        reviewer_id: Uuid,
        status: &str,
        resolution: Option<&str>,
    ) -> AppResult<UserReport> {
        let report = sqlx::query_as::<_, UserReport>(
            r#"
            UPDATE user_reports
            SET status = $2,
                reviewed_by = $3,
                reviewed_at = NOW(),
                resolution = $4
            WHERE id = $1
            RETURNING id, reporter_id, reported_user_id, reason, status,
                      reviewed_by, reviewed_at, resolution, created_at
            "#,
        )
        .bind(report_id)
        .bind(status)
        .bind(reviewer_id)
        .bind(resolution)
        .fetch_optional(&*self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", report_id)))?;

        tracing::info!(
            report_id = %report_id,
            reviewer_id = %reviewer_id,
            status = %status,
            "User report reviewed"
        );

        Ok(report)
    }

    /// Review a listing report (admin action)
    pub async fn review_listing_report(
        &self,
        report_id: Uuid,
        reviewer_id: Uuid,
        status: &str,
        resolution: Option<&str>,
    ) -> AppResult<ListingReport> {
        let report = sqlx::query_as::<_, ListingReport>(
            r#"
            UPDATE listing_reports
            SET status = $2,
                reviewed_by = $3,
                reviewed_at = NOW(),
                resolution = $4
            WHERE id = $1
            RETURNING id, listing_id, reporter_id, reason, status,
                      reviewed_by, reviewed_at, resolution, created_at
            "#,
        )
        .bind(report_id)
        .bind(status)
        .bind(reviewer_id)
        .bind(resolution)
        .fetch_optional(&*self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", report_id)))?;

        tracing::info!(
            report_id = %report_id,
            reviewer_id = %reviewer_id,
            status = %status,
            "Listing report reviewed"
        );

        Ok(report)
    }
}
