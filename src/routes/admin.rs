use crate::error::AppError;
use crate::state::AppState;
use actix_web::{delete, get, post, web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

// ==================== Request/Response Types ====================

#[derive(Debug, Deserialize)]
pub struct BanUserRequest {
    pub user_id: Uuid,
    pub reason: String,
    pub banned_by: Option<Uuid>,
    /// Days until the ban expires; absent means permanent
    pub duration_days: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewReportRequest {
    pub reviewer_id: Uuid,
    pub status: String,
    pub resolution: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BanHistoryQuery {
    pub active_only: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ==================== Bans ====================

/// Ban a user (admin action)
/// POST /api/v1/admin/bans
#[post("/api/v1/admin/bans")]
pub async fn ban_user(
    state: web::Data<AppState>,
    body: web::Json<BanUserRequest>,
) -> Result<HttpResponse, AppError> {
    let ban = state
        .moderation
        .ban_user(body.user_id, &body.reason, body.banned_by, body.duration_days)
        .await?;

    Ok(HttpResponse::Created().json(ban))
}

/// Lift a user's active ban
/// DELETE /api/v1/admin/bans/{user_id}
#[delete("/api/v1/admin/bans/{user_id}")]
pub async fn unban_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let ban = state.moderation.unban_user(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "lifted_ban_id": ban.id,
    })))
}

/// Get ban history for a user
/// GET /api/v1/admin/bans/{user_id}
#[get("/api/v1/admin/bans/{user_id}")]
pub async fn get_ban_history(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<BanHistoryQuery>,
) -> Result<HttpResponse, AppError> {
    let bans = state
        .moderation
        .ban_history(path.into_inner(), query.active_only.unwrap_or(false))
        .await?;

    Ok(HttpResponse::Ok().json(bans))
}

// ==================== Report queue ====================

/// Get pending user reports
/// GET /api/v1/admin/reports/users/pending
#[get("/api/v1/admin/reports/users/pending")]
pub async fn pending_user_reports(
    state: web::Data<AppState>,
    query: web::Query<PaginationQuery>,
) -> Result<HttpResponse, AppError> {
    let limit = query.limit.unwrap_or(50).min(100);
    let offset = query.offset.unwrap_or(0);

    let reports = state.moderation.pending_user_reports(limit, offset).await?;
    Ok(HttpResponse::Ok().json(reports))
}

/// Get pending listing reports
/// GET /api/v1/admin/reports/listings/pending
#[get("/api/v1/admin/reports/listings/pending")]
pub async fn pending_listing_reports(
    state: web::Data<AppState>,
    query: web::Query<PaginationQuery>,
) -> Result<HttpResponse, AppError> {
    let limit = query.limit.unwrap_or(50).min(100);
    let offset = query.offset.unwrap_or(0);

    let reports = state
        .moderation
        .pending_listing_reports(limit, offset)
        .await?;
    Ok(HttpResponse::Ok().json(reports))
}

/// Resolve or dismiss a user report
/// POST /api/v1/admin/reports/users/{id}/review
#[post("/api/v1/admin/reports/users/{id}/review")]
pub async fn review_user_report(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<ReviewReportRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let report = state
        .moderation
        .review_user_report(path.into_inner(), body.reviewer_id, &body.status, body.resolution)
        .await?;

    Ok(HttpResponse::Ok().json(report))
}

/// Resolve or dismiss a listing report
/// POST /api/v1/admin/reports/listings/{id}/review
#[post("/api/v1/admin/reports/listings/{id}/review")]
pub async fn review_listing_report(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<ReviewReportRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let report = state
        .moderation
        .review_listing_report(path.into_inner(), body.reviewer_id, &body.status, body.resolution)
        .await?;

    Ok(HttpResponse::Ok().json(report))
}

/// Configure admin routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(ban_user)
        .service(unban_user)
        .service(get_ban_history)
        .service(pending_user_reports)
        .service(pending_listing_reports)
        .service(review_user_report)
        .service(review_listing_report);
}
