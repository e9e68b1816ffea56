use crate::error::AppError;
use crate::state::AppState;
use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==================== Request/Response Types ====================

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ReportUserRequest {
    pub reporter_id: Uuid,
    pub reported_user_id: Uuid,
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct ReportListingRequest {
    pub listing_id: Uuid,
    pub reporter_id: Uuid,
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct BlockUserRequest {
    pub blocker_id: Uuid,
    pub blocked_user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct BlockStatusResponse {
    pub blocked: bool,
}

#[derive(Debug, Serialize)]
pub struct BanStatusResponse {
    pub banned: bool,
}

// ==================== Classification ====================

/// Classify a title/body pair without side effects
/// POST /api/v1/moderation/classify
#[post("/api/v1/moderation/classify")]
pub async fn classify(
    state: web::Data<AppState>,
    body: web::Json<ClassifyRequest>,
) -> Result<HttpResponse, AppError> {
    let verdict = state.moderation.classify(&body.title, &body.description);
    Ok(HttpResponse::Ok().json(verdict))
}

// ==================== Reports ====================

/// Report a user; the report threshold may auto-ban the reported user
/// POST /api/v1/reports/users
#[post("/api/v1/reports/users")]
pub async fn report_user(
    state: web::Data<AppState>,
    body: web::Json<ReportUserRequest>,
) -> Result<HttpResponse, AppError> {
    let report = state
        .moderation
        .report_user(body.reporter_id, body.reported_user_id, &body.reason)
        .await?;

    Ok(HttpResponse::Created().json(report))
}

/// Report a listing for manual review
/// POST /api/v1/reports/listings
#[post("/api/v1/reports/listings")]
pub async fn report_listing(
    state: web::Data<AppState>,
    body: web::Json<ReportListingRequest>,
) -> Result<HttpResponse, AppError> {
    let report = state
        .moderation
        .flag_listing(body.listing_id, body.reporter_id, &body.reason)
        .await?;

    Ok(HttpResponse::Created().json(report))
}

/// Whether a user currently has an active ban
/// GET /api/v1/moderation/users/{user_id}/ban-status
#[get("/api/v1/moderation/users/{user_id}/ban-status")]
pub async fn get_ban_status(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let banned = state.moderation.is_banned(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(BanStatusResponse { banned }))
}

// ==================== Blocks ====================

/// Block a user
/// POST /api/v1/blocks
#[post("/api/v1/blocks")]
pub async fn block_user(
    state: web::Data<AppState>,
    body: web::Json<BlockUserRequest>,
) -> Result<HttpResponse, AppError> {
    let block = state
        .moderation
        .block_user(body.blocker_id, body.blocked_user_id)
        .await?;

    Ok(HttpResponse::Created().json(block))
}

/// Get the ids a user has blocked
/// GET /api/v1/blocks/{user_id}
#[get("/api/v1/blocks/{user_id}")]
pub async fn get_blocked_users(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let blocked = state.moderation.blocked_users(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(blocked))
}

/// Whether `blocker_id` has blocked `blocked_id`
/// GET /api/v1/blocks/{blocker_id}/{blocked_id}
#[get("/api/v1/blocks/{blocker_id}/{blocked_id}")]
pub async fn get_block_status(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
    let (blocker_id, blocked_id) = path.into_inner();
    let blocked = state.moderation.is_blocked(blocked_id, blocker_id).await?;

    Ok(HttpResponse::Ok().json(BlockStatusResponse { blocked }))
}

/// Configure moderation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(classify)
        .service(get_ban_status)
        .service(report_user)
        .service(report_listing)
        .service(block_user)
        .service(get_blocked_users)
        .service(get_block_status);
}
