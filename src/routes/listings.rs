use crate::error::AppError;
use crate::models::NewListing;
use crate::state::AppState;
use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateListingRequest {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
}

/// Create a listing; flagged submissions land in pending review
/// POST /api/v1/listings
#[post("/api/v1/listings")]
pub async fn create_listing(
    state: web::Data<AppState>,
    body: web::Json<CreateListingRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let listing = state
        .moderation
        .submit_listing(NewListing {
            user_id: body.user_id,
            title: body.title,
            description: body.description,
            category: body.category,
        })
        .await?;

    Ok(HttpResponse::Created().json(listing))
}

/// Configure listing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_listing);
}
