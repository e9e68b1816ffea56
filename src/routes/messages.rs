use crate::error::AppError;
use crate::models::NewMessage;
use crate::state::AppState;
use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub listing_id: Option<Uuid>,
    pub content: String,
}

/// Send a message. Rejected with a policy error when the sender is banned,
/// the body trips the spam rule, or the receiver has blocked the sender.
/// POST /api/v1/messages
#[post("/api/v1/messages")]
pub async fn send_message(
    state: web::Data<AppState>,
    body: web::Json<SendMessageRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let message = state
        .moderation
        .send_message(NewMessage {
            sender_id: body.sender_id,
            receiver_id: body.receiver_id,
            listing_id: body.listing_id,
            content: body.content,
        })
        .await?;

    Ok(HttpResponse::Created().json(message))
}

/// Configure message routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(send_message);
}
