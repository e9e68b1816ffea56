use crate::config::Config;
use crate::services::ModerationService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub moderation: Arc<ModerationService>,
}
