pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Listing, ListingStatus, Message, UserBan, UserBlock, UserReport, Verdict};
pub use services::{ContentClassifier, ModerationService, TrustCounters};
