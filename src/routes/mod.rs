pub mod admin;
pub mod listings;
pub mod messages;
pub mod moderation;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    listings::configure(cfg);
    messages::configure(cfg);
    moderation::configure(cfg);
    admin::configure(cfg);
}
