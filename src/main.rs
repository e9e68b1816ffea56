use actix_web::{web, App, HttpServer};
use moderation_service::{
    config::Config,
    db::PgStore,
    logging, routes,
    services::{ModerationPolicy, ModerationService},
    state::AppState,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing();

    tracing::info!("Starting Moderation & Trust Service...");

    // Load configuration
    let config = Arc::new(Config::from_env()?);
    tracing::info!(
        service = %config.service_name,
        environment = %config.environment,
        port = %config.port,
        "Configuration loaded"
    );

    // Initialize database pool
    let pool = Arc::new(
        PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(&config.database_url)
            .await?,
    );
    tracing::info!("Database pool initialized");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&*pool).await.map_err(|e| {
        tracing::error!("Migration failed: {}", e);
        e
    })?;
    tracing::info!("Migrations completed successfully");

    // Initialize moderation service
    let store = Arc::new(PgStore::new(pool));
    let moderation = Arc::new(ModerationService::new(
        store,
        ModerationPolicy::from_config(&config),
    ));
    tracing::info!("Moderation service initialized");

    let state = AppState {
        config: config.clone(),
        moderation,
    };

    let bind_addr = format!("{}:{}", config.host, config.port);
    tracing::info!(%bind_addr, "starting moderation-service");

    HttpServer::new(move || {
        let cors = actix_cors::Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
            .route("/health", web::get().to(|| async { "OK" }))
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}
