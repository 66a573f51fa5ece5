use mockable::{DefaultClock, DefaultEnv};
use room_booking::{
    adapters::postgres::{PostgresReservationRepository, PostgresRoomRepository},
    api::{handlers::AppState, router::create_router},
    application::reservation::ServiceDependencies,
    config::AppConfig,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "room_booking=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env(&DefaultEnv::new())?;

    tracing::info!(
        allowed_days_ahead = config.policy.allowed_days_ahead,
        allowed_reservation_duration = config.policy.allowed_reservation_duration,
        "Reservation policy loaded"
    );

    // Initialize database connection pool
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    // Initialize adapters
    let room_repository = Arc::new(PostgresRoomRepository::new(pool.clone()));
    let reservation_repository = Arc::new(PostgresReservationRepository::new(pool.clone()));

    // Create service dependencies
    let service_deps = ServiceDependencies {
        room_repository,
        reservation_repository,
        clock: Arc::new(DefaultClock),
        policy: config.policy,
    };

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    // Server configuration
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app).await?;

    Ok(())
}
