mod config;
mod error;
mod routes;

use habit_core::services::HabitService;

use config::AppConfig;
use routes::{app_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Only load .env in development; production uses platform-native env injection.
    #[cfg(debug_assertions)]
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("habit_api=info".parse()?),
        )
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!("Starting habit-api with config: {:?}", config);

    let service = match config.db_path.as_ref() {
        Some(path) => HabitService::open_path(path).await?,
        None => {
            tracing::info!("Using in-memory habit database");
            HabitService::open_in_memory().await?
        }
    };
    if config.seed_defaults {
        service.seed_defaults_if_empty().await?;
    }

    let router = app_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("habit-api listening on {}", config.bind_addr);
    axum::serve(listener, router).await?;
    Ok(())
}
