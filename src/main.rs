use dotenvy::dotenv;
use storefront::{
    config::{
        database::{create_connection, create_tables},
        site::load_app_config,
    },
    core::settings::seed_site_settings,
    errors::Result,
    web::{AppState, build_router},
};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = load_app_config()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;
    info!(bind = %app_config.bind_address, "Configuration loaded.");

    // 4. Connect and make sure every table exists
    let db = create_connection(&app_config.database_url)
        .await
        .inspect(|_| info!("Database connected."))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed the site settings row if it is missing
    let state = AppState::new(db, app_config);
    seed_site_settings(&state.db, &state.fallback_settings)
        .await
        .inspect(|seeded| info!(seeded, "Site settings checked."))
        .inspect_err(|e| error!("Failed to seed site settings: {}", e))?;

    // 6. Serve
    let bind_address = state.config.bind_address;
    let listener = TcpListener::bind(bind_address)
        .await
        .inspect_err(|e| error!("Failed to bind {}: {}", bind_address, e))?;
    info!("Storefront listening on http://{}", bind_address);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
