use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use userhub::{
    AppState, build_router, database, load_config, repository::PgUserRepository,
    shutdown::shutdown_signal,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,userhub=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config()?;
    tracing::debug!("loaded configuration:\n{}", config);

    let pool = database::connect(&config.database).await?;
    database::run_migrations(&pool).await?;

    if config.admin.email().is_none() {
        tracing::warn!(
            "USERHUB__ADMIN__EMAIL is not set; every authenticated user passes the admin gate"
        );
    }

    let repository = Arc::new(PgUserRepository::new(pool));
    let state = AppState::from_config(&config, repository)?;
    let app = build_router(state);

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!(%address, "userhub listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}
