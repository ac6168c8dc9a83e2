//! shift-server — workforce scheduling HTTP service

use shared::models::{ManagerCreate, OrganizationCreate};
use shared::{AppError, ErrorCode};
use shift_server::config::BootstrapConfig;
use shift_server::utils::logger::init_logger;
use shift_server::{AppState, Config, api};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    init_logger(config.log_json);

    tracing::info!("Starting shift-server (env: {})", config.environment);

    let state = AppState::new(&config).await?;

    if let Some(bootstrap) = &config.bootstrap {
        bootstrap_organization(&state, bootstrap).await?;
    }

    let app = api::build_app(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("shift-server HTTP listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shift-server stopped");
    Ok(())
}

/// Create the configured organization and its first manager if the short key
/// is not taken yet
async fn bootstrap_organization(state: &AppState, bootstrap: &BootstrapConfig) -> Result<(), AppError> {
    match state.identity.find_by_short_key(&bootstrap.short_key).await {
        Ok(org) => {
            tracing::info!(organization_id = org.id, short_key = %org.short_key, "Bootstrap organization present");
            Ok(())
        }
        Err(e) if e.code == ErrorCode::OrganizationNotFound => {
            let org = state
                .identity
                .create_organization(OrganizationCreate {
                    name: bootstrap.organization_name.clone(),
                    short_key: bootstrap.short_key.clone(),
                    default_photo: None,
                })
                .await?;
            let manager = state
                .identity
                .create_manager(
                    org.id,
                    ManagerCreate {
                        username: bootstrap.manager_username.clone(),
                        password: bootstrap.manager_password.clone(),
                    },
                )
                .await?;
            tracing::info!(
                organization_id = org.id,
                manager_id = manager.id,
                "Bootstrap organization created"
            );
            Ok(())
        }
        Err(e) => Err(e),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
