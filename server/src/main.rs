mod config;
mod routes;
mod state;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Missing .env is normal outside local development.
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt::init();
    if let Err(e) = dotenv {
        tracing::debug!(error = %e, "no .env loaded");
    }

    let config = config::ServerConfig::from_env()?;
    let port = config.port;
    tracing::info!(
        api_base_url = %config.api_base_url,
        api_timeout_secs = config.api_timeout.as_secs(),
        proxy_api = config.proxy_api,
        "configuration loaded"
    );

    let state = state::AppState::new(config)?;
    let app = routes::leptos_app(state)?;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!(%port, "contacthub listening");
    axum::serve(listener, app).await?;
    Ok(())
}
