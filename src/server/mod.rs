// HTTP surface for profile lookups and coaching requests

mod handlers;

pub use handlers::{create_router, ApiError, CoachingRequest, CoachingResponse, SummonerQuery};

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::client::RiotApiClient;
use crate::api::openai::OpenAiClient;
use crate::api::{GameDataProvider, TextGenerator};
use crate::config::Config;
use crate::lookup::BatchPolicy;

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub game_data: Arc<dyn GameDataProvider>,
    pub text_generator: Arc<dyn TextGenerator>,
    pub batch_policy: BatchPolicy,
}

impl AppState {
    pub fn from_config(config: Config) -> Self {
        let game_data = Arc::new(RiotApiClient::new(&config));
        let text_generator = Arc::new(OpenAiClient::new(&config));

        AppState {
            config: Arc::new(config),
            game_data,
            text_generator,
            batch_policy: BatchPolicy::default(),
        }
    }
}

/// Binds `config.bind_address` and serves until the process exits.
pub async fn serve(state: AppState) -> Result<()> {
    let addr: SocketAddr = state
        .config
        .bind_address
        .parse()
        .with_context(|| format!("invalid bind address {}", state.config.bind_address))?;

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!("Starting coaching API on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
