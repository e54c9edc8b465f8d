//! API Server Module
//!
//! Provides the axum application builder and server startup logic.
//! Consolidates application state and router configuration.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::middleware::{self, RateLimitState};
use crate::api::routes;
use crate::config::Config;
use crate::daemon::DaemonRpc;
use crate::resolver::{
    AccountResolver, BlockResolver, ConstructionResolver, NetworkResolver, SyncResolver,
    TransactionResolver,
};

/// Combined application state for all API endpoints
pub struct AppState {
    pub network: NetworkResolver,
    pub blocks: BlockResolver,
    pub transactions: Arc<TransactionResolver>,
    pub accounts: AccountResolver,
    pub construction: ConstructionResolver,
    /// Present only in production mode
    pub rate_limiter: Option<RateLimitState>,
}

/// Shared application state type
pub type SharedAppState = Arc<AppState>;

impl AppState {
    /// Wire every resolver to one daemon handle
    pub fn new(daemon: Arc<dyn DaemonRpc>, config: &Config) -> SharedAppState {
        let sync = Arc::new(SyncResolver::new(daemon.clone()));
        let transactions = Arc::new(TransactionResolver::new(
            daemon.clone(),
            config.tx_confirmations,
        ));

        Arc::new(Self {
            network: NetworkResolver::new(daemon.clone(), sync),
            blocks: BlockResolver::new(
                daemon.clone(),
                transactions.clone(),
                config.block_confirmations,
            ),
            transactions,
            accounts: AccountResolver::new(daemon.clone()),
            construction: ConstructionResolver::new(daemon),
            rate_limiter: config
                .production
                .then(middleware::create_rate_limiter),
        })
    }
}

/// Create the API router with all endpoints
pub fn create_router(state: SharedAppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health))
        .route("/network/list", post(routes::network::list))
        .route("/network/status", post(routes::network::status))
        .route("/network/options", post(routes::network::options))
        .route("/block", post(routes::block::block))
        .route("/block/transaction", post(routes::block::block_transaction))
        .route("/mempool", post(routes::mempool::mempool))
        .route("/account/balance", post(routes::account::balance))
        .route("/account/coins", post(routes::account::coins))
        .route("/construction/derive", post(routes::construction::derive))
        .route("/construction/payloads", post(routes::construction::payloads))
        .route("/construction/parse", post(routes::construction::parse))
        .route("/construction/submit", post(routes::construction::submit))
        .route("/call", post(routes::construction::call))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit,
        ))
        .layer(axum::middleware::from_fn(middleware::track_requests))
        .layer(cors)
        .with_state(state)
}

/// Start the API server
pub async fn start_server(state: SharedAppState, port: u16) -> Result<(), std::io::Error> {
    let app = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "rosetta gateway listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}
