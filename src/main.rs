// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;

use crate::application::dispatcher::RenderDispatcher;
use crate::infrastructure::config::load_board_config;
use crate::infrastructure::figure_backend::FigureBackend;
use crate::infrastructure::sim_source::SimulatedMetricSource;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let board_config = load_board_config()?;

    // Create collaborators (infrastructure layer)
    let source = Arc::new(SimulatedMetricSource::new(board_config.channels.clone()));
    let backend = Arc::new(FigureBackend::new());

    // Create dispatcher and board state (application layer)
    let dispatcher = RenderDispatcher::new(board_config.synthesis.series_len);
    let state = Arc::new(AppState::new(dispatcher, source, backend));

    // Build router (presentation layer)
    let app = router(state).layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = board_config.server.bind.parse()?;
    tracing::info!("starting ran-panelboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
