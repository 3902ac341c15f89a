mod cors;
pub mod handlers;
pub mod types;
pub mod validation;

pub use cors::cors_middleware;

use crate::{
    Result,
    advice::Generator,
    analysis::{Analyzer, VisionCapability},
    config::{Config, ServiceKind},
    llm::TextCapability,
    pipeline::{HttpAnalyzerClient, HttpGeneratorClient, Orchestrator},
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use handlers::{AnalyzerState, GatewayState, GeneratorState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Gateway routes. `body_limit` caps the request body in bytes; the image
/// arrives base64-encoded inside the JSON.
pub fn gateway_router(state: GatewayState, body_limit: usize) -> Router {
    let chat = post(handlers::chat)
        .options(handlers::preflight)
        .fallback(handlers::gateway_method_not_allowed);

    Router::new()
        .route("/", chat.clone())
        .route("/chat", chat)
        .route("/health", get(|| handlers::health(ServiceKind::Gateway)))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(cors_middleware))
        .layer(TraceLayer::new_for_http())
}

pub fn analyzer_router(state: AnalyzerState, body_limit: usize) -> Router {
    let process = post(handlers::analyze).fallback(handlers::analyzer_method_not_allowed);

    Router::new()
        .route("/", process.clone())
        .route("/process", process)
        .route("/health", get(|| handlers::health(ServiceKind::Analyzer)))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}

pub fn generator_router(state: GeneratorState, body_limit: usize) -> Router {
    let generate = post(handlers::generate).fallback(handlers::generator_method_not_allowed);

    Router::new()
        .route("/", generate.clone())
        .route("/generate", generate)
        .route("/health", get(|| handlers::health(ServiceKind::Generator)))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}

/// Build the router for the configured role. Provider clients are created
/// once here and shared by every request.
pub fn build_router(config: &Config) -> Result<Router> {
    let body_limit = config.server.max_body_bytes;
    let router = match config.service {
        ServiceKind::Gateway => {
            let analyzer = HttpAnalyzerClient::from_config(&config.gateway)?;
            let generator = HttpGeneratorClient::from_config(&config.gateway)?;
            gateway_router(
                GatewayState {
                    orchestrator: Orchestrator::new(Arc::new(analyzer), Arc::new(generator)),
                },
                body_limit,
            )
        }
        ServiceKind::Analyzer => {
            let analyzer = Analyzer::new(VisionCapability::from_config(&config.vision));
            if analyzer.uses_mock_data() {
                info!("Analyzer will serve mock analysis results");
            }
            analyzer_router(
                AnalyzerState {
                    analyzer: Arc::new(analyzer),
                },
                body_limit,
            )
        }
        ServiceKind::Generator => {
            let generator = Generator::new(TextCapability::from_config(&config.llm));
            if generator.uses_canned_advice() {
                info!("Generator will serve canned advice");
            }
            generator_router(
                GeneratorState {
                    generator: Arc::new(generator),
                },
                body_limit,
            )
        }
    };

    Ok(router)
}

pub async fn run(config: Config) -> Result<()> {
    let app = build_router(&config)?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting {} service on {}", config.service, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
