//! Server Implementation
//!
//! HTTP 服务器启动和管理

use axum::{Router, middleware};
use shared::{AppError, AppResult};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::auth::require_auth;
use crate::core::{Config, ServerState};

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        // Core APIs
        .merge(crate::api::health::router())
        .merge(crate::api::auth::router())
        // Public sale APIs
        .merge(crate::api::numbers::router())
        .merge(crate::api::pricing::router())
        .merge(crate::api::reservations::router())
        .merge(crate::api::purchase::router())
        // Admin APIs
        .merge(crate::api::admin::router())
}

/// Build the complete application with middleware applied
pub fn build_router(state: ServerState) -> Router {
    build_app()
        // JWT 认证中间件 - 在 Router 级别应用，require_auth 内部会跳过公共路由
        // 使用 from_fn_with_state 以便中间件可以访问 ServerState
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        // Tower HTTP 中间件
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        // HTTP 请求日志中间件
        .layer(middleware::from_fn(log_request))
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> AppResult<()> {
        // Create application state if not provided
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await,
        };

        // Start background tasks
        state.start_background_tasks().await;

        let app = build_router(state.clone());

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("🎟️ Sorteo Server starting on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Could not bind {}: {}", addr, e)))?;

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await
            .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

        state.shutdown_background_tasks().await;

        Ok(())
    }
}
