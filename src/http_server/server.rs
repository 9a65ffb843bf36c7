//! # HTTP Server
//!
//! Main HTTP server: assembles the gateway router, applies CORS and the
//! request-body limit, and runs the accept loop. The store handle is
//! opened by the caller (startup failure is fatal there) and injected
//! here; this module never opens the database itself.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse, Json, Router};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;

use crate::observability::Logger;
use crate::store::Store;

use super::config::HttpServerConfig;
use super::sql_routes::{sql_routes, ErrorResponse, GatewayState};

/// HTTP server for the guarded SQL gateway
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server from an opened store and configuration.
    pub fn new(store: Store, config: HttpServerConfig) -> Self {
        let router = Self::build_router(store, &config);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(store: Store, config: &HttpServerConfig) -> Router {
        let state = Arc::new(GatewayState::new(store));

        // Configure CORS from config
        let cors = if config.cors_origins.is_empty() {
            // No origins configured: permissive, for development
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            // Guarded SQL + seed under /api/v1
            .nest("/api/v1", sql_routes(state))
            .fallback(not_found_handler)
            .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("{}", e)))?;

        Logger::info("SERVER_START", &[("addr", &addr.to_string())]);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

/// Any unrecognized method/path gets a JSON not-found envelope.
async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found.".to_string(),
        }),
    )
}
