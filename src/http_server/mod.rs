//! # Gateway HTTP Server
//!
//! HTTP surface for the guarded SQL gateway.
//!
//! # Endpoints
//!
//! - `GET /api/v1/sql/{statement}` - guarded read (SELECT only)
//! - `POST /api/v1/sql` - guarded write (INSERT only)
//! - `POST /api/v1/seed` - fixed sample-data insertion
//!
//! Everything else, any method, gets the not-found envelope.

pub mod config;
pub mod server;
pub mod sql_routes;

pub use config::HttpServerConfig;
pub use server::HttpServer;
pub use sql_routes::GatewayState;
