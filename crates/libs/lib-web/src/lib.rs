//! # Web Library
//!
//! HTTP handlers, middleware, services and the server bootstrap for the
//! Agri Connect API.

pub mod handlers;
pub mod middleware;
pub mod services;
pub mod server;

pub use server::{create_router, init_tracing, start_server, AppState, ServerConfig};
