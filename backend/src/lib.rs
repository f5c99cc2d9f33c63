//! # Address Book Backend
//!
//! A small contact-management service exposing persons over REST.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! IO Layer (REST API, handlers, validation)
//!     ↓
//! Domain Layer (PersonService, paging)
//!     ↓
//! Storage Layer (SQLite repository)
//! ```
//!
//! [`initialize_backend`] wires the layers together from a [`Config`] and
//! [`create_router`] turns the resulting [`AppState`] into an axum router.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{Config, ServerConfig};
use crate::domain::PersonService;
use crate::storage::{DbConnection, PersonRepository};

/// Main application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub person_service: PersonService,
    /// Requested page sizes above this are clamped
    pub max_page_size: u32,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database");
    let db_conn = DbConnection::new(&config.database)
        .await
        .with_context(|| format!("Failed to open database {}", config.database.url))?;

    info!("Setting up domain model");
    let repository = PersonRepository::new(db_conn);
    let person_service = PersonService::new(Arc::new(repository));

    Ok(AppState {
        person_service,
        max_page_size: config.pagination.max_page_size,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, server: &ServerConfig) -> Result<Router> {
    let origin = server
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin {}", server.cors_origin))?;

    // CORS setup to allow the frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Ok(Router::new()
        .nest(io::rest::PERSONS_PATH, io::rest::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_initialize_backend_opens_file_database() {
        let path = std::env::temp_dir().join(format!("addressbook-init-{}.db", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let config = Config {
            database: DatabaseConfig {
                url: format!("sqlite:{}", path.display()),
                max_connections: 1,
            },
            ..Config::default()
        };

        let state = initialize_backend(&config).await.expect("backend should start");
        assert_eq!(state.max_page_size, config.pagination.max_page_size);

        let app = create_router(state, &config.server).unwrap();
        let response = app
            .oneshot(Request::builder().uri("/api/v1.0/persons").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_create_router_rejects_bad_origin() {
        let db = DbConnection::init_test().await.unwrap();
        let state = AppState {
            person_service: PersonService::new(Arc::new(PersonRepository::new(db))),
            max_page_size: 100,
        };
        let server = ServerConfig {
            cors_origin: "bad\norigin".to_string(),
            ..ServerConfig::default()
        };

        assert!(create_router(state, &server).is_err());
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let db = DbConnection::init_test().await.unwrap();
        let state = AppState {
            person_service: PersonService::new(Arc::new(PersonRepository::new(db))),
            max_page_size: 100,
        };
        let app = create_router(state, &ServerConfig::default()).unwrap();

        let response = app
            .oneshot(Request::builder().uri("/api/v2/persons").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
