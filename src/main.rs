// SPDX-License-Identifier: MIT

//! Boutique API Server
//!
//! A small e-commerce backend: user signup/login with JWT issuance and a
//! product catalog over MongoDB, exposed as REST endpoints.

use boutique_api::{
    config::Config,
    db::MongoDb,
    services::{AuthService, CatalogService, LocalBlobStore},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Boutique API");

    // Connect to MongoDB
    let db = MongoDb::connect(&config.mongodb_uri, &config.mongodb_database)
        .await
        .expect("Failed to connect to MongoDB");

    // The unique email index is the source of truth for signup uniqueness
    db.init_indexes()
        .await
        .expect("Failed to create database indexes");

    // Local-disk blob store for uploaded product images
    let blobs = Arc::new(LocalBlobStore::new(config.upload_dir.clone()));

    let auth_service = AuthService::new(db.clone(), config.jwt_signing_key.clone());
    let catalog_service = CatalogService::new(db.clone(), blobs);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        auth_service,
        catalog_service,
    });

    // Build router
    let app = boutique_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("boutique_api=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
