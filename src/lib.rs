// SPDX-License-Identifier: MIT

//! Boutique API: a small e-commerce backend.
//!
//! Provides user signup/login with JWT issuance and a product catalog
//! backed by MongoDB, exposed as REST endpoints.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::MongoDb;
use services::{AuthService, CatalogService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: MongoDb,
    pub auth_service: AuthService,
    pub catalog_service: CatalogService,
}
