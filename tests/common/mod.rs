// SPDX-License-Identifier: MIT

use boutique_api::config::Config;
use boutique_api::db::MongoDb;
use boutique_api::routes::create_router;
use boutique_api::services::{AuthService, CatalogService, LocalBlobStore};
use boutique_api::AppState;
use std::sync::Arc;

/// Check if a MongoDB instance is available via environment variable.
#[allow(dead_code)]
pub fn mongo_available() -> bool {
    std::env::var("MONGODB_URI").is_ok()
}

/// Skip test with message if MongoDB is not available.
#[macro_export]
macro_rules! require_mongo {
    () => {
        if !crate::common::mongo_available() {
            eprintln!("⚠️  Skipping: MONGODB_URI not set");
            return;
        }
    };
}

/// Create a test database connection against the configured MongoDB,
/// using a throwaway database name so runs do not interfere.
#[allow(dead_code)]
pub async fn test_db() -> MongoDb {
    let uri = std::env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    let database = format!("boutique_test_{}", uuid_suffix());

    let db = MongoDb::connect(&uri, &database)
        .await
        .expect("Failed to connect to MongoDB");
    db.init_indexes().await.expect("Failed to create indexes");
    db
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> MongoDb {
    MongoDb::new_mock()
}

/// Create a test app with the given database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app_with_db(db: MongoDb) -> (axum::Router, Arc<AppState>) {
    let config = Config::default();

    let upload_dir = std::env::temp_dir().join(format!("boutique-uploads-{}", uuid_suffix()));
    let blobs = Arc::new(LocalBlobStore::new(upload_dir));

    let auth_service = AuthService::new(db.clone(), config.jwt_signing_key.clone());
    let catalog_service = CatalogService::new(db.clone(), blobs);

    let state = Arc::new(AppState {
        config,
        db,
        auth_service,
        catalog_service,
    });

    (create_router(state.clone()), state)
}

/// Create a test app with an offline mock database.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_db(test_db_offline())
}

fn uuid_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
