// SPDX-License-Identifier: MIT

//! MongoDB client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (credential storage, unique by email)
//! - Products (catalog storage with category/type filters)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Product, User};
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use std::time::Duration;

/// MongoDB database client.
#[derive(Clone)]
pub struct MongoDb {
    database: Option<Database>,
}

impl MongoDb {
    /// Connect to MongoDB and select the application database.
    ///
    /// Connection timeouts mirror the deployment configuration: 5s server
    /// selection, 10s connect, 45s socket idle.
    pub async fn connect(uri: &str, database_name: &str) -> Result<Self, AppError> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| AppError::Database(format!("Invalid MongoDB URI: {}", e)))?;

        options.server_selection_timeout = Some(Duration::from_secs(5));
        options.connect_timeout = Some(Duration::from_secs(10));

        let client = Client::with_options(options)
            .map_err(|e| AppError::Database(format!("Failed to create MongoDB client: {}", e)))?;

        let database = client.database(database_name);

        // Lightweight ping to surface connection problems at startup
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to MongoDB: {}", e)))?;

        tracing::info!(database = database_name, "Connected to MongoDB");

        Ok(Self {
            database: Some(database),
        })
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { database: None }
    }

    /// Helper to get the database handle or an error when offline.
    fn get_database(&self) -> Result<&Database, AppError> {
        self.database
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    fn users(&self) -> Result<Collection<User>, AppError> {
        Ok(self.get_database()?.collection(collections::USERS))
    }

    fn products(&self) -> Result<Collection<Product>, AppError> {
        Ok(self.get_database()?.collection(collections::PRODUCTS))
    }

    /// Declare indexes the application relies on.
    ///
    /// The unique email index is the correctness mechanism for signup
    /// uniqueness; the application-level pre-check is only a fast path.
    pub async fn init_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("idx_email_unique".to_string())
                    .build(),
            )
            .build();

        self.users()?
            .create_index(email_index)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!("Database indexes created");
        Ok(())
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Look up a user by email address.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.users()?
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new user.
    ///
    /// A duplicate-key rejection from the unique email index maps to
    /// `DuplicateUser`, so concurrent signups racing past the pre-check
    /// still fail cleanly.
    pub async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        self.users()?.insert_one(user).await.map_err(|e| {
            if is_duplicate_key_error(&e) {
                AppError::DuplicateUser
            } else {
                AppError::Database(e.to_string())
            }
        })?;
        Ok(())
    }

    /// All users in the system (small scale only; no pagination).
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let cursor = self
            .users()?
            .find(doc! {})
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Product Operations ──────────────────────────────────────

    /// Insert a new product.
    pub async fn insert_product(&self, product: &Product) -> Result<(), AppError> {
        self.products()?
            .insert_one(product)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Fetch one product by document id.
    pub async fn find_product_by_id(&self, id: ObjectId) -> Result<Option<Product>, AppError> {
        self.products()?
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Products whose category matches exactly (case-sensitive).
    pub async fn find_products_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Product>, AppError> {
        let cursor = self
            .products()?
            .find(doc! { "itemCategory": category })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Products whose type matches exactly (case-sensitive).
    pub async fn find_products_by_type(&self, item_type: &str) -> Result<Vec<Product>, AppError> {
        let cursor = self
            .products()?
            .find(doc! { "itemType": item_type })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All products in the system (small scale only; no pagination).
    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        let cursor = self
            .products()?
            .find(doc! {})
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

/// MongoDB reports unique index violations as write error code 11000.
fn is_duplicate_key_error(err: &mongodb::error::Error) -> bool {
    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref write_error)) if write_error.code == 11000
    )
}
