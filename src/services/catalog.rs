// SPDX-License-Identifier: MIT

//! Product catalog operations.
//!
//! Handles:
//! - Product creation (with availability coercion from the wire format)
//! - Image-upload-then-create via the blob store
//! - Category/type/id retrieval (exact-match, case-sensitive)

use crate::db::MongoDb;
use crate::error::AppError;
use crate::models::Product;
use crate::services::blobs::BlobStore;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;

/// Fields for a new product, as received on the wire.
///
/// `item_availability` arrives as the string `"true"` or `"false"` and is
/// coerced during creation; any other value is rejected.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub item_name: String,
    pub item_description: String,
    pub item_availability: String,
    pub item_brand: String,
    pub item_category: String,
    pub item_type: String,
    pub item_price: String,
    pub item_images: Vec<String>,
}

/// Catalog service.
#[derive(Clone)]
pub struct CatalogService {
    db: MongoDb,
    blobs: Arc<dyn BlobStore>,
}

impl CatalogService {
    pub fn new(db: MongoDb, blobs: Arc<dyn BlobStore>) -> Self {
        Self { db, blobs }
    }

    /// Create a product from wire-format fields.
    pub async fn add_product(&self, input: NewProduct) -> Result<Product, AppError> {
        let product = Product {
            id: ObjectId::new(),
            item_availability: parse_availability(&input.item_availability)?,
            item_name: input.item_name,
            item_description: input.item_description,
            item_brand: input.item_brand,
            item_category: input.item_category,
            item_type: input.item_type,
            item_price: input.item_price,
            item_images: input.item_images,
        };

        self.db.insert_product(&product).await?;
        tracing::info!(product_id = %product.id, "Product created");

        Ok(product)
    }

    /// Store an uploaded image, then create a product referencing it.
    ///
    /// The blob store assigns a generated name; the client-supplied filename
    /// only contributes its (sanitized) extension.
    pub async fn upload_and_create(
        &self,
        original_filename: &str,
        bytes: &[u8],
        mut input: NewProduct,
    ) -> Result<Product, AppError> {
        let stored = self.blobs.put(original_filename, bytes).await?;
        input.item_images = vec![stored];
        self.add_product(input).await
    }

    /// Products matching a category exactly (case-sensitive).
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, AppError> {
        self.db.find_products_by_category(category).await
    }

    /// Products matching a type exactly (case-sensitive).
    pub async fn list_by_type(&self, item_type: &str) -> Result<Vec<Product>, AppError> {
        self.db.find_products_by_type(item_type).await
    }

    /// Fetch one product by id. A malformed id is a client error.
    pub async fn get_by_id(&self, id: &str) -> Result<Product, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::Validation(format!("Invalid item id: {}", id)))?;

        self.db
            .find_product_by_id(object_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Item not found".to_string()))
    }

    /// All products (small scale only; no pagination).
    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        self.db.list_products().await
    }
}

/// Coerce the wire-format availability string to a boolean.
///
/// Only the exact strings "true" and "false" are accepted; anything else is
/// rejected rather than silently defaulted.
fn parse_availability(raw: &str) -> Result<bool, AppError> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(AppError::Validation(format!(
            "itemAvailability must be \"true\" or \"false\", got \"{}\"",
            other
        ))),
    }
}
