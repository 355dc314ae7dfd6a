// SPDX-License-Identifier: MIT

//! Product catalog routes: creation, upload, and retrieval.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::ProductView;
use crate::services::catalog::NewProduct;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/products", post(add_product).get(list_products))
        .route("/api/upload", post(upload_product))
        .route("/get-women", get(get_women))
        .route("/get-men", get(get_men))
        .route("/get-kids", get(get_kids))
        .route("/get-unisex", get(get_unisex))
        .route("/get-accessories", get(get_accessories))
        .route("/items/{id}", get(get_item))
}

/// Product creation request body.
///
/// `itemAvailability` is a string on the wire ("true"/"false") and is
/// coerced by the catalog service.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[validate(length(min = 1, message = "itemName is required"))]
    pub item_name: String,
    #[validate(length(min = 1, message = "itemDescription is required"))]
    pub item_description: String,
    #[validate(length(min = 1, message = "itemAvailability is required"))]
    pub item_availability: String,
    #[validate(length(min = 1, message = "itemBrand is required"))]
    pub item_brand: String,
    #[validate(length(min = 1, message = "itemCategory is required"))]
    pub item_category: String,
    #[validate(length(min = 1, message = "itemType is required"))]
    pub item_type: String,
    #[validate(length(min = 1, message = "itemPrice is required"))]
    pub item_price: String,
    #[serde(default)]
    pub item_images: Vec<String>,
}

impl From<ProductRequest> for NewProduct {
    fn from(req: ProductRequest) -> Self {
        NewProduct {
            item_name: req.item_name,
            item_description: req.item_description,
            item_availability: req.item_availability,
            item_brand: req.item_brand,
            item_category: req.item_category,
            item_type: req.item_type,
            item_price: req.item_price,
            item_images: req.item_images,
        }
    }
}

/// Response envelope for product creation.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreatedResponse {
    pub message: String,
    pub new_product: ProductView,
}

/// Create a product from a JSON body (no file).
async fn add_product(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ProductRequest>,
) -> Result<(StatusCode, Json<ProductCreatedResponse>)> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let product = state.catalog_service.add_product(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductCreatedResponse {
            message: "Product added successfully".to_string(),
            new_product: product.view(),
        }),
    ))
}

/// Create a product from a multipart form carrying one image file.
///
/// Text parts supply the product fields; the single file part supplies the
/// image. A missing file is a client error.
async fn upload_product(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ProductCreatedResponse>)> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut fields: HashMap<String, String> = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if let Some(filename) = field.file_name() {
            let filename = filename.to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read file part: {}", e)))?;
            file = Some((filename, bytes.to_vec()));
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read field {}: {}", name, e)))?;
            fields.insert(name, value);
        }
    }

    let (filename, bytes) =
        file.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    let input = new_product_from_fields(&mut fields)?;

    let product = state
        .catalog_service
        .upload_and_create(&filename, &bytes, input)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductCreatedResponse {
            message: "Product added successfully".to_string(),
            new_product: product.view(),
        }),
    ))
}

/// Assemble product fields from multipart text parts.
fn new_product_from_fields(fields: &mut HashMap<String, String>) -> Result<NewProduct> {
    let mut take = |key: &str| -> Result<String> {
        match fields.remove(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(AppError::Validation(format!("{} is required", key))),
        }
    };

    Ok(NewProduct {
        item_name: take("itemName")?,
        item_description: take("itemDescription")?,
        item_availability: take("itemAvailability")?,
        item_brand: take("itemBrand")?,
        item_category: take("itemCategory")?,
        item_type: take("itemType")?,
        item_price: take("itemPrice")?,
        item_images: Vec::new(), // filled in from the stored upload
    })
}

// ─── Retrieval ───────────────────────────────────────────────

async fn list_by_category(
    state: &AppState,
    category: &str,
) -> Result<Json<Vec<ProductView>>> {
    let products = state.catalog_service.list_by_category(category).await?;
    Ok(Json(products.iter().map(|p| p.view()).collect()))
}

async fn get_women(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ProductView>>> {
    list_by_category(&state, "women").await
}

async fn get_men(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ProductView>>> {
    list_by_category(&state, "men").await
}

async fn get_kids(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ProductView>>> {
    list_by_category(&state, "kids").await
}

async fn get_unisex(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ProductView>>> {
    list_by_category(&state, "unisex").await
}

async fn get_accessories(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ProductView>>> {
    let products = state.catalog_service.list_by_type("accessories").await?;
    Ok(Json(products.iter().map(|p| p.view()).collect()))
}

/// Fetch a single product by id.
async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ProductView>> {
    let product = state.catalog_service.get_by_id(&id).await?;
    Ok(Json(product.view()))
}

/// Response for the product listing endpoint.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsResponse {
    pub product_data: Vec<ProductView>,
}

/// List all products.
async fn list_products(State(state): State<Arc<AppState>>) -> Result<Json<ProductsResponse>> {
    let products = state.catalog_service.list_products().await?;
    Ok(Json(ProductsResponse {
        product_data: products.iter().map(|p| p.view()).collect(),
    }))
}
