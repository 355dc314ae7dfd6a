// SPDX-License-Identifier: MIT

//! Business logic services.

pub mod auth;
pub mod blobs;
pub mod catalog;
pub mod token;

pub use auth::AuthService;
pub use blobs::{BlobStore, LocalBlobStore};
pub use catalog::CatalogService;
