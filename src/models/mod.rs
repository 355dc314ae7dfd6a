// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod product;
pub mod user;

pub use product::{Product, ProductView};
pub use user::{User, UserView};
