//! User model for storage and API.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// User document stored in MongoDB.
///
/// The stored field names match the original wire format (camelCase).
/// The password hash lives only in this type; API responses go through
/// [`UserView`], which carries no credential material.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Display name
    pub name: String,
    /// Email address (unique across all users, enforced by index)
    pub email: String,
    /// Bcrypt hash of the password. Never the plaintext.
    pub password_hash: String,
    /// Phone number
    pub phone_number: String,
}

impl User {
    /// Build a new user record with a fresh document id.
    pub fn new(name: String, email: String, password_hash: String, phone_number: String) -> Self {
        Self {
            id: ObjectId::new(),
            name,
            email,
            password_hash,
            phone_number,
        }
    }

    /// Public view of this user, safe to return to clients.
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id.to_hex(),
            user_name: self.name.clone(),
            user_email: self.email.clone(),
            user_phone: self.phone_number.clone(),
        }
    }
}

/// Public user representation returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
}
