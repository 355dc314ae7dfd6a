// SPDX-License-Identifier: MIT

//! Authentication and credential lifecycle.
//!
//! Handles:
//! - Signup: uniqueness check, password hashing, record creation, token issuance
//! - Login: lookup, password verification, token issuance
//!
//! Missing user and wrong password both surface as `InvalidCredentials`,
//! so responses do not reveal whether an email is registered.

use crate::db::MongoDb;
use crate::error::AppError;
use crate::models::{User, UserView};
use crate::services::token;

/// Bcrypt cost factor (2^10 rounds), matching the stored hashes.
const BCRYPT_COST: u32 = 10;

/// Result of a successful signup.
pub struct SignupOutcome {
    pub token: String,
    pub user: UserView,
}

/// Result of a successful login.
#[derive(Debug)]
pub struct LoginOutcome {
    pub token: String,
    /// Role claim, if the user record carries one. The current data model
    /// has no role field, so this is always `None`.
    pub role: Option<String>,
}

/// Authentication service.
#[derive(Clone)]
pub struct AuthService {
    db: MongoDb,
    signing_key: Vec<u8>,
}

impl AuthService {
    pub fn new(db: MongoDb, signing_key: Vec<u8>) -> Self {
        Self { db, signing_key }
    }

    /// Register a new user and issue a session token.
    ///
    /// The email pre-check is a fast path; the unique index on the users
    /// collection is what actually guarantees uniqueness under concurrent
    /// signups (the insert maps duplicate-key rejections to `DuplicateUser`).
    pub async fn signup(
        &self,
        name: String,
        email: String,
        password: String,
        phone: String,
    ) -> Result<SignupOutcome, AppError> {
        if self.db.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::DuplicateUser);
        }

        let password_hash = hash_password(password).await?;

        let user = User::new(name, email, password_hash, phone);
        self.db.insert_user(&user).await?;

        tracing::info!(user_id = %user.id, "User created");

        let token = token::create_token(
            &user.id.to_hex(),
            Some(&user.email),
            None,
            &self.signing_key,
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token creation failed: {}", e)))?;

        Ok(SignupOutcome {
            token,
            user: user.view(),
        })
    }

    /// Authenticate a user and issue a session token.
    pub async fn login(&self, email: String, password: String) -> Result<LoginOutcome, AppError> {
        let user = self
            .db
            .find_user_by_email(&email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(password, user.password_hash.clone()).await? {
            return Err(AppError::InvalidCredentials);
        }

        let token = token::create_token(
            &user.id.to_hex(),
            Some(&user.email),
            None,
            &self.signing_key,
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token creation failed: {}", e)))?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome { token, role: None })
    }

    /// Public views of all users (small scale only; no pagination).
    pub async fn list_users(&self) -> Result<Vec<UserView>, AppError> {
        let users = self.db.list_users().await?;
        Ok(users.iter().map(User::view).collect())
    }
}

/// Hash a password with bcrypt on the blocking pool.
///
/// Bcrypt at cost 10 takes tens of milliseconds; running it inline would
/// stall the async reactor.
async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))
}

/// Verify a password against a stored bcrypt hash on the blocking pool.
///
/// A malformed stored hash is a server fault, not a credential mismatch.
async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Verify task failed: {}", e)))?
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password verification failed: {}", e)))
}
