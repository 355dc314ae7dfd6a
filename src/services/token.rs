// SPDX-License-Identifier: MIT

//! Issuance and verification of signed session tokens.
//!
//! Signup- and login-issued tokens share one signing key and one claims
//! schema. Tokens are stateless: no session record is kept server-side.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Issued tokens expire after one hour.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user document id, hex)
    pub sub: String,
    /// Email address of the subject
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Role, if the user record carries one (always absent in this data model)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Create a signed token for a user session.
pub fn create_token(
    user_id: &str,
    email: Option<&str>,
    role: Option<&str>,
    signing_key: &[u8],
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.map(str::to_string),
        role: role.map(str::to_string),
        iat: now as usize,
        exp: (now + TOKEN_TTL_SECS) as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
}

/// Verify a token's signature and expiry, returning its claims.
pub fn verify_token(
    token: &str,
    signing_key: &[u8],
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(token, &key, &validation).map(|data| data.claims)
}
