// SPDX-License-Identifier: MIT

//! End-to-end tests against a live MongoDB.
//!
//! Each test gets a throwaway database. Set MONGODB_URI to run these;
//! without it they skip.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use boutique_api::error::AppError;
use boutique_api::services::token::verify_token;
use tower::ServiceExt;

mod common;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn signup_body(email: &str) -> serde_json::Value {
    serde_json::json!({
        "userName": "A",
        "userEmail": email,
        "userPassword": "pw123456",
        "userPhone": "555"
    })
}

fn product_body(name: &str, availability: &str, category: &str) -> serde_json::Value {
    serde_json::json!({
        "itemName": name,
        "itemDescription": "Test product",
        "itemAvailability": availability,
        "itemBrand": "Acme",
        "itemCategory": category,
        "itemType": "accessories",
        "itemPrice": "19.99"
    })
}

#[tokio::test]
async fn test_signup_login_end_to_end() {
    require_mongo!();

    let db = common::test_db().await;
    let (app, state) = common::create_test_app_with_db(db);

    // Signup succeeds with 201 and a decodable token
    let response = app
        .clone()
        .oneshot(json_post("/api/signup", signup_body("a@x.com")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;

    let token = body["token"].as_str().unwrap();
    let claims = verify_token(token, &state.config.jwt_signing_key).unwrap();
    assert_eq!(claims.sub, body["user"]["id"].as_str().unwrap());
    assert_eq!(claims.email.as_deref(), Some("a@x.com"));

    // The public view never carries credential material
    assert!(body["user"].get("passwordHash").is_none());

    // Immediate repeat fails with 400 duplicate
    let response = app
        .clone()
        .oneshot(json_post("/api/signup", signup_body("a@x.com")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Login with the same credentials returns 200 and the same subject
    let response = app
        .clone()
        .oneshot(json_post(
            "/api/login",
            serde_json::json!({ "userEmail": "a@x.com", "userPassword": "pw123456" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let login_body = body_json(response).await;
    let login_claims =
        verify_token(login_body["token"].as_str().unwrap(), &state.config.jwt_signing_key)
            .unwrap();
    assert_eq!(login_claims.sub, claims.sub);
    assert!(login_body["role"].is_null());

    // Login with the wrong password returns 401
    let response = app
        .oneshot(json_post(
            "/api/login",
            serde_json::json!({ "userEmail": "a@x.com", "userPassword": "wrongpass" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_email_is_unauthorized() {
    require_mongo!();

    let db = common::test_db().await;
    let (app, _state) = common::create_test_app_with_db(db);

    // Unknown email and wrong password are indistinguishable (401 either way)
    let response = app
        .oneshot(json_post(
            "/api/login",
            serde_json::json!({ "userEmail": "ghost@x.com", "userPassword": "pw123456" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_concurrent_signup_only_one_succeeds() {
    require_mongo!();

    let db = common::test_db().await;
    let (_app, state) = common::create_test_app_with_db(db);

    // Both calls pass the pre-check window; the unique index must reject one
    let first = state.auth_service.signup(
        "A".to_string(),
        "race@x.com".to_string(),
        "pw123456".to_string(),
        "555".to_string(),
    );
    let second = state.auth_service.signup(
        "B".to_string(),
        "race@x.com".to_string(),
        "pw123456".to_string(),
        "556".to_string(),
    );

    let (first, second) = tokio::join!(first, second);

    let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one concurrent signup must win");

    let failure = if first.is_err() { first.err() } else { second.err() };
    assert!(matches!(failure, Some(AppError::DuplicateUser)));
}

#[tokio::test]
async fn test_availability_coercion_persists() {
    require_mongo!();

    let db = common::test_db().await;
    let (app, _state) = common::create_test_app_with_db(db);

    let response = app
        .clone()
        .oneshot(json_post(
            "/api/products",
            product_body("InStock", "true", "women"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["newProduct"]["itemAvailability"], true);
    let id = body["newProduct"]["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_post(
            "/api/products",
            product_body("OutOfStock", "false", "women"),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["newProduct"]["itemAvailability"], false);

    // Stored value reads back as a boolean, not a string
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/items/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["itemAvailability"], true);
}

#[tokio::test]
async fn test_category_filters_are_case_sensitive() {
    require_mongo!();

    let db = common::test_db().await;
    let (app, _state) = common::create_test_app_with_db(db);

    for (name, category) in [("Lowercase", "women"), ("Capitalized", "Women")] {
        let response = app
            .clone()
            .oneshot(json_post("/api/products", product_body(name, "true", category)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/get-women")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["itemName"], "Lowercase");
}

#[tokio::test]
async fn test_type_filter_and_listings() {
    require_mongo!();

    let db = common::test_db().await;
    let (app, _state) = common::create_test_app_with_db(db);

    let response = app
        .clone()
        .oneshot(json_post(
            "/api/products",
            product_body("Scarf", "true", "unisex"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/get-accessories")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/products")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["productData"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_item_not_found() {
    require_mongo!();

    let db = common::test_db().await;
    let (app, _state) = common::create_test_app_with_db(db);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/items/64f0a1b2c3d4e5f60718293a")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Item not found");
}

#[tokio::test]
async fn test_upload_creates_product_with_stored_image() {
    require_mongo!();

    let db = common::test_db().await;
    let (app, _state) = common::create_test_app_with_db(db);

    let boundary = "test-boundary";
    let mut body = String::new();
    for (name, value) in [
        ("itemName", "Scarf"),
        ("itemDescription", "Wool scarf"),
        ("itemAvailability", "true"),
        ("itemBrand", "Acme"),
        ("itemCategory", "women"),
        ("itemType", "accessories"),
        ("itemPrice", "19.99"),
    ] {
        body.push_str(&format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"{n}\"\r\n\r\n{v}\r\n",
            b = boundary,
            n = name,
            v = value
        ));
    }
    body.push_str(&format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"scarf.jpg\"\r\n\
         Content-Type: image/jpeg\r\n\r\nfake image bytes\r\n--{b}--\r\n",
        b = boundary
    ));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/upload")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", boundary),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;

    let images = body["newProduct"]["itemImages"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    let stored = images[0].as_str().unwrap();
    // Generated name, not the client-supplied one
    assert!(stored.ends_with(".jpg"));
    assert!(!stored.contains("scarf"));

    let contents = tokio::fs::read(stored).await.unwrap();
    assert_eq!(contents, b"fake image bytes");
}

#[tokio::test]
async fn test_users_listing_has_no_credential_material() {
    require_mongo!();

    let db = common::test_db().await;
    let (app, _state) = common::create_test_app_with_db(db);

    let response = app
        .clone()
        .oneshot(json_post("/api/signup", signup_body("list@x.com")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let users = body["userData"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["userEmail"], "list@x.com");
    assert!(users[0].get("passwordHash").is_none());
}
