//! HTTP-level integration tests for the `/products` endpoints.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, StatusCode};
use common::{body_json, build_test_app, delete_json, get, post_json, send};
use serde_json::json;
use sqlx::PgPool;

async fn create(pool: &PgPool, body: serde_json::Value) -> serde_json::Value {
    let response = post_json(build_test_app(pool.clone()), "/products", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_dvd_then_list_shows_specific_attribute(pool: PgPool) {
    let created = create(
        &pool,
        json!({"sku": "DVD-1", "name": "Matrix", "price": 9.99, "type": "dvd", "size": 700}),
    )
    .await;
    assert!(created["id"].is_number());
    assert_eq!(created["sku"], "DVD-1");
    assert_eq!(created["type"], "dvd");
    assert_eq!(created["specific_attribute"], "Size: 700 MB");

    let response = get(build_test_app(pool), "/products").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let items = json.as_array().expect("body should be an array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["sku"], "DVD-1");
    assert_eq!(items[0]["name"], "Matrix");
    assert_eq!(items[0]["price"], 9.99);
    assert_eq!(items[0]["specific_attribute"], "Size: 700 MB");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_book_and_furniture(pool: PgPool) {
    let book = create(
        &pool,
        json!({"sku": "B-1", "name": "Book", "price": "5", "type": "Book", "weight": "1.2"}),
    )
    .await;
    assert_eq!(book["type"], "book");
    assert_eq!(book["specific_attribute"], "Weight: 1.2 KG");

    let chair = create(
        &pool,
        json!({
            "sku": "F-1", "name": "Chair", "price": 120, "type": "furniture",
            "height": 10, "width": 20, "length": 30
        }),
    )
    .await;
    assert_eq!(chair["specific_attribute"], "Dimension: 10x20x30");
    assert_eq!(chair["height"], 10);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_negative_weight_returns_422(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/products",
        json!({"sku": "B-1", "name": "Book", "price": 5, "type": "book", "weight": -2}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["errors"], json!({"weight": "Weight cannot be negative"}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_decimal_beyond_column_range_returns_422(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/products",
        json!({"sku": "D-1", "name": "Disc", "price": 1000000000, "type": "dvd", "size": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["errors"], json!({"price": "Price must be at most 99999999.99"}));

    let response = post_json(
        build_test_app(pool.clone()),
        "/products",
        json!({"sku": "B-1", "name": "Book", "price": 5, "type": "book", "weight": "123456789"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["errors"], json!({"weight": "Weight must be at most 99999999.99"}));

    let max = create(
        &pool,
        json!({"sku": "MAX", "name": "Max", "price": "99999999.99", "type": "book", "weight": "99999999.99"}),
    )
    .await;
    assert_eq!(max["price"], 99999999.99);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_fields_are_all_reported(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/products",
        json!({"type": "furniture", "price": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    let errors = json["errors"].as_object().unwrap();
    let mut keys: Vec<_> = errors.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["height", "length", "name", "sku", "width"]);
    assert_eq!(errors["sku"], "Please, submit required data");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_type_returns_single_error(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/products",
        json!({"sku": "X", "type": "vinyl"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["errors"], json!({"type": "Invalid product type specified"}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_sku_returns_409_and_keeps_first(pool: PgPool) {
    let first = create(
        &pool,
        json!({"sku": "DUP", "name": "First", "price": 1, "type": "dvd", "size": 1}),
    )
    .await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/products",
        json!({"sku": "DUP", "name": "Second", "price": 2, "type": "book", "weight": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "DUPLICATE_SKU");

    let response = get(build_test_app(pool), &format!("/products/{}", first["id"])).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "First");
    assert_eq!(json["type"], "dvd");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_json_returns_400(pool: PgPool) {
    let response = send(
        build_test_app(pool.clone()),
        Method::POST,
        "/products",
        Body::from("{not json"),
        Some("application/json"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    let response = post_json(build_test_app(pool.clone()), "/products", json!([1, 2])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        build_test_app(pool),
        Method::DELETE,
        "/products",
        Body::from("ids=1"),
        Some("text/plain"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_is_ordered_by_id(pool: PgPool) {
    for sku in ["C", "A", "B"] {
        create(
            &pool,
            json!({"sku": sku, "name": sku, "price": 1, "type": "dvd", "size": 1}),
        )
        .await;
    }

    let json = body_json(get(build_test_app(pool), "/products").await).await;
    let skus: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["sku"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(skus, ["C", "A", "B"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_by_sku_and_missing_product(pool: PgPool) {
    create(
        &pool,
        json!({"sku": "SKU-9", "name": "Nine", "price": 9, "type": "dvd", "size": 9}),
    )
    .await;

    let response = get(build_test_app(pool.clone()), "/products/sku/SKU-9").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Nine");

    let response = get(build_test_app(pool.clone()), "/products/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(build_test_app(pool), "/products/sku/NOPE").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_numeric_id_returns_json_400(pool: PgPool) {
    let response = get(build_test_app(pool), "/products/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get(CONTENT_TYPE).unwrap(),
        "application/json"
    );

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("abc"));
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_by_ids_and_skus(pool: PgPool) {
    let a = create(
        &pool,
        json!({"sku": "A", "name": "A", "price": 1, "type": "dvd", "size": 1}),
    )
    .await;
    create(
        &pool,
        json!({"sku": "B", "name": "B", "price": 1, "type": "book", "weight": 1}),
    )
    .await;
    create(
        &pool,
        json!({"sku": "C", "name": "C", "price": 1, "type": "dvd", "size": 1}),
    )
    .await;

    let response = delete_json(
        build_test_app(pool.clone()),
        "/products",
        json!({"ids": [a["id"]], "skus": ["B"]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["deleted"], 2);
    assert_eq!(json["message"], "Products deleted successfully.");

    let response = get(build_test_app(pool.clone()), &format!("/products/{}", a["id"])).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(get(build_test_app(pool), "/products").await).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_with_empty_ids_is_noop(pool: PgPool) {
    let response = delete_json(build_test_app(pool), "/products", json!({"ids": []})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["deleted"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_without_ids_returns_422(pool: PgPool) {
    for body in [json!({}), json!({"ids": "1,2"})] {
        let response = delete_json(build_test_app(pool.clone()), "/products", body).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(
            json["errors"]["ids"],
            "Please provide an array of IDs to delete."
        );
    }
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_route_returns_404_json(pool: PgPool) {
    let response = get(build_test_app(pool), "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_and_request_id(pool: PgPool) {
    let response = get(build_test_app(pool), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("x-request-id").is_some());

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["product_types"], json!(["dvd", "book", "furniture"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_reports_unavailable_database(pool: PgPool) {
    let app = build_test_app(pool.clone());
    pool.close().await;

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
}
