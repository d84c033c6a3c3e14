//! Handlers for the `/products` resource.
//!
//! Creation runs the full pipeline: validation (type dispatch through the
//! registry), the entity factory, then the transactional repository write.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::product::Product;
use catalog_core::types::DbId;
use catalog_core::{factory, validation};
use catalog_db::repositories::ProductRepo;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonObject, PathParam};
use crate::response::DeleteResponse;
use crate::state::AppState;

const DELETE_IDS_REQUIRED: &str = "Please provide an array of IDs to delete.";

/// Body accepted by `DELETE /products`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteProducts {
    pub ids: Option<Vec<DbId>>,
    pub skus: Option<Vec<String>>,
}

/// GET /products
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = ProductRepo::find_all(&state.pool).await?;
    tracing::debug!(count = products.len(), "Listed products");
    Ok(Json(products))
}

/// GET /products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<Product>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Product",
                key: id.to_string(),
            })
        })?;
    Ok(Json(product))
}

/// GET /products/sku/{sku}
pub async fn get_by_sku(
    State(state): State<AppState>,
    PathParam(sku): PathParam<String>,
) -> AppResult<Json<Product>> {
    let product = ProductRepo::find_by_sku(&state.pool, &sku)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Product",
                key: sku.clone(),
            })
        })?;
    Ok(Json(product))
}

/// POST /products
///
/// Accepts `{sku, name, price, type, ...type-specific fields}`. Field errors
/// come back as 422 with an `errors` map; a taken SKU is 409.
pub async fn create(
    State(state): State<AppState>,
    JsonObject(input): JsonObject,
) -> AppResult<(StatusCode, Json<Product>)> {
    let fields = validation::validate_product(&input)?;
    let new_product = factory::build(&fields)?;
    let product = ProductRepo::save(&state.pool, &new_product).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// DELETE /products
///
/// Removes every product listed by id and/or SKU. Attribute rows cascade.
/// Unknown ids or SKUs are ignored; `deleted` reports what was removed.
pub async fn delete(
    State(state): State<AppState>,
    JsonObject(input): JsonObject,
) -> AppResult<Json<DeleteResponse>> {
    let request: DeleteProducts = serde_json::from_value(Value::Object(input))
        .map_err(|_| CoreError::field("ids", DELETE_IDS_REQUIRED))?;

    let (ids, skus) = match (request.ids, request.skus) {
        (None, None) => return Err(CoreError::field("ids", DELETE_IDS_REQUIRED).into()),
        (ids, skus) => (ids.unwrap_or_default(), skus.unwrap_or_default()),
    };

    let deleted = ProductRepo::delete_by_ids(&state.pool, &ids).await?
        + ProductRepo::delete_by_skus(&state.pool, &skus).await?;

    tracing::info!(
        requested_ids = ids.len(),
        requested_skus = skus.len(),
        deleted,
        "Products deleted"
    );

    Ok(Json(DeleteResponse {
        message: "Products deleted successfully.",
        deleted,
    }))
}
