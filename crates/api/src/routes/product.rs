use axum::routing::get;
use axum::Router;

use crate::handlers::product;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// DELETE /               -> delete (body: {"ids": [...]} and/or {"skus": [...]})
/// GET    /{id}           -> get_by_id
/// GET    /sku/{sku}      -> get_by_sku
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(product::list)
                .post(product::create)
                .delete(product::delete),
        )
        .route("/{id}", get(product::get_by_id))
        .route("/sku/{sku}", get(product::get_by_sku))
}
