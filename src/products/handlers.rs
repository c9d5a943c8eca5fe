use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tracing::{info, instrument};

use crate::{
    auth::jwt::AuthUser,
    error::{internal, ApiError, ApiResult},
    state::AppState,
};

use super::dto::{
    count_rows, has_required_fields, into_fields, parse_id, parse_price, patch_fields,
    MessageResponse, ProductCount,
};
use super::repo_types::Product;

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", post(create_product).get(list_products))
        .route("/products/count/:price", get(count_over_price))
        .route(
            "/products/:id",
            get(get_product).patch(update_product).delete(delete_product),
        )
}

#[instrument(skip(state, claims, body))]
pub async fn create_product(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let fields = body
        .ok()
        .and_then(|Json(v)| into_fields(v))
        .filter(has_required_fields)
        .ok_or(ApiError::BadRequest("Product details are required"))?;

    let product = state
        .store
        .insert_product(fields)
        .await
        .map_err(internal("create product"))?;

    info!(product_id = %product.id, by = %claims.email, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

#[instrument(skip(state))]
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    let products = state
        .store
        .list_products()
        .await
        .map_err(internal("list products"))?;
    Ok(Json(products))
}

#[instrument(skip(state))]
pub async fn count_over_price(
    State(state): State<AppState>,
    Path(price): Path<String>,
) -> ApiResult<Json<Vec<ProductCount>>> {
    let price = parse_price(&price)?;
    let count = state
        .store
        .count_products_over(price)
        .await
        .map_err(internal("count products"))?;
    Ok(Json(count_rows(count)))
}

#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    let id = parse_id(&id)?;
    state
        .store
        .find_product(id)
        .await
        .map_err(internal("find product"))?
        .map(Json)
        .ok_or(ApiError::NotFound("Product not found"))
}

#[instrument(skip(state, body))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Product>> {
    let id = parse_id(&id)?;
    let patch = patch_fields(body)?;

    let product = state
        .store
        .update_product(id, patch)
        .await
        .map_err(internal("update product"))?
        .ok_or(ApiError::NotFound("Product not found"))?;

    info!(product_id = %product.id, "product updated");
    Ok(Json(product))
}

#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    let deleted = state
        .store
        .delete_product(id)
        .await
        .map_err(internal("delete product"))?;
    if !deleted {
        return Err(ApiError::NotFoundMessage("Product not found"));
    }

    info!(product_id = %id, "product deleted");
    Ok(Json(MessageResponse {
        message: "Product deleted successfully",
    }))
}
