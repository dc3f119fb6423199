/**
 * Catalog Handlers
 *
 * POST /products        - list a product under the caller's business
 * GET  /products/{id}   - read a product
 * GET  /business/me     - read the caller's business
 */

use axum::{extract::State, response::Json};
use rust_decimal::Decimal;

use crate::backend::auth::handlers::types::StatusResponse;
use crate::backend::error::BackendError;
use crate::backend::middleware::{ApiJson, ApiPath, AuthUser};
use crate::backend::server::state::AppState;
use crate::backend::store::{Business, NewProduct, Product};
use crate::shared::SharedError;

pub const MAX_PRODUCT_NAME_LEN: usize = 100;
pub const MAX_CATEGORY_LEN: usize = 30;

/// Largest price a `NUMERIC(12, 2)` column holds
pub const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Decimal places kept for prices
const PRICE_SCALE: u32 = 2;

fn check_price(field: &str, price: Decimal) -> Result<(), SharedError> {
    if price < Decimal::ZERO {
        return Err(SharedError::validation(field, "Price cannot be negative"));
    }
    if price > MAX_PRICE {
        return Err(SharedError::validation(
            field,
            format!("Price cannot exceed {}", MAX_PRICE),
        ));
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(SharedError::validation(
            field,
            "Price must have at most 2 decimal places",
        ));
    }
    Ok(())
}

/// Trim a product payload and check it against the column limits
///
/// Returns the payload as it will be stored.
pub fn validate_product(mut product: NewProduct) -> Result<NewProduct, SharedError> {
    product.name = product.name.trim().to_string();
    product.category = product.category.trim().to_string();

    let name_len = product.name.chars().count();
    if name_len == 0 {
        return Err(SharedError::missing("name"));
    }
    if name_len > MAX_PRODUCT_NAME_LEN {
        return Err(SharedError::validation(
            "name",
            format!("Name must be at most {} characters", MAX_PRODUCT_NAME_LEN),
        ));
    }

    let category_len = product.category.chars().count();
    if category_len == 0 {
        return Err(SharedError::missing("category"));
    }
    if category_len > MAX_CATEGORY_LEN {
        return Err(SharedError::validation(
            "category",
            format!("Category must be at most {} characters", MAX_CATEGORY_LEN),
        ));
    }

    check_price("original_price", product.original_price)?;
    check_price("new_price", product.new_price)?;
    if product.new_price > product.original_price {
        return Err(SharedError::validation(
            "new_price",
            "New price cannot exceed the original price",
        ));
    }

    Ok(product)
}

/// Create a product owned by the caller's business
///
/// # Errors
///
/// * `400 Bad Request` - If a field fails validation
/// * `401 Unauthorized` - Missing or invalid bearer token
pub async fn create_product(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(product): ApiJson<NewProduct>,
) -> Result<Json<StatusResponse<Product>>, BackendError> {
    let product = validate_product(product)?;

    let store = state.store()?;
    let business = store
        .get_business_by_owner(user.id)
        .await?
        .ok_or_else(|| BackendError::not_found("Business not found"))?;

    let product = store.create_product(business.id, product).await?;
    tracing::info!(
        "Business {} listed product {} ({})",
        business.id,
        product.id,
        product.name
    );

    Ok(Json(StatusResponse::ok(product)))
}

/// Read a product by id
pub async fn get_product(
    State(state): State<AppState>,
    ApiPath(product_id): ApiPath<i64>,
) -> Result<Json<StatusResponse<Product>>, BackendError> {
    let product = state
        .store()?
        .get_product(product_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Product not found"))?;

    Ok(Json(StatusResponse::ok(product)))
}

/// Read the caller's business
pub async fn get_my_business(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<StatusResponse<Business>>, BackendError> {
    let business = state
        .store()?
        .get_business_by_owner(user.id)
        .await?
        .ok_or_else(|| BackendError::not_found("Business not found"))?;

    Ok(Json(StatusResponse::ok(business)))
}
