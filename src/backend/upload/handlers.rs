/**
 * Upload Handlers
 *
 * POST /upload/profile            - replace the caller's business logo
 * POST /uploadfile/product/{id}   - replace a product's image
 *
 * Both take a multipart `file` field. Ownership is settled before anything is
 * written to disk, and a file whose record update fails is removed again.
 */

use axum::{
    extract::{Multipart, State},
    response::Json,
};
use serde::Serialize;

use crate::backend::error::BackendError;
use crate::backend::middleware::{ApiMultipart, ApiPath, AuthUser};
use crate::backend::server::state::AppState;
use crate::backend::upload::storage::ImageExtension;
use crate::shared::SharedError;

/// Message returned when the caller does not own the target record
const NOT_OWNER: &str = "Invalid token or expired token";

/// Upload result body
///
/// A rejected extension is reported with 200 and `status: "error"`.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum UploadResponse {
    Ok { filename: String },
    Error { details: String },
}

impl UploadResponse {
    fn extension_not_allowed() -> Self {
        Self::Error {
            details: "file extension not allowed".to_string(),
        }
    }
}

/// A file pulled out of a multipart body
struct UploadedFile {
    filename: String,
    bytes: Vec<u8>,
}

/// Read the `file` field, skipping any others
async fn read_file_field(multipart: &mut Multipart) -> Result<UploadedFile, BackendError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("Malformed multipart body: {}", e);
        BackendError::from(SharedError::validation("file", e.body_text()))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(|e| {
            tracing::warn!("Failed to read upload: {}", e);
            BackendError::from(SharedError::validation("file", e.body_text()))
        })?;

        return Ok(UploadedFile {
            filename,
            bytes: bytes.to_vec(),
        });
    }

    Err(SharedError::missing("file").into())
}

/// Upload a new logo for the caller's business
///
/// # Returns
///
/// `{"status": "ok", "filename": "<public url>"}`, or the extension rejection
///
/// # Errors
///
/// * `400 Bad Request` - Missing `file` field or undecodable image
/// * `401 Unauthorized` - Missing or invalid bearer token
/// * `503 Service Unavailable` - If database is not configured
pub async fn upload_business_logo(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiMultipart(mut multipart): ApiMultipart,
) -> Result<Json<UploadResponse>, BackendError> {
    let file = read_file_field(&mut multipart).await?;

    let Some(ext) = ImageExtension::from_filename(&file.filename) else {
        tracing::warn!("Rejected logo upload {:?} from {}", file.filename, user.username);
        return Ok(Json(UploadResponse::extension_not_allowed()));
    };

    let store = state.store()?;
    let business = store
        .get_business_by_owner(user.id)
        .await?
        .ok_or_else(|| BackendError::not_found("Business not found"))?;

    let name = state.images.save(file.bytes, ext).await?;

    if let Err(e) = store.set_business_logo(business.id, &name).await {
        state.images.remove(&name).await;
        return Err(e.into());
    }

    tracing::info!("Business {} logo set to {}", business.id, name);

    Ok(Json(UploadResponse::Ok {
        filename: state.images.url_for(&name),
    }))
}

/// Upload a new image for one of the caller's products
///
/// # Errors
///
/// * `400 Bad Request` - Missing `file` field or undecodable image
/// * `401 Unauthorized` - Invalid token, or the product belongs to another business
/// * `404 Not Found` - Unknown product id
pub async fn upload_product_image(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(product_id): ApiPath<i64>,
    ApiMultipart(mut multipart): ApiMultipart,
) -> Result<Json<UploadResponse>, BackendError> {
    let file = read_file_field(&mut multipart).await?;

    let Some(ext) = ImageExtension::from_filename(&file.filename) else {
        tracing::warn!("Rejected product upload {:?} from {}", file.filename, user.username);
        return Ok(Json(UploadResponse::extension_not_allowed()));
    };

    let store = state.store()?;
    let product = store
        .get_product(product_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Product not found"))?;

    let owner = store
        .get_business_by_id(product.business_id)
        .await?
        .map(|b| b.owner_id);

    if owner != Some(user.id) {
        tracing::warn!(
            "User {} attempted to change image of product {} they do not own",
            user.id,
            product.id
        );
        return Err(BackendError::unauthorized(NOT_OWNER));
    }

    let name = state.images.save(file.bytes, ext).await?;

    if let Err(e) = store.set_product_image(product.id, &name).await {
        state.images.remove(&name).await;
        return Err(e.into());
    }

    tracing::info!("Product {} image set to {}", product.id, name);

    Ok(Json(UploadResponse::Ok {
        filename: state.images.url_for(&name),
    }))
}
