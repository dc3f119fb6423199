/**
 * Get Current User Handler
 *
 * This module implements the handler for POST /user/me, which returns
 * information about the currently authenticated user.
 *
 * The bearer token is checked by `auth_middleware`; this handler only reads
 * the user it attached.
 */

use axum::response::Json;

use crate::backend::auth::handlers::types::{ProfileData, StatusResponse};
use crate::backend::middleware::AuthUser;

/// Get current user handler
///
/// # Example Response
///
/// ```json
/// {
///   "status": "ok",
///   "data": {
///     "username": "alice",
///     "email": "alice@example.com",
///     "verified": false,
///     "joined_date": "2024-05-01T10:00:00Z"
///   }
/// }
/// ```
pub async fn get_me(AuthUser(user): AuthUser) -> Json<StatusResponse<ProfileData>> {
    Json(StatusResponse::ok(ProfileData::from(user)))
}
