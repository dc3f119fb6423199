/**
 * Token Handler
 *
 * This module implements POST /token, the OAuth2 password grant used to
 * obtain an access token.
 *
 * # Authentication Process
 *
 * 1. Look up user by username
 * 2. Verify password using bcrypt
 * 3. Generate access token
 *
 * # Security
 *
 * - Unknown usernames and wrong passwords return the same 401
 * - An unknown username still costs one bcrypt verification
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{TokenRequest, TokenResponse};
use crate::backend::error::BackendError;
use crate::backend::middleware::ApiForm;
use crate::backend::server::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Token handler
///
/// # Arguments
///
/// * `State(state)` - Application state
/// * `ApiForm(request)` - Form body with `username` and `password`
///
/// # Errors
///
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `503 Service Unavailable` - If database is not configured
/// * `500 Internal Server Error` - If database query or token generation fails
///
/// # Example Request
///
/// ```http
/// POST /token HTTP/1.1
/// Content-Type: application/x-www-form-urlencoded
///
/// username=alice&password=secret
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "token_type": "bearer"
/// }
/// ```
pub async fn issue_token(
    State(state): State<AppState>,
    ApiForm(request): ApiForm<TokenRequest>,
) -> Result<Json<TokenResponse>, BackendError> {
    let store = state.store()?;
    tracing::info!("Token request for: {}", request.username);

    let Some(user) = store.get_user_by_username(&request.username).await? else {
        state.passwords.dummy_verify(&request.password);
        tracing::warn!("User not found: {}", request.username);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    };

    if !state.passwords.verify(&request.password, &user.password_hash) {
        tracing::warn!("Invalid password for user: {}", request.username);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = state.tokens.issue_access_token(&user).map_err(|e| {
        BackendError::internal(format!("Failed to create access token: {:?}", e))
    })?;

    tracing::info!("Issued access token for {} ({})", user.username, user.id);

    Ok(Json(TokenResponse::bearer(token)))
}
