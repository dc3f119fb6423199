/**
 * Email Verification Handler
 *
 * GET /verification?token=... is the target of the emailed link. A valid token
 * for an unverified user marks the account verified and renders a
 * confirmation page. The link is single-use: once the account is verified the
 * same token is refused.
 */

use askama::Template;
use axum::{extract::State, response::Html};

use crate::backend::auth::handlers::types::VerificationQuery;
use crate::backend::error::BackendError;
use crate::backend::middleware::ApiQuery;
use crate::backend::server::state::AppState;

const INVALID_TOKEN: &str = "Invalid token or expired token";

/// Confirmation page shown after a successful verification
#[derive(Template)]
#[template(path = "verification.html")]
pub struct VerificationPage<'a> {
    pub username: &'a str,
}

/// Verification handler
///
/// # Errors
///
/// * `401 Unauthorized` - Invalid or expired token, unknown user, or the
///   account is already verified
/// * `503 Service Unavailable` - If database is not configured
pub async fn verify_email(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<VerificationQuery>,
) -> Result<Html<String>, BackendError> {
    let claims = state
        .tokens
        .verify_verification_token(&query.token)
        .map_err(|e| {
            tracing::warn!("Rejected verification token: {:?}", e);
            BackendError::unauthorized(INVALID_TOKEN)
        })?;

    let store = state.store()?;
    let user = store
        .get_user_by_email(&claims.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Verification token for unknown email {}", claims.email);
            BackendError::unauthorized(INVALID_TOKEN)
        })?;

    if user.is_verified {
        tracing::warn!("User {} is already verified", user.username);
        return Err(BackendError::unauthorized(INVALID_TOKEN));
    }

    // Conditional update: a second click racing this one gets `None`
    let Some(user) = store.mark_user_verified(user.id).await? else {
        tracing::warn!("User {} was verified concurrently", user.username);
        return Err(BackendError::unauthorized(INVALID_TOKEN));
    };
    tracing::info!("User {} verified their email", user.username);

    let page = VerificationPage {
        username: &user.username,
    }
    .render()
    .map_err(|e| BackendError::internal(format!("Failed to render verification page: {}", e)))?;

    Ok(Html(page))
}
