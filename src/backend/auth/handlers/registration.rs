/**
 * Registration Handler
 *
 * This module implements the user registration handler for POST /registration.
 *
 * # Registration Process
 *
 * 1. Validate username, email and password
 * 2. Hash password using bcrypt
 * 3. Create the user and its business in one transaction
 * 4. Send the verification email
 *
 * A failed email does not undo the registration; it is logged.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{RegistrationRequest, StatusResponse};
use crate::backend::email::verification_link;
use crate::backend::error::BackendError;
use crate::backend::middleware::ApiJson;
use crate::backend::server::state::AppState;
use crate::backend::store::{NewUser, User};

/// Registration handler
///
/// # Arguments
///
/// * `State(state)` - Application state
/// * `ApiJson(request)` - Username, email and password
///
/// # Errors
///
/// * `400 Bad Request` - If a field fails validation
/// * `409 Conflict` - If the username or email is already registered
/// * `503 Service Unavailable` - If database is not configured
/// * `500 Internal Server Error` - If password hashing or user creation fails
///
/// # Example Request
///
/// ```http
/// POST /registration HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "securepassword123"
/// }
/// ```
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegistrationRequest>,
) -> Result<Json<StatusResponse<String>>, BackendError> {
    tracing::info!(
        "Registration request for username: {}, email: {}",
        request.username,
        request.email
    );

    request.validate().map_err(|e| {
        tracing::warn!("Rejected registration: {}", e);
        e
    })?;

    let store = state.store()?;

    let password_hash = state
        .passwords
        .hash(&request.password)
        .map_err(|e| BackendError::internal(format!("Failed to hash password: {:?}", e)))?;

    let (user, business) = store
        .create_user_with_business(NewUser {
            username: request.username,
            email: request.email,
            password_hash,
        })
        .await
        .map_err(|e| {
            tracing::warn!("Failed to create user: {}", e);
            e
        })?;

    tracing::info!(
        "User created successfully: {} ({}), business {}",
        user.username,
        user.id,
        business.id
    );

    send_verification_email(&state, &user).await;

    Ok(Json(StatusResponse::ok(format!(
        "Hello {}, thanks for choosing our services. Please check your email and click the link for confirm your account.",
        user.username
    ))))
}

/// Issue a verification token and mail the confirmation link
///
/// Without a mailer the link is logged, which is enough for local development.
async fn send_verification_email(state: &AppState, user: &User) {
    let token = match state.tokens.issue_verification_token(&user.email) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Failed to create verification token for {}: {:?}", user.email, e);
            return;
        }
    };
    let link = verification_link(&state.config.public_base_url, &token);

    match &state.mailer {
        Some(mailer) => {
            if let Err(e) = mailer
                .send_verification(&user.email, &user.username, &link)
                .await
            {
                tracing::error!("Failed to send verification email to {}: {}", user.email, e);
            }
        }
        None => {
            tracing::info!("SMTP not configured; verification link for {}: {}", user.email, link);
        }
    }
}
