use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthOutcome, LoginRequest, SignupRequest},
        error::AuthError,
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        .route("/auth/health", get(health))
}

/// Denials are answered with 401 and the failed outcome as the body, so the
/// client always gets the reason message.
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(axum::http::StatusCode, Json<AuthOutcome>), (axum::http::StatusCode, String)> {
    let outcome = state.auth.login(payload).await.map_err(internal_error)?;

    if outcome.success {
        info!("login granted");
        Ok((axum::http::StatusCode::OK, Json(outcome)))
    } else {
        warn!(reason = %outcome.message, "login denied");
        Ok((axum::http::StatusCode::UNAUTHORIZED, Json(outcome)))
    }
}

/// Denials are answered with 400 and the failed outcome as the body.
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(axum::http::StatusCode, Json<AuthOutcome>), (axum::http::StatusCode, String)> {
    let outcome = state.auth.signup(payload).await.map_err(internal_error)?;

    if outcome.success {
        info!("signup granted");
        Ok((axum::http::StatusCode::CREATED, Json(outcome)))
    } else {
        warn!(reason = %outcome.message, "signup denied");
        Ok((axum::http::StatusCode::BAD_REQUEST, Json(outcome)))
    }
}

pub async fn health() -> &'static str {
    "Backend is running!"
}

/// Unexpected failures never leak their cause to the client.
fn internal_error(err: AuthError) -> (axum::http::StatusCode, String) {
    error!(error = %err, "auth backend failure");
    (
        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}
