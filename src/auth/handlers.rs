use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{present, LoginRequest, LoginResponse, RegisterRequest},
        jwt::JwtKeys,
        password::{hash_password_blocking, verify_password_blocking},
        repo_types::{NewUser, User},
    },
    error::{internal, ApiError, ApiResult},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/user", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let Ok(Json(payload)) = payload else {
        return Err(ApiError::BadRequest("Missing fields"));
    };
    let (Some(name), Some(email), Some(password)) = (
        present(payload.name),
        present(payload.email),
        present(payload.password),
    ) else {
        warn!("registration with missing fields");
        return Err(ApiError::BadRequest("Missing fields"));
    };

    let password_hash = hash_password_blocking(password)
        .await
        .map_err(internal("hash password"))?;

    let user = state
        .store
        .insert_user(NewUser {
            name,
            email,
            password_hash,
            created_at: OffsetDateTime::now_utc(),
        })
        .await
        .map_err(internal("create user"))?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Ok(Json(payload)) = payload else {
        return Err(ApiError::BadRequest("Missing login details"));
    };
    let (Some(email), Some(password)) = (present(payload.email), present(payload.password))
    else {
        return Err(ApiError::BadRequest("Missing login details"));
    };

    let user = state
        .store
        .find_user_by_email(&email)
        .await
        .map_err(internal("find user by email"))?
        .ok_or_else(|| {
            warn!(email = %email, "login unknown email");
            ApiError::NotFoundMessage("User not found")
        })?;

    let ok = verify_password_blocking(password, user.password.clone())
        .await
        .map_err(internal("verify password"))?;
    if !ok {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = JwtKeys::from_ref(&state)
        .sign(&user.email)
        .map_err(internal("sign token"))?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(LoginResponse {
        message: "Login Successful",
        token,
    }))
}
