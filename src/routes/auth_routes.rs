//! Rutas de autenticación

use axum::{
    extract::State,
    routing::post,
    Extension, Json, Router,
};
use serde_json::json;

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::dto::ApiResponse;
use crate::middleware::auth::Identity;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let controller = AuthController::new(state.pool.clone());
    let response = controller.register(&state.config, request).await?;
    Ok(Json(response))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone());
    let response = controller.login(&state.config, request).await?;
    Ok(Json(response))
}

/// Identidad resuelta de la request actual (requiere autenticación)
pub async fn me(Extension(identity): Extension<Identity>) -> Json<serde_json::Value> {
    let body = match &identity {
        Identity::Client(client) => json!({ "role": "client", "profile": client }),
        Identity::Driver(driver) => json!({ "role": "driver", "profile": driver }),
        Identity::Staff(user) => json!({
            "role": "admin",
            "profile": { "id": user.id, "username": user.username },
        }),
    };
    Json(body)
}
