//! Rutas del lado conductor

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::driver_controller::DriverController;
use crate::controllers::profile_controller::ProfileController;
use crate::controllers::refueling_controller::RefuelingController;
use crate::dto::delivery_dto::DeliverySummaryResponse;
use crate::dto::driver_dto::{RefuelingRequest, RefuelingResponse};
use crate::dto::profile_dto::DriverProfileResponse;
use crate::dto::ApiResponse;
use crate::middleware::auth::Identity;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/deliveries/available", get(available_deliveries))
        .route("/deliveries", get(current_deliveries))
        .route("/deliveries/:id/accept", post(accept_delivery))
        .route("/deliveries/:id/cancel", post(cancel_delivery))
        .route("/deliveries/:id/complete", post(complete_delivery))
        .route("/refuelings", post(record_refueling))
        .route("/refuelings", get(refueling_history))
        .route("/profile", get(driver_profile))
}

async fn available_deliveries(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<DeliverySummaryResponse>>, AppError> {
    identity.require_driver()?;
    let controller = DriverController::new(state.pool.clone());
    let response = controller.available().await?;
    Ok(Json(response))
}

async fn current_deliveries(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<DeliverySummaryResponse>>, AppError> {
    let driver = identity.require_driver()?;
    let controller = DriverController::new(state.pool.clone());
    let response = controller.current(driver).await?;
    Ok(Json(response))
}

async fn accept_delivery(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let driver = identity.require_driver()?;
    let controller = DriverController::new(state.pool.clone());
    let response = controller.accept(driver, id).await?;
    Ok(Json(response))
}

async fn cancel_delivery(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let driver = identity.require_driver()?;
    let controller = DriverController::new(state.pool.clone());
    let response = controller.cancel(driver, id).await?;
    Ok(Json(response))
}

async fn complete_delivery(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let driver = identity.require_driver()?;
    let controller = DriverController::new(state.pool.clone());
    let response = controller.complete(driver, id).await?;
    Ok(Json(response))
}

async fn record_refueling(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<RefuelingRequest>,
) -> Result<Json<ApiResponse<RefuelingResponse>>, AppError> {
    let driver = identity.require_driver()?;
    let controller = RefuelingController::new(state.pool.clone());
    let response = controller.record(driver, request).await?;
    Ok(Json(response))
}

async fn refueling_history(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<RefuelingResponse>>, AppError> {
    let driver = identity.require_driver()?;
    let controller = RefuelingController::new(state.pool.clone());
    let response = controller.history(driver).await?;
    Ok(Json(response))
}

async fn driver_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<DriverProfileResponse>, AppError> {
    let driver = identity.require_driver()?;
    let controller = ProfileController::new(state.pool.clone());
    let response = controller.driver_profile(driver).await?;
    Ok(Json(response))
}
