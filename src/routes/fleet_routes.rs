//! Rutas de la flota
//!
//! Lectura pública: el formulario de registro necesita la lista de
//! vehículos estacionados antes de que exista la cuenta.

use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::fleet_controller::FleetController;
use crate::dto::fleet_dto::FleetResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_fleet_router() -> Router<AppState> {
    Router::new().route("/available", get(available_vehicles))
}

async fn available_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<FleetResponse>>, AppError> {
    let controller = FleetController::new(state.pool.clone());
    let response = controller.available().await?;
    Ok(Json(response))
}
