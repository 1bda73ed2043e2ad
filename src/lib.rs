//! Backend de gestión de entregas
//!
//! Clientes registran entregas, conductores las aceptan y completan, y
//! los vehículos de la flota siguen a sus conductores por el ciclo de
//! vida. Las transiciones de estado acopladas (entrega + conductor +
//! vehículo) se confirman siempre como una sola transacción.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{middleware as axum_middleware, response::Json, routing::get, Router};
use serde_json::json;

use middleware::auth::auth_middleware;
use middleware::cors::cors_middleware;
use state::AppState;

/// Construir el router completo de la aplicación
pub fn build_router(app_state: AppState) -> Router {
    // Rutas protegidas: identidad resuelta una vez por request
    let protected = Router::new()
        .nest("/api/client", routes::client_routes::create_client_router())
        .nest("/api/driver", routes::driver_routes::create_driver_router())
        .route("/api/auth/me", get(routes::auth_routes::me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/test", get(test_endpoint))
        .nest("/api/auth", routes::auth_routes::create_auth_router())
        .nest("/api/fleet", routes::fleet_routes::create_fleet_router())
        .merge(protected)
        .layer(cors_middleware())
        .with_state(app_state)
}

/// Endpoint de prueba simple
async fn test_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Transport Backend funcionando correctamente",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
