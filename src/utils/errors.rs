//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("No vehicle assigned")]
    NoVehicleAssigned,

    #[error("Invalid export format: {0}")]
    InvalidFormat(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl AppError {
    /// Código de estado HTTP asociado al error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NoVehicleAssigned => StatusCode::BAD_REQUEST,
            AppError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = match self {
            AppError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                ErrorResponse {
                    error: "Database Error".to_string(),
                    message: "Ocurrió un error accediendo a la base de datos".to_string(),
                    details: Some(json!({ "sql_error": msg })),
                    code: Some("DB_ERROR".to_string()),
                }
            }

            AppError::Validation(e) => ErrorResponse {
                error: "Validation Error".to_string(),
                message: "Los datos proporcionados no son válidos".to_string(),
                details: Some(json!(e)),
                code: Some("VALIDATION_ERROR".to_string()),
            },

            AppError::BadRequest(msg) => ErrorResponse {
                error: "Bad Request".to_string(),
                message: msg,
                details: None,
                code: Some("BAD_REQUEST".to_string()),
            },

            AppError::Unauthorized(msg) => ErrorResponse {
                error: "Unauthorized".to_string(),
                message: msg,
                details: None,
                code: Some("UNAUTHORIZED".to_string()),
            },

            AppError::Forbidden(msg) => ErrorResponse {
                error: "Forbidden".to_string(),
                message: msg,
                details: None,
                code: Some("FORBIDDEN".to_string()),
            },

            AppError::NotFound(msg) => ErrorResponse {
                error: "Not Found".to_string(),
                message: msg,
                details: None,
                code: Some("NOT_FOUND".to_string()),
            },

            AppError::Conflict(msg) => ErrorResponse {
                error: "Conflict".to_string(),
                message: msg,
                details: None,
                code: Some("CONFLICT".to_string()),
            },

            AppError::NoVehicleAssigned => ErrorResponse {
                error: "No Vehicle Assigned".to_string(),
                message: "El repostaje sólo está disponible para vehículos de la flota".to_string(),
                details: None,
                code: Some("NO_VEHICLE_ASSIGNED".to_string()),
            },

            AppError::InvalidFormat(format) => ErrorResponse {
                error: "Invalid Format".to_string(),
                message: format!("Formato de exportación desconocido: '{}'", format),
                details: None,
                code: Some("INVALID_FORMAT".to_string()),
            },

            AppError::ServiceUnavailable(msg) => {
                tracing::error!("Service unavailable: {}", msg);
                ErrorResponse {
                    error: "Service Unavailable".to_string(),
                    message: "El servicio no está disponible temporalmente".to_string(),
                    details: Some(json!({ "cause": msg })),
                    code: Some("SERVICE_UNAVAILABLE".to_string()),
                }
            }

            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorResponse {
                    error: "Internal Server Error".to_string(),
                    message: "Ocurrió un error inesperado".to_string(),
                    details: Some(json!({ "internal_error": msg })),
                    code: Some("INTERNAL_ERROR".to_string()),
                }
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Convertir un error de sqlx conservando el contexto de la operación.
/// Los timeouts del pool se reportan como indisponibilidad transitoria,
/// no como error interno; la transacción ya quedó abortada.
pub fn store_error(context: &str, e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            AppError::ServiceUnavailable(format!("{}: {}", context, e))
        }
        other => AppError::Database(format!("{}: {}", context, other)),
    }
}

/// Detectar la violación de una restricción UNIQUE (código 23505 de
/// PostgreSQL), usada por las inserciones a-lo-sumo-una-vez.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db) => db.code().as_deref() == Some("23505"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_expected_status_codes() {
        assert_eq!(
            AppError::Forbidden("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::NoVehicleAssigned.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidFormat("xml".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::ServiceUnavailable("x".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn pool_timeout_is_service_unavailable() {
        let err = store_error("probando", sqlx::Error::PoolTimedOut);
        assert!(matches!(err, AppError::ServiceUnavailable(_)));

        let err = store_error("probando", sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::Database(_)));
    }
}
