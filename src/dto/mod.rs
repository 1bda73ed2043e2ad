//! DTOs de la API
//!
//! Requests validados con `validator` y responses serializables; los
//! modelos de la base nunca salen directamente por la API.

pub mod auth_dto;
pub mod delivery_dto;
pub mod driver_dto;
pub mod fleet_dto;
pub mod profile_dto;

use serde::Serialize;

/// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }

    /// No-op idempotente: la operación ya se había registrado antes
    pub fn already_recorded(message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: None,
        }
    }
}
