//! DTOs de autenticación y registro

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::{User, UserRole};

/// Request de registro. Los campos de conductor sólo son obligatorios
/// cuando `role = driver`; esa regla cruzada la valida el controlador.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 150))]
    pub username: String,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 100))]
    pub password: String,

    pub role: UserRole,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(max = 100))]
    pub patronymic: Option<String>,

    #[validate(length(min = 5, max = 20))]
    pub phone: String,

    // Campos de conductor
    #[validate(length(min = 2, max = 50))]
    pub driving_license: Option<String>,

    #[validate(range(min = 0, max = 70))]
    pub experience_years: Option<i32>,

    /// "own" para vehículo propio, o el id de un vehículo estacionado
    pub fleet_choice: Option<String>,
}

/// Request de login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response de autenticación: token más los datos básicos de la cuenta
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: Uuid,
    pub username: String,
    pub role: UserRole,
}

impl AuthResponse {
    pub fn new(token: String, user: &User) -> Self {
        Self {
            token,
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
        }
    }
}
