//! Controlador de autenticación y registro
//!
//! El registro de un conductor exige permiso de conducir, años de
//! experiencia y una elección de vehículo: el propio ("own") o uno de
//! la flota que siga estacionado.

use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::dto::ApiResponse;
use crate::models::user::{User, UserRole};
use crate::repositories::user_repository::{NewAccount, NewProfile, UserRepository};
use crate::utils::errors::AppError;
use crate::utils::jwt::generate_token;
use crate::utils::validation::parse_uuid;

pub struct AuthController {
    users: UserRepository,
}

impl AuthController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    pub async fn register(
        &self,
        config: &EnvironmentConfig,
        request: RegisterRequest,
    ) -> Result<ApiResponse<AuthResponse>, AppError> {
        request.validate()?;

        if request.role == UserRole::Admin {
            return Err(AppError::BadRequest(
                "El registro sólo admite clientes y conductores".to_string(),
            ));
        }

        // Validación cruzada de los campos de conductor, antes de tocar la base
        let driver_fields = if request.role == UserRole::Driver {
            let driving_license = request
                .driving_license
                .clone()
                .filter(|l| !l.trim().is_empty())
                .ok_or_else(|| {
                    AppError::BadRequest(
                        "Para un conductor es obligatorio indicar el permiso de conducir"
                            .to_string(),
                    )
                })?;

            let experience_years = request.experience_years.ok_or_else(|| {
                AppError::BadRequest(
                    "Para un conductor es obligatorio indicar los años de experiencia".to_string(),
                )
            })?;

            let fleet_id = match request.fleet_choice.as_deref() {
                Some("own") => None,
                Some(raw) => Some(parse_uuid("fleet_choice", raw)?),
                None => {
                    return Err(AppError::BadRequest(
                        "Seleccione un vehículo de la flota o indique 'own'".to_string(),
                    ))
                }
            };

            Some((driving_license, experience_years, fleet_id))
        } else {
            None
        };

        if self.users.username_exists(&request.username).await? {
            return Err(AppError::Conflict(
                "El nombre de usuario ya está registrado".to_string(),
            ));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Error hashing password: {}", e)))?;

        let account = NewAccount {
            username: request.username,
            email: request.email,
            password_hash,
        };
        let profile = NewProfile {
            last_name: request.last_name,
            first_name: request.first_name,
            patronymic: request.patronymic.filter(|p| !p.trim().is_empty()),
            phone: request.phone,
        };

        let user: User = match driver_fields {
            None => {
                let (user, _client) = self.users.create_client_account(account, profile).await?;
                user
            }
            Some((driving_license, experience_years, fleet_id)) => {
                let (user, _driver) = self
                    .users
                    .create_driver_account(account, profile, driving_license, experience_years, fleet_id)
                    .await?;
                user
            }
        };

        let token = generate_token(user.id, user.role, config)?;

        Ok(ApiResponse::success_with_message(
            AuthResponse::new(token, &user),
            "Registro completado exitosamente".to_string(),
        ))
    }

    pub async fn login(
        &self,
        config: &EnvironmentConfig,
        request: LoginRequest,
    ) -> Result<AuthResponse, AppError> {
        let user = self
            .users
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        let valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Error verifying password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let token = generate_token(user.id, user.role, config)?;

        Ok(AuthResponse::new(token, &user))
    }
}
