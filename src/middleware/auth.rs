//! Middleware de autenticación y resolución de identidad
//!
//! El token sólo identifica la cuenta; el rol efectivo se resuelve UNA
//! vez por request contra la base de datos y viaja como una unión
//! etiquetada en las extensions. Los handlers declaran el rol que
//! exigen con `require_client` / `require_driver`; cualquier otro caso
//! es `Forbidden` sin tocar estado.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::models::client::Client;
use crate::models::driver::Driver;
use crate::models::user::{User, UserRole};
use crate::repositories::client_repository::ClientRepository;
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::user_repository::UserRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::decode_token;
use crate::utils::validation::parse_uuid;

/// Identidad resuelta del actor de la request
#[derive(Debug, Clone)]
pub enum Identity {
    Client(Client),
    Driver(Driver),
    Staff(User),
}

impl Identity {
    pub fn role(&self) -> UserRole {
        match self {
            Identity::Client(_) => UserRole::Client,
            Identity::Driver(_) => UserRole::Driver,
            Identity::Staff(_) => UserRole::Admin,
        }
    }

    /// Exigir rol de cliente
    pub fn require_client(&self) -> Result<&Client, AppError> {
        match self {
            Identity::Client(client) => Ok(client),
            _ => Err(AppError::Forbidden(
                "Operación disponible sólo para clientes".to_string(),
            )),
        }
    }

    /// Exigir rol de conductor
    pub fn require_driver(&self) -> Result<&Driver, AppError> {
        match self {
            Identity::Driver(driver) => Ok(driver),
            _ => Err(AppError::Forbidden(
                "Operación disponible sólo para conductores".to_string(),
            )),
        }
    }
}

/// Middleware de autenticación: Bearer JWT -> cuenta -> identidad
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let claims = decode_token(token, &state.config)?;
    let user_id = parse_uuid("sub", &claims.sub)
        .map_err(|_| AppError::Unauthorized("Token inválido".to_string()))?;

    let user = UserRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

    let identity = resolve_identity(&state, user).await?;

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Resolver el perfil asociado al rol de la cuenta. Una cuenta sin
/// perfil no tiene rol efectivo y no puede invocar ninguna operación.
async fn resolve_identity(state: &AppState, user: User) -> Result<Identity, AppError> {
    match user.role {
        UserRole::Client => ClientRepository::new(state.pool.clone())
            .find_by_user_id(user.id)
            .await?
            .map(Identity::Client)
            .ok_or_else(|| {
                AppError::Forbidden("La cuenta no tiene perfil de cliente".to_string())
            }),
        UserRole::Driver => DriverRepository::new(state.pool.clone())
            .find_by_user_id(user.id)
            .await?
            .map(Identity::Driver)
            .ok_or_else(|| {
                AppError::Forbidden("La cuenta no tiene perfil de conductor".to_string())
            }),
        UserRole::Admin => Ok(Identity::Staff(user)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::driver::DriverStatus;
    use uuid::Uuid;

    fn client_identity() -> Identity {
        Identity::Client(Client {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            last_name: "García".to_string(),
            first_name: "Lucía".to_string(),
            patronymic: None,
            phone: "+34600000000".to_string(),
        })
    }

    fn driver_identity() -> Identity {
        Identity::Driver(Driver {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            last_name: "Pérez".to_string(),
            first_name: "Andrés".to_string(),
            patronymic: None,
            phone: "+34611111111".to_string(),
            driving_license: "B-1234567".to_string(),
            experience_years: 5,
            status: DriverStatus::Free,
            fleet_id: None,
        })
    }

    #[test]
    fn client_identity_passes_client_gate_only() {
        let identity = client_identity();
        assert!(identity.require_client().is_ok());
        assert!(matches!(
            identity.require_driver(),
            Err(AppError::Forbidden(_))
        ));
        assert_eq!(identity.role(), UserRole::Client);
    }

    #[test]
    fn driver_identity_passes_driver_gate_only() {
        let identity = driver_identity();
        assert!(identity.require_driver().is_ok());
        assert!(matches!(
            identity.require_client(),
            Err(AppError::Forbidden(_))
        ));
        assert_eq!(identity.role(), UserRole::Driver);
    }
}
