//! Utilidades JWT
//!
//! Este módulo contiene funciones helper para emitir y validar los
//! tokens de sesión. El rol viaja en los claims, pero la identidad se
//! resuelve siempre contra la base de datos en el middleware.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{config::environment::EnvironmentConfig, models::user::UserRole, utils::errors::AppError};

/// Claims del JWT token
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // user_id
    pub role: UserRole,
    pub exp: usize, // expiration timestamp
    pub iat: usize, // issued at timestamp
}

/// Generar JWT token para un usuario
pub fn generate_token(
    user_id: Uuid,
    role: UserRole,
    config: &EnvironmentConfig,
) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expires_at = now + chrono::Duration::seconds(config.jwt_expiration as i64);

    let claims = JwtClaims {
        sub: user_id.to_string(),
        role,
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_ref());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AppError::Internal(format!("Error generando JWT: {}", e)))
}

/// Decodificar y validar un JWT token
pub fn decode_token(token: &str, config: &EnvironmentConfig) -> Result<JwtClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_ref());

    decode::<JwtClaims>(token, &decoding_key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|_| AppError::Unauthorized("Token inválido o expirado".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> EnvironmentConfig {
        EnvironmentConfig {
            environment: "test".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            jwt_secret: "secreto-de-pruebas".to_string(),
            jwt_expiration: 3600,
            cors_origins: vec![],
        }
    }

    #[test]
    fn token_roundtrip_preserves_subject_and_role() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = generate_token(user_id, UserRole::Driver, &config).unwrap();
        let claims = decode_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, UserRole::Driver);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let config = test_config();
        let token = generate_token(Uuid::new_v4(), UserRole::Client, &config).unwrap();

        let mut other = test_config();
        other.jwt_secret = "otro-secreto".to_string();

        assert!(decode_token(&token, &other).is_err());
    }
}
