//! Modelo de Client

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Perfil de cliente - mapea exactamente a la tabla clients
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub id: Uuid,
    pub user_id: Uuid,
    pub last_name: String,
    pub first_name: String,
    pub patronymic: Option<String>,
    pub phone: String,
}

impl Client {
    /// Nombre completo para respuestas y listados
    pub fn full_name(&self) -> String {
        match &self.patronymic {
            Some(p) if !p.is_empty() => {
                format!("{} {} {}", self.last_name, self.first_name, p)
            }
            _ => format!("{} {}", self.last_name, self.first_name),
        }
    }
}
