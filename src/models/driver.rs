//! Modelo de Driver
//!
//! El estado del conductor lo muta exclusivamente el ciclo de vida de las
//! entregas: aceptar una entrega lo pone `en_route`, cancelarla o
//! completarla lo devuelve a `free`.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del conductor - mapea al ENUM driver_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "driver_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    Free,
    EnRoute,
    Idle,
}

impl DriverStatus {
    /// Etiqueta localizada para listados y exportación
    pub fn display_name(&self) -> &'static str {
        match self {
            DriverStatus::Free => "libre",
            DriverStatus::EnRoute => "en ruta",
            DriverStatus::Idle => "inactivo",
        }
    }
}

/// Driver - mapea exactamente a la tabla drivers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: Uuid,
    pub user_id: Uuid,
    pub last_name: String,
    pub first_name: String,
    pub patronymic: Option<String>,
    pub phone: String,
    pub driving_license: String,
    pub experience_years: i32,
    pub status: DriverStatus,
    pub fleet_id: Option<Uuid>,
}

impl Driver {
    pub fn full_name(&self) -> String {
        match &self.patronymic {
            Some(p) if !p.is_empty() => {
                format!("{} {} {}", self.last_name, self.first_name, p)
            }
            _ => format!("{} {}", self.last_name, self.first_name),
        }
    }
}
