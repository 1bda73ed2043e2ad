//! Modelo de Fleet (vehículo de la flota)
//!
//! Invariante: el estado del vehículo sigue al conductor que lo tiene
//! asignado. Como máximo un conductor lo mantiene `in_use` a la vez; el
//! UPDATE condicional sobre `status = 'parked'` en la aceptación de una
//! entrega es lo que lo garantiza.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del vehículo - mapea al ENUM fleet_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "fleet_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FleetStatus {
    Parked,
    InUse,
}

impl FleetStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            FleetStatus::Parked => "estacionado",
            FleetStatus::InUse => "en uso",
        }
    }
}

/// Fleet - mapea exactamente a la tabla fleet
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Fleet {
    pub id: Uuid,
    pub license_plate: String,
    pub model: String,
    pub capacity: Decimal,
    pub status: FleetStatus,
}
