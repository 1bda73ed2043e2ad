//! DTOs de la flota

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::fleet::{Fleet, FleetStatus};

/// Response de vehículo
#[derive(Debug, Serialize)]
pub struct FleetResponse {
    pub id: Uuid,
    pub license_plate: String,
    pub model: String,
    pub capacity: Decimal,
    pub status: FleetStatus,
    pub status_display: &'static str,
}

impl From<Fleet> for FleetResponse {
    fn from(fleet: Fleet) -> Self {
        Self {
            id: fleet.id,
            license_plate: fleet.license_plate,
            model: fleet.model,
            capacity: fleet.capacity,
            status: fleet.status,
            status_display: fleet.status.display_name(),
        }
    }
}
