//! DTOs de perfiles con estadísticas

use serde::Serialize;
use uuid::Uuid;

use crate::dto::fleet_dto::FleetResponse;
use crate::models::client::Client;
use crate::models::driver::{Driver, DriverStatus};
use crate::models::fleet::Fleet;
use crate::repositories::delivery_repository::DeliveryStats;

/// Perfil del cliente con sus contadores de entregas
#[derive(Debug, Serialize)]
pub struct ClientProfileResponse {
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub stats: DeliveryStats,
}

impl ClientProfileResponse {
    pub fn new(client: &Client, stats: DeliveryStats) -> Self {
        Self {
            id: client.id,
            full_name: client.full_name(),
            phone: client.phone.clone(),
            stats,
        }
    }
}

/// Perfil del conductor con su vehículo y contadores
#[derive(Debug, Serialize)]
pub struct DriverProfileResponse {
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub driving_license: String,
    pub experience_years: i32,
    pub status: DriverStatus,
    pub status_display: &'static str,
    pub vehicle: Option<FleetResponse>,
    pub stats: DeliveryStats,
}

impl DriverProfileResponse {
    pub fn new(driver: &Driver, vehicle: Option<Fleet>, stats: DeliveryStats) -> Self {
        Self {
            id: driver.id,
            full_name: driver.full_name(),
            phone: driver.phone.clone(),
            driving_license: driver.driving_license.clone(),
            experience_years: driver.experience_years,
            status: driver.status,
            status_display: driver.status.display_name(),
            vehicle: vehicle.map(FleetResponse::from),
            stats,
        }
    }
}
