//! Controlador de la flota

use sqlx::PgPool;

use crate::dto::fleet_dto::FleetResponse;
use crate::repositories::fleet_repository::FleetRepository;
use crate::utils::errors::AppError;

pub struct FleetController {
    fleet: FleetRepository,
}

impl FleetController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            fleet: FleetRepository::new(pool),
        }
    }

    /// Vehículos estacionados que el formulario de registro puede ofrecer
    pub async fn available(&self) -> Result<Vec<FleetResponse>, AppError> {
        let vehicles = self.fleet.list_parked().await?;
        Ok(vehicles.into_iter().map(FleetResponse::from).collect())
    }
}
