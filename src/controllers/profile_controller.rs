//! Controlador de perfiles con estadísticas de entregas

use sqlx::PgPool;

use crate::dto::profile_dto::{ClientProfileResponse, DriverProfileResponse};
use crate::models::client::Client;
use crate::models::driver::Driver;
use crate::repositories::delivery_repository::DeliveryRepository;
use crate::repositories::fleet_repository::FleetRepository;
use crate::utils::errors::AppError;

pub struct ProfileController {
    deliveries: DeliveryRepository,
    fleet: FleetRepository,
}

impl ProfileController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            deliveries: DeliveryRepository::new(pool.clone()),
            fleet: FleetRepository::new(pool),
        }
    }

    pub async fn client_profile(&self, client: &Client) -> Result<ClientProfileResponse, AppError> {
        let stats = self.deliveries.client_stats(client.id).await?;
        Ok(ClientProfileResponse::new(client, stats))
    }

    pub async fn driver_profile(&self, driver: &Driver) -> Result<DriverProfileResponse, AppError> {
        let vehicle = match driver.fleet_id {
            Some(fleet_id) => self.fleet.find_by_id(fleet_id).await?,
            None => None,
        };
        let stats = self.deliveries.driver_stats(driver.id).await?;

        Ok(DriverProfileResponse::new(driver, vehicle, stats))
    }
}
