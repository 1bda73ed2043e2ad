//! Controlador de repostajes

use sqlx::PgPool;
use validator::Validate;

use crate::dto::driver_dto::{RefuelingRequest, RefuelingResponse};
use crate::dto::ApiResponse;
use crate::models::driver::Driver;
use crate::models::refueling::Refueling;
use crate::repositories::refueling_repository::RefuelingRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::require_positive;

pub struct RefuelingController {
    refuelings: RefuelingRepository,
}

impl RefuelingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            refuelings: RefuelingRepository::new(pool),
        }
    }

    /// Registrar un repostaje sobre el vehículo asignado al conductor.
    /// El total se deriva aquí; cualquier total enviado por el cliente
    /// se ignora.
    pub async fn record(
        &self,
        driver: &Driver,
        request: RefuelingRequest,
    ) -> Result<ApiResponse<RefuelingResponse>, AppError> {
        request.validate()?;

        let fleet_id = driver.fleet_id.ok_or(AppError::NoVehicleAssigned)?;

        let liters = require_positive("liters", request.liters)?;
        let cost_per_liter = require_positive("cost_per_liter", request.cost_per_liter)?;
        let total_cost = Refueling::total_cost_of(liters, cost_per_liter);

        let refueling = self
            .refuelings
            .create(
                fleet_id,
                driver.id,
                request.fuel_type,
                liters,
                cost_per_liter,
                total_cost,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            RefuelingResponse::from(refueling),
            "Repostaje registrado".to_string(),
        ))
    }

    pub async fn history(&self, driver: &Driver) -> Result<Vec<RefuelingResponse>, AppError> {
        let refuelings = self.refuelings.list_by_driver(driver.id).await?;
        Ok(refuelings.into_iter().map(RefuelingResponse::from).collect())
    }
}
