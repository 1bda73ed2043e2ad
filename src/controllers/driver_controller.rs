//! Controlador de entregas del lado conductor
//!
//! Las transiciones delegan en los UPDATE condicionales del repositorio;
//! la comprobación local del estado del conductor sólo adelanta un error
//! más claro, la verificación autoritativa ocurre en la transacción.

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::delivery_dto::DeliverySummaryResponse;
use crate::dto::ApiResponse;
use crate::models::driver::{Driver, DriverStatus};
use crate::repositories::delivery_repository::DeliveryRepository;
use crate::utils::errors::AppError;

pub struct DriverController {
    deliveries: DeliveryRepository,
}

impl DriverController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            deliveries: DeliveryRepository::new(pool),
        }
    }

    /// Entregas registradas sin conductor, el tablón de disponibles
    pub async fn available(&self) -> Result<Vec<DeliverySummaryResponse>, AppError> {
        let rows = self.deliveries.list_available().await?;
        Ok(rows.into_iter().map(DeliverySummaryResponse::from).collect())
    }

    /// Entregas activas del conductor
    pub async fn current(&self, driver: &Driver) -> Result<Vec<DeliverySummaryResponse>, AppError> {
        let rows = self.deliveries.list_current_by_driver(driver.id).await?;
        Ok(rows.into_iter().map(DeliverySummaryResponse::from).collect())
    }

    pub async fn accept(
        &self,
        driver: &Driver,
        delivery_id: Uuid,
    ) -> Result<ApiResponse<()>, AppError> {
        if driver.status != DriverStatus::Free {
            return Err(AppError::Conflict(
                "El conductor no está libre para aceptar entregas".to_string(),
            ));
        }

        self.deliveries.accept(delivery_id, driver).await?;

        Ok(ApiResponse::success_with_message(
            (),
            "Entrega aceptada".to_string(),
        ))
    }

    pub async fn cancel(
        &self,
        driver: &Driver,
        delivery_id: Uuid,
    ) -> Result<ApiResponse<()>, AppError> {
        self.deliveries.driver_cancel(delivery_id, driver).await?;

        Ok(ApiResponse::success_with_message(
            (),
            "Entrega devuelta al tablón".to_string(),
        ))
    }

    pub async fn complete(
        &self,
        driver: &Driver,
        delivery_id: Uuid,
    ) -> Result<ApiResponse<()>, AppError> {
        self.deliveries.complete(delivery_id, driver).await?;

        Ok(ApiResponse::success_with_message(
            (),
            "Entrega completada".to_string(),
        ))
    }
}
