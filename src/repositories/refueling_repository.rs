//! Repositorio de repostajes

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::refueling::Refueling;
use crate::utils::errors::{store_error, AppError};

pub struct RefuelingRepository {
    pool: PgPool,
}

impl RefuelingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar un repostaje con el total ya derivado por el controlador
    pub async fn create(
        &self,
        fleet_id: Uuid,
        driver_id: Uuid,
        fuel_type: String,
        liters: Decimal,
        cost_per_liter: Decimal,
        total_cost: Decimal,
    ) -> Result<Refueling, AppError> {
        sqlx::query_as::<_, Refueling>(
            r#"
            INSERT INTO refuelings (id, fleet_id, driver_id, fuel_type, liters,
                                    cost_per_liter, total_cost, refueled_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(fleet_id)
        .bind(driver_id)
        .bind(fuel_type)
        .bind(liters)
        .bind(cost_per_liter)
        .bind(total_cost)
        .bind(chrono::Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error("Error registrando repostaje", e))
    }

    /// Historial de repostajes del conductor, el más reciente primero
    pub async fn list_by_driver(&self, driver_id: Uuid) -> Result<Vec<Refueling>, AppError> {
        sqlx::query_as::<_, Refueling>(
            "SELECT * FROM refuelings WHERE driver_id = $1 ORDER BY refueled_at DESC",
        )
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("Error listando repostajes", e))
    }
}
