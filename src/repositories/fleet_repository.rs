//! Repositorio de la flota

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::fleet::Fleet;
use crate::utils::errors::{store_error, AppError};

pub struct FleetRepository {
    pool: PgPool,
}

impl FleetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Fleet>, AppError> {
        sqlx::query_as::<_, Fleet>("SELECT * FROM fleet WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Error buscando vehículo", e))
    }

    /// Vehículos estacionados, los que el formulario de registro ofrece
    pub async fn list_parked(&self) -> Result<Vec<Fleet>, AppError> {
        sqlx::query_as::<_, Fleet>(
            "SELECT * FROM fleet WHERE status = 'parked' ORDER BY license_plate",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("Error listando vehículos", e))
    }
}
