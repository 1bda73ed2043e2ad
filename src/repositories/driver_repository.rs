//! Repositorio de perfiles de conductor

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::driver::Driver;
use crate::utils::errors::{store_error, AppError};

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, AppError> {
        sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Error buscando conductor", e))
    }

    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Driver>, AppError> {
        sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Error buscando conductor", e))
    }
}
