//! Repositorio de perfiles de cliente

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::client::Client;
use crate::utils::errors::{store_error, AppError};

pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Error buscando cliente", e))
    }

    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Client>, AppError> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Error buscando cliente", e))
    }
}
