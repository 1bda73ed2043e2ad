//! Repositorio de comentarios

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::feedback::Feedback;
use crate::utils::errors::{is_unique_violation, store_error, AppError};

pub struct FeedbackRepository {
    pool: PgPool,
}

impl FeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn exists_for_delivery(&self, delivery_id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM feedbacks WHERE delivery_id = $1)")
                .bind(delivery_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| store_error("Error comprobando comentario", e))?;

        Ok(result.0)
    }

    /// Insertar el comentario; `None` si la entrega ya tenía uno
    pub async fn create(
        &self,
        delivery_id: Uuid,
        client_id: Uuid,
        content: String,
    ) -> Result<Option<Feedback>, AppError> {
        let result = sqlx::query_as::<_, Feedback>(
            r#"
            INSERT INTO feedbacks (id, delivery_id, client_id, content, submitted_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(delivery_id)
        .bind(client_id)
        .bind(content)
        .bind(chrono::Utc::now())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(feedback) => Ok(Some(feedback)),
            Err(e) if is_unique_violation(&e) => Ok(None),
            Err(e) => Err(store_error("Error registrando comentario", e)),
        }
    }
}
