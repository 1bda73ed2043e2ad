//! Repositorio de pagos
//!
//! A lo sumo un pago por entrega: además de la comprobación previa del
//! controlador, la restricción UNIQUE de la tabla cierra la carrera
//! entre dos registros simultáneos.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::payment::{Payment, PaymentMethod};
use crate::utils::errors::{is_unique_violation, store_error, AppError};

pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn exists_for_delivery(&self, delivery_id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM payments WHERE delivery_id = $1)")
                .bind(delivery_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| store_error("Error comprobando pago", e))?;

        Ok(result.0)
    }

    /// Insertar el pago. Devuelve `None` si otro registro ganó la
    /// carrera; el llamante lo trata como el mismo no-op idempotente que
    /// la comprobación previa.
    pub async fn create(
        &self,
        delivery_id: Uuid,
        amount: Decimal,
        method: PaymentMethod,
    ) -> Result<Option<Payment>, AppError> {
        let result = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (id, delivery_id, amount, method, status, payment_date)
            VALUES ($1, $2, $3, $4, 'completed', $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(delivery_id)
        .bind(amount)
        .bind(method)
        .bind(chrono::Utc::now())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(payment) => Ok(Some(payment)),
            Err(e) if is_unique_violation(&e) => Ok(None),
            Err(e) => Err(store_error("Error registrando pago", e)),
        }
    }
}
