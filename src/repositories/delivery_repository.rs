//! Repositorio de entregas y máquina de estados del ciclo de vida
//!
//! Cada transición (aceptar, cancelar, completar) escribe sobre las tres
//! entidades acopladas (entrega, conductor, vehículo) dentro de UNA
//! transacción. La precondición se verifica con un UPDATE condicional
//! sobre el estado actual: de dos llamadas concurrentes sólo una ve
//! `rows_affected() == 1`; la otra recibe `Conflict` sin dejar escrituras
//! parciales.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::cargo::Cargo;
use crate::models::delivery::{Delivery, DeliveryStatus, DeliveryType};
use crate::models::driver::Driver;
use crate::models::route::Route;
use crate::utils::errors::{store_error, AppError};

/// Carga nueva creada junto con la entrega
pub struct NewCargo {
    pub name: String,
    pub weight: Decimal,
}

/// Ruta nueva creada junto con la entrega
pub struct NewRoute {
    pub departure_city: String,
    pub departure_street: String,
    pub departure_house: String,
    pub arrival_city: String,
    pub arrival_street: String,
    pub arrival_house: String,
    pub distance: Option<Decimal>,
}

/// Fila de listado: entrega con su carga y su ruta ya unidas
#[derive(Debug, Clone, FromRow)]
pub struct DeliverySummaryRow {
    pub id: Uuid,
    pub status: DeliveryStatus,
    pub delivery_type: DeliveryType,
    pub created_at: DateTime<Utc>,
    pub driver_id: Option<Uuid>,
    pub cargo_name: String,
    pub cargo_weight: Decimal,
    pub departure_city: String,
    pub departure_street: String,
    pub departure_house: String,
    pub arrival_city: String,
    pub arrival_street: String,
    pub arrival_house: String,
    pub distance: Option<Decimal>,
}

/// Insumos del motor de tarifas para una entrega concreta
#[derive(Debug, FromRow)]
pub struct PricingInputs {
    pub distance: Option<Decimal>,
    pub weight: Decimal,
}

/// Estadísticas de entregas para los perfiles
#[derive(Debug, FromRow, serde::Serialize)]
pub struct DeliveryStats {
    pub total: i64,
    pub completed: i64,
    pub active: i64,
}

const SUMMARY_SELECT: &str = r#"
    SELECT d.id, d.status, d.delivery_type, d.created_at, d.driver_id,
           c.name AS cargo_name, c.weight AS cargo_weight,
           r.departure_city, r.departure_street, r.departure_house,
           r.arrival_city, r.arrival_street, r.arrival_house, r.distance
    FROM deliveries d
    JOIN cargos c ON c.id = d.cargo_id
    JOIN routes r ON r.delivery_id = d.id
"#;

pub struct DeliveryRepository {
    pool: PgPool,
}

impl DeliveryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear entrega + carga + ruta como una unidad
    pub async fn create(
        &self,
        client_id: Uuid,
        delivery_type: DeliveryType,
        cargo: NewCargo,
        route: NewRoute,
    ) -> Result<(Delivery, Cargo, Route), AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_error("Error abriendo transacción", e))?;

        let cargo = sqlx::query_as::<_, Cargo>(
            "INSERT INTO cargos (id, name, weight) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(cargo.name)
        .bind(cargo.weight)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| store_error("Error creando carga", e))?;

        let delivery = sqlx::query_as::<_, Delivery>(
            r#"
            INSERT INTO deliveries (id, client_id, cargo_id, driver_id, status, delivery_type, created_at)
            VALUES ($1, $2, $3, NULL, 'placed', $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(client_id)
        .bind(cargo.id)
        .bind(delivery_type)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| store_error("Error creando entrega", e))?;

        let route = sqlx::query_as::<_, Route>(
            r#"
            INSERT INTO routes (id, delivery_id, departure_city, departure_street, departure_house,
                                arrival_city, arrival_street, arrival_house, distance)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(delivery.id)
        .bind(route.departure_city)
        .bind(route.departure_street)
        .bind(route.departure_house)
        .bind(route.arrival_city)
        .bind(route.arrival_street)
        .bind(route.arrival_house)
        .bind(route.distance)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| store_error("Error creando ruta", e))?;

        tx.commit()
            .await
            .map_err(|e| store_error("Error confirmando creación de entrega", e))?;

        Ok((delivery, cargo, route))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Delivery>, AppError> {
        sqlx::query_as::<_, Delivery>("SELECT * FROM deliveries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Error buscando entrega", e))
    }

    /// Buscar una entrega que pertenezca al cliente indicado
    pub async fn find_owned(
        &self,
        client_id: Uuid,
        delivery_id: Uuid,
    ) -> Result<Option<Delivery>, AppError> {
        sqlx::query_as::<_, Delivery>(
            "SELECT * FROM deliveries WHERE id = $1 AND client_id = $2",
        )
        .bind(delivery_id)
        .bind(client_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Error buscando entrega del cliente", e))
    }

    /// Fila de detalle (carga y ruta unidas) de una entrega del cliente
    pub async fn find_summary_owned(
        &self,
        client_id: Uuid,
        delivery_id: Uuid,
    ) -> Result<Option<DeliverySummaryRow>, AppError> {
        let sql = format!("{} WHERE d.id = $1 AND d.client_id = $2", SUMMARY_SELECT);
        sqlx::query_as::<_, DeliverySummaryRow>(&sql)
            .bind(delivery_id)
            .bind(client_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Error buscando entrega del cliente", e))
    }

    /// Entregas del cliente, las más recientes primero
    pub async fn list_by_client(
        &self,
        client_id: Uuid,
        status: Option<DeliveryStatus>,
    ) -> Result<Vec<DeliverySummaryRow>, AppError> {
        let result = match status {
            Some(status) => {
                let sql = format!(
                    "{} WHERE d.client_id = $1 AND d.status = $2 ORDER BY d.created_at DESC",
                    SUMMARY_SELECT
                );
                sqlx::query_as::<_, DeliverySummaryRow>(&sql)
                    .bind(client_id)
                    .bind(status)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let sql = format!(
                    "{} WHERE d.client_id = $1 ORDER BY d.created_at DESC",
                    SUMMARY_SELECT
                );
                sqlx::query_as::<_, DeliverySummaryRow>(&sql)
                    .bind(client_id)
                    .fetch_all(&self.pool)
                    .await
            }
        };

        result.map_err(|e| store_error("Error listando entregas del cliente", e))
    }

    /// Entregas registradas y sin conductor, disponibles para aceptar
    pub async fn list_available(&self) -> Result<Vec<DeliverySummaryRow>, AppError> {
        let sql = format!(
            "{} WHERE d.status = 'placed' AND d.driver_id IS NULL ORDER BY d.created_at",
            SUMMARY_SELECT
        );
        sqlx::query_as::<_, DeliverySummaryRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error("Error listando entregas disponibles", e))
    }

    /// Entregas activas del conductor (ni completadas ni canceladas)
    pub async fn list_current_by_driver(
        &self,
        driver_id: Uuid,
    ) -> Result<Vec<DeliverySummaryRow>, AppError> {
        let sql = format!(
            "{} WHERE d.driver_id = $1 AND d.status NOT IN ('delivered', 'cancelled') ORDER BY d.created_at DESC",
            SUMMARY_SELECT
        );
        sqlx::query_as::<_, DeliverySummaryRow>(&sql)
            .bind(driver_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error("Error listando entregas del conductor", e))
    }

    /// Distancia y peso para recalcular el precio de una entrega
    pub async fn pricing_inputs(
        &self,
        delivery_id: Uuid,
    ) -> Result<Option<PricingInputs>, AppError> {
        sqlx::query_as::<_, PricingInputs>(
            r#"
            SELECT r.distance, c.weight
            FROM deliveries d
            JOIN cargos c ON c.id = d.cargo_id
            JOIN routes r ON r.delivery_id = d.id
            WHERE d.id = $1
            "#,
        )
        .bind(delivery_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Error leyendo datos de tarifa", e))
    }

    /// Cancelación por el cliente: sólo mientras la entrega siga
    /// registrada y sin conductor. Cancelación blanda, la fila se
    /// conserva para exportaciones y estadísticas.
    pub async fn cancel_by_client(
        &self,
        client_id: Uuid,
        delivery_id: Uuid,
    ) -> Result<(), AppError> {
        let updated = sqlx::query(
            r#"
            UPDATE deliveries SET status = 'cancelled'
            WHERE id = $1 AND client_id = $2 AND status = 'placed' AND driver_id IS NULL
            "#,
        )
        .bind(delivery_id)
        .bind(client_id)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Error cancelando entrega", e))?;

        if updated.rows_affected() == 0 {
            return match self.find_owned(client_id, delivery_id).await? {
                Some(_) => Err(AppError::Conflict(
                    "La entrega ya no puede cancelarse: un conductor la tomó o ya está cerrada"
                        .to_string(),
                )),
                None => Err(AppError::NotFound("Entrega no encontrada".to_string())),
            };
        }

        Ok(())
    }

    /// Aceptación por un conductor libre.
    ///
    /// Tres escrituras acopladas en una transacción:
    ///   1. entrega: placed/sin conductor -> en_route/conductor asignado
    ///   2. conductor: free -> en_route
    ///   3. vehículo asignado (si lo hay): parked -> in_use
    /// Si cualquier UPDATE condicional no toca fila, la precondición ya
    /// no se cumple: rollback y `Conflict`.
    pub async fn accept(&self, delivery_id: Uuid, driver: &Driver) -> Result<(), AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_error("Error abriendo transacción", e))?;

        let claimed = sqlx::query(
            r#"
            UPDATE deliveries SET driver_id = $2, status = 'en_route'
            WHERE id = $1 AND status = 'placed' AND driver_id IS NULL
            "#,
        )
        .bind(delivery_id)
        .bind(driver.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| store_error("Error aceptando entrega", e))?;

        if claimed.rows_affected() == 0 {
            tx.rollback().await.ok();
            return match self.find_by_id(delivery_id).await? {
                Some(_) => Err(AppError::Conflict(
                    "La entrega ya fue tomada por otro conductor".to_string(),
                )),
                None => Err(AppError::NotFound("Entrega no encontrada".to_string())),
            };
        }

        let freed = sqlx::query("UPDATE drivers SET status = 'en_route' WHERE id = $1 AND status = 'free'")
            .bind(driver.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| store_error("Error actualizando conductor", e))?;

        if freed.rows_affected() == 0 {
            tx.rollback().await.ok();
            return Err(AppError::Conflict(
                "El conductor no está libre para aceptar entregas".to_string(),
            ));
        }

        if let Some(fleet_id) = driver.fleet_id {
            let taken = sqlx::query("UPDATE fleet SET status = 'in_use' WHERE id = $1 AND status = 'parked'")
                .bind(fleet_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| store_error("Error actualizando vehículo", e))?;

            if taken.rows_affected() == 0 {
                tx.rollback().await.ok();
                return Err(AppError::Conflict(
                    "El vehículo asignado ya está en uso".to_string(),
                ));
            }
        }

        tx.commit()
            .await
            .map_err(|e| store_error("Error confirmando aceptación", e))?;

        Ok(())
    }

    /// El conductor devuelve la entrega: vuelve a estar registrada y sin
    /// conductor, él queda libre y su vehículo estacionado.
    pub async fn driver_cancel(&self, delivery_id: Uuid, driver: &Driver) -> Result<(), AppError> {
        self.release(delivery_id, driver, "placed", true).await
    }

    /// El conductor completa la entrega: estado terminal `delivered`,
    /// conductor libre y vehículo estacionado.
    pub async fn complete(&self, delivery_id: Uuid, driver: &Driver) -> Result<(), AppError> {
        self.release(delivery_id, driver, "delivered", false).await
    }

    /// Transición común de salida de `en_route`. `clear_driver` indica si
    /// la entrega vuelve al tablón (cancelación) o queda cerrada con el
    /// conductor registrado (completada).
    async fn release(
        &self,
        delivery_id: Uuid,
        driver: &Driver,
        next_status: &str,
        clear_driver: bool,
    ) -> Result<(), AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_error("Error abriendo transacción", e))?;

        let sql = if clear_driver {
            "UPDATE deliveries SET status = $3::delivery_status, driver_id = NULL \
             WHERE id = $1 AND status = 'en_route' AND driver_id = $2"
        } else {
            "UPDATE deliveries SET status = $3::delivery_status \
             WHERE id = $1 AND status = 'en_route' AND driver_id = $2"
        };

        let updated = sqlx::query(sql)
            .bind(delivery_id)
            .bind(driver.id)
            .bind(next_status)
            .execute(&mut *tx)
            .await
            .map_err(|e| store_error("Error actualizando entrega", e))?;

        if updated.rows_affected() == 0 {
            tx.rollback().await.ok();
            return match self.find_by_id(delivery_id).await? {
                Some(_) => Err(AppError::Conflict(
                    "La entrega no está en ruta con este conductor".to_string(),
                )),
                None => Err(AppError::NotFound("Entrega no encontrada".to_string())),
            };
        }

        sqlx::query("UPDATE drivers SET status = 'free' WHERE id = $1")
            .bind(driver.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| store_error("Error liberando conductor", e))?;

        if let Some(fleet_id) = driver.fleet_id {
            sqlx::query("UPDATE fleet SET status = 'parked' WHERE id = $1")
                .bind(fleet_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| store_error("Error estacionando vehículo", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| store_error("Error confirmando transición", e))?;

        Ok(())
    }

    /// Estadísticas para el perfil del cliente
    pub async fn client_stats(&self, client_id: Uuid) -> Result<DeliveryStats, AppError> {
        sqlx::query_as::<_, DeliveryStats>(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE status = 'delivered') AS completed,
                   COUNT(*) FILTER (WHERE status NOT IN ('delivered', 'cancelled')) AS active
            FROM deliveries WHERE client_id = $1
            "#,
        )
        .bind(client_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error("Error calculando estadísticas", e))
    }

    /// Estadísticas para el perfil del conductor
    pub async fn driver_stats(&self, driver_id: Uuid) -> Result<DeliveryStats, AppError> {
        sqlx::query_as::<_, DeliveryStats>(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE status = 'delivered') AS completed,
                   COUNT(*) FILTER (WHERE status NOT IN ('delivered', 'cancelled')) AS active
            FROM deliveries WHERE driver_id = $1
            "#,
        )
        .bind(driver_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error("Error calculando estadísticas", e))
    }
}
