//! Modelo de Cargo
//!
//! La carga es inmutable una vez creada junto con su entrega.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Cargo - mapea exactamente a la tabla cargos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cargo {
    pub id: Uuid,
    pub name: String,
    pub weight: Decimal,
}
