//! Modelo de Route
//!
//! Uno a uno con la entrega. La distancia la indica el operador y puede
//! quedar sin definir; para la tarificación una distancia ausente vale 0.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Route - mapea exactamente a la tabla routes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Route {
    pub id: Uuid,
    pub delivery_id: Uuid,
    pub departure_city: String,
    pub departure_street: String,
    pub departure_house: String,
    pub arrival_city: String,
    pub arrival_street: String,
    pub arrival_house: String,
    pub distance: Option<Decimal>,
}

impl Route {
    /// Dirección de salida en una línea
    pub fn departure_address(&self) -> String {
        format!(
            "{}, {} {}",
            self.departure_city, self.departure_street, self.departure_house
        )
    }

    /// Dirección de llegada en una línea
    pub fn arrival_address(&self) -> String {
        format!(
            "{}, {} {}",
            self.arrival_city, self.arrival_street, self.arrival_house
        )
    }
}
