//! Modelo de Refueling
//!
//! El coste total es un campo derivado: se recalcula siempre en el
//! servidor como litros × precio por litro, ignorando cualquier total
//! que venga del cliente.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Refueling - mapea exactamente a la tabla refuelings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Refueling {
    pub id: Uuid,
    pub fleet_id: Uuid,
    pub driver_id: Uuid,
    pub fuel_type: String,
    pub liters: Decimal,
    pub cost_per_liter: Decimal,
    pub total_cost: Decimal,
    pub refueled_at: DateTime<Utc>,
}

impl Refueling {
    /// Derivación del coste total, en aritmética decimal exacta
    pub fn total_cost_of(liters: Decimal, cost_per_liter: Decimal) -> Decimal {
        liters * cost_per_liter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn total_cost_is_exact_fixed_point() {
        let liters = Decimal::from_str("45.5").unwrap();
        let cost = Decimal::from_str("55.00").unwrap();
        let total = Refueling::total_cost_of(liters, cost);
        assert_eq!(total, Decimal::from_str("2502.25").unwrap());
    }

    #[test]
    fn total_cost_of_zero_liters_is_zero() {
        let total = Refueling::total_cost_of(
            Decimal::ZERO,
            Decimal::from_str("55.00").unwrap(),
        );
        assert_eq!(total, Decimal::ZERO);
    }
}
