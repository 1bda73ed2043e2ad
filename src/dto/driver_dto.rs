//! DTOs del lado conductor

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::refueling::Refueling;

/// Request de repostaje. Si el cliente envía un total calculado por su
/// cuenta, se descarta: el total se deriva siempre en el servidor.
#[derive(Debug, Deserialize, Validate)]
pub struct RefuelingRequest {
    #[validate(length(min = 2, max = 20))]
    pub fuel_type: String,
    pub liters: Decimal,
    pub cost_per_liter: Decimal,
}

/// Response de repostaje
#[derive(Debug, Serialize)]
pub struct RefuelingResponse {
    pub id: Uuid,
    pub fleet_id: Uuid,
    pub fuel_type: String,
    pub liters: Decimal,
    pub cost_per_liter: Decimal,
    pub total_cost: Decimal,
    pub refueled_at: DateTime<Utc>,
}

impl From<Refueling> for RefuelingResponse {
    fn from(refueling: Refueling) -> Self {
        Self {
            id: refueling.id,
            fleet_id: refueling.fleet_id,
            fuel_type: refueling.fuel_type,
            liters: refueling.liters,
            cost_per_liter: refueling.cost_per_liter,
            total_cost: refueling.total_cost,
            refueled_at: refueling.refueled_at,
        }
    }
}
