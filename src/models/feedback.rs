//! Modelo de Feedback

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Feedback - mapea exactamente a la tabla feedbacks.
/// A lo sumo uno por entrega (UNIQUE sobre delivery_id).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Feedback {
    pub id: Uuid,
    pub delivery_id: Uuid,
    pub client_id: Uuid,
    pub content: String,
    pub submitted_at: DateTime<Utc>,
}
