//! Modelo de Delivery
//!
//! Entidad central del ciclo de vida. El estado de la entrega es la
//! variable primaria de la máquina de estados; los estados del conductor
//! y del vehículo se mueven acoplados a ella dentro de la misma
//! transacción (ver `repositories::delivery_repository`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado de la entrega - mapea al ENUM delivery_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "delivery_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Placed,
    EnRoute,
    Delivered,
    Cancelled,
}

impl DeliveryStatus {
    /// Etiqueta localizada para listados y exportación
    pub fn display_name(&self) -> &'static str {
        match self {
            DeliveryStatus::Placed => "registrada",
            DeliveryStatus::EnRoute => "en ruta",
            DeliveryStatus::Delivered => "entregada",
            DeliveryStatus::Cancelled => "cancelada",
        }
    }

    /// `delivered` y `cancelled` son estados terminales
    pub fn is_terminal(&self) -> bool {
        matches!(self, DeliveryStatus::Delivered | DeliveryStatus::Cancelled)
    }
}

/// Tipo de entrega - mapea al ENUM delivery_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "delivery_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DeliveryType {
    Local,
    Intercity,
}

impl DeliveryType {
    pub fn display_name(&self) -> &'static str {
        match self {
            DeliveryType::Local => "local",
            DeliveryType::Intercity => "interurbana",
        }
    }
}

/// Delivery - mapea exactamente a la tabla deliveries
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Delivery {
    pub id: Uuid,
    pub client_id: Uuid,
    pub cargo_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub status: DeliveryStatus,
    pub delivery_type: DeliveryType,
    pub created_at: DateTime<Utc>,
}

impl Delivery {
    /// El cliente sólo puede cancelar mientras esté registrada y sin
    /// conductor asignado
    pub fn can_client_cancel(&self) -> bool {
        self.status == DeliveryStatus::Placed && self.driver_id.is_none()
    }

    /// Una entrega es aceptable si está registrada y sin conductor; la
    /// verificación definitiva la hace el UPDATE condicional en la base
    pub fn can_accept(&self) -> bool {
        self.status == DeliveryStatus::Placed && self.driver_id.is_none()
    }

    /// Feedback y pago sólo sobre entregas completadas
    pub fn accepts_feedback_or_payment(&self) -> bool {
        self.status == DeliveryStatus::Delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delivery(status: DeliveryStatus, driver_id: Option<Uuid>) -> Delivery {
        Delivery {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            cargo_id: Uuid::new_v4(),
            driver_id,
            status,
            delivery_type: DeliveryType::Local,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn placed_without_driver_can_be_cancelled_and_accepted() {
        let d = delivery(DeliveryStatus::Placed, None);
        assert!(d.can_client_cancel());
        assert!(d.can_accept());
        assert!(!d.accepts_feedback_or_payment());
    }

    #[test]
    fn en_route_delivery_is_locked_for_the_client() {
        let d = delivery(DeliveryStatus::EnRoute, Some(Uuid::new_v4()));
        assert!(!d.can_client_cancel());
        assert!(!d.can_accept());
    }

    #[test]
    fn terminal_states_reject_every_transition() {
        for status in [DeliveryStatus::Delivered, DeliveryStatus::Cancelled] {
            let d = delivery(status, None);
            assert!(status.is_terminal());
            assert!(!d.can_client_cancel());
            assert!(!d.can_accept());
        }
        assert!(delivery(DeliveryStatus::Delivered, None).accepts_feedback_or_payment());
        assert!(!delivery(DeliveryStatus::Cancelled, None).accepts_feedback_or_payment());
    }

    #[test]
    fn display_names_are_localized() {
        assert_eq!(DeliveryStatus::Placed.display_name(), "registrada");
        assert_eq!(DeliveryStatus::EnRoute.display_name(), "en ruta");
        assert_eq!(DeliveryStatus::Delivered.display_name(), "entregada");
        assert_eq!(DeliveryStatus::Cancelled.display_name(), "cancelada");
    }
}
