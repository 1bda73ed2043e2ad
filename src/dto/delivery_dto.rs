//! DTOs de entregas

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::delivery::{Delivery, DeliveryStatus, DeliveryType};
use crate::models::payment::{Payment, PaymentMethod, PaymentStatus};
use crate::repositories::delivery_repository::DeliverySummaryRow;
use crate::services::pricing_service;

/// Carga de la entrega nueva
#[derive(Debug, Deserialize, Validate)]
pub struct CargoPayload {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub weight: Decimal,
}

/// Ruta de la entrega nueva; la distancia es opcional
#[derive(Debug, Deserialize, Validate)]
pub struct RoutePayload {
    #[validate(length(min = 1, max = 100))]
    pub departure_city: String,
    #[validate(length(min = 1, max = 100))]
    pub departure_street: String,
    #[validate(length(min = 1, max = 20))]
    pub departure_house: String,
    #[validate(length(min = 1, max = 100))]
    pub arrival_city: String,
    #[validate(length(min = 1, max = 100))]
    pub arrival_street: String,
    #[validate(length(min = 1, max = 20))]
    pub arrival_house: String,
    pub distance: Option<Decimal>,
}

/// Request de creación de entrega: entrega + carga + ruta juntas
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDeliveryRequest {
    pub delivery_type: DeliveryType,
    #[validate]
    pub cargo: CargoPayload,
    #[validate]
    pub route: RoutePayload,
}

/// Request de presupuesto, sin efectos secundarios
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub weight: Option<Decimal>,
    pub distance: Option<Decimal>,
}

/// Response de presupuesto
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub amount: Decimal,
}

/// Filtro del listado de entregas del cliente
#[derive(Debug, Deserialize)]
pub struct DeliveryListQuery {
    pub status: Option<DeliveryStatus>,
}

/// Parámetros de la exportación
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: String,
}

/// Request de comentario
#[derive(Debug, Deserialize, Validate)]
pub struct FeedbackRequest {
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
}

/// Request de pago: sólo el método; el importe lo calcula el servidor
#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub method: PaymentMethod,
}

/// Response de pago
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub delivery_id: Uuid,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub payment_date: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            delivery_id: payment.delivery_id,
            amount: payment.amount,
            method: payment.method,
            status: payment.status,
            payment_date: payment.payment_date,
        }
    }
}

/// Response de listado: entrega con carga, ruta y precio calculado
#[derive(Debug, Serialize)]
pub struct DeliverySummaryResponse {
    pub id: Uuid,
    pub status: DeliveryStatus,
    pub status_display: &'static str,
    pub delivery_type: DeliveryType,
    pub created_at: DateTime<Utc>,
    pub driver_assigned: bool,
    pub cargo_name: String,
    pub cargo_weight: Decimal,
    pub departure_city: String,
    pub departure_street: String,
    pub departure_house: String,
    pub arrival_city: String,
    pub arrival_street: String,
    pub arrival_house: String,
    pub distance: Option<Decimal>,
    pub price: Decimal,
}

impl From<DeliverySummaryRow> for DeliverySummaryResponse {
    fn from(row: DeliverySummaryRow) -> Self {
        let price = pricing_service::price(row.distance, Some(row.cargo_weight));
        Self {
            id: row.id,
            status: row.status,
            status_display: row.status.display_name(),
            delivery_type: row.delivery_type,
            created_at: row.created_at,
            driver_assigned: row.driver_id.is_some(),
            cargo_name: row.cargo_name,
            cargo_weight: row.cargo_weight,
            departure_city: row.departure_city,
            departure_street: row.departure_street,
            departure_house: row.departure_house,
            arrival_city: row.arrival_city,
            arrival_street: row.arrival_street,
            arrival_house: row.arrival_house,
            distance: row.distance,
            price,
        }
    }
}

/// Response de detalle: el resumen más los indicadores de pago/comentario
#[derive(Debug, Serialize)]
pub struct DeliveryDetailResponse {
    #[serde(flatten)]
    pub summary: DeliverySummaryResponse,
    pub has_payment: bool,
    pub has_feedback: bool,
}

/// Response de creación
#[derive(Debug, Serialize)]
pub struct DeliveryCreatedResponse {
    pub id: Uuid,
    pub status: DeliveryStatus,
    pub status_display: &'static str,
    pub delivery_type: DeliveryType,
    pub created_at: DateTime<Utc>,
    pub price: Decimal,
}

impl DeliveryCreatedResponse {
    pub fn new(delivery: &Delivery, price: Decimal) -> Self {
        Self {
            id: delivery.id,
            status: delivery.status,
            status_display: delivery.status.display_name(),
            delivery_type: delivery.delivery_type,
            created_at: delivery.created_at,
            price,
        }
    }
}
