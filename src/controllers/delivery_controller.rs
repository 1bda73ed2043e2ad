//! Controlador de entregas del lado cliente
//!
//! Creación, presupuesto, listados, cancelación y las dos operaciones
//! permitidas sobre una entrega completada: comentario y pago, cada una
//! a lo sumo una vez. El duplicado se trata como no-op idempotente, el
//! comportamiento documentado del sistema.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::delivery_dto::{
    CreateDeliveryRequest, DeliveryCreatedResponse, DeliveryDetailResponse, DeliveryListQuery,
    DeliverySummaryResponse, FeedbackRequest, PaymentRequest, PaymentResponse, QuoteRequest,
    QuoteResponse,
};
use crate::dto::ApiResponse;
use crate::models::client::Client;
use crate::models::feedback::Feedback;
use crate::repositories::delivery_repository::{DeliveryRepository, NewCargo, NewRoute};
use crate::repositories::feedback_repository::FeedbackRepository;
use crate::repositories::payment_repository::PaymentRepository;
use crate::services::pricing_service;
use crate::utils::errors::AppError;
use crate::utils::validation::require_non_negative;

pub struct DeliveryController {
    deliveries: DeliveryRepository,
    payments: PaymentRepository,
    feedbacks: FeedbackRepository,
}

impl DeliveryController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            deliveries: DeliveryRepository::new(pool.clone()),
            payments: PaymentRepository::new(pool.clone()),
            feedbacks: FeedbackRepository::new(pool),
        }
    }

    /// Crear entrega con su carga y su ruta
    pub async fn create(
        &self,
        client: &Client,
        request: CreateDeliveryRequest,
    ) -> Result<ApiResponse<DeliveryCreatedResponse>, AppError> {
        request.validate()?;
        require_non_negative("cargo.weight", request.cargo.weight)?;
        if let Some(distance) = request.route.distance {
            require_non_negative("route.distance", distance)?;
        }

        let cargo = NewCargo {
            name: request.cargo.name,
            weight: request.cargo.weight,
        };
        let route = NewRoute {
            departure_city: request.route.departure_city,
            departure_street: request.route.departure_street,
            departure_house: request.route.departure_house,
            arrival_city: request.route.arrival_city,
            arrival_street: request.route.arrival_street,
            arrival_house: request.route.arrival_house,
            distance: request.route.distance,
        };

        let (delivery, cargo, route) = self
            .deliveries
            .create(client.id, request.delivery_type, cargo, route)
            .await?;

        let price = pricing_service::price(route.distance, Some(cargo.weight));

        Ok(ApiResponse::success_with_message(
            DeliveryCreatedResponse::new(&delivery, price),
            "Entrega registrada exitosamente".to_string(),
        ))
    }

    /// Presupuesto sin efectos secundarios
    pub fn quote(&self, request: QuoteRequest) -> Result<QuoteResponse, AppError> {
        if let Some(weight) = request.weight {
            require_non_negative("weight", weight)?;
        }
        if let Some(distance) = request.distance {
            require_non_negative("distance", distance)?;
        }

        Ok(QuoteResponse {
            amount: pricing_service::price(request.distance, request.weight),
        })
    }

    pub async fn list(
        &self,
        client: &Client,
        query: DeliveryListQuery,
    ) -> Result<Vec<DeliverySummaryResponse>, AppError> {
        let rows = self.deliveries.list_by_client(client.id, query.status).await?;
        Ok(rows.into_iter().map(DeliverySummaryResponse::from).collect())
    }

    pub async fn detail(
        &self,
        client: &Client,
        delivery_id: Uuid,
    ) -> Result<DeliveryDetailResponse, AppError> {
        let row = self
            .deliveries
            .find_summary_owned(client.id, delivery_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Entrega no encontrada".to_string()))?;

        let has_payment = self.payments.exists_for_delivery(delivery_id).await?;
        let has_feedback = self.feedbacks.exists_for_delivery(delivery_id).await?;

        Ok(DeliveryDetailResponse {
            summary: DeliverySummaryResponse::from(row),
            has_payment,
            has_feedback,
        })
    }

    /// Cancelación por el cliente, sólo antes de cualquier compromiso de
    /// conductor
    pub async fn cancel(
        &self,
        client: &Client,
        delivery_id: Uuid,
    ) -> Result<ApiResponse<()>, AppError> {
        self.deliveries.cancel_by_client(client.id, delivery_id).await?;

        Ok(ApiResponse::success_with_message(
            (),
            "Entrega cancelada".to_string(),
        ))
    }

    pub async fn submit_feedback(
        &self,
        client: &Client,
        delivery_id: Uuid,
        request: FeedbackRequest,
    ) -> Result<ApiResponse<Feedback>, AppError> {
        request.validate()?;

        let delivery = self
            .deliveries
            .find_owned(client.id, delivery_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Entrega no encontrada".to_string()))?;

        if !delivery.accepts_feedback_or_payment() {
            return Err(AppError::Conflict(
                "Sólo se puede valorar una entrega completada".to_string(),
            ));
        }

        if self.feedbacks.exists_for_delivery(delivery_id).await? {
            return Ok(ApiResponse::already_recorded(
                "La entrega ya tiene un comentario".to_string(),
            ));
        }

        match self
            .feedbacks
            .create(delivery_id, client.id, request.content)
            .await?
        {
            Some(feedback) => Ok(ApiResponse::success_with_message(
                feedback,
                "Comentario registrado".to_string(),
            )),
            None => Ok(ApiResponse::already_recorded(
                "La entrega ya tiene un comentario".to_string(),
            )),
        }
    }

    /// Registrar el pago de una entrega completada. El importe sale del
    /// motor de tarifas, nunca del cliente.
    pub async fn record_payment(
        &self,
        client: &Client,
        delivery_id: Uuid,
        request: PaymentRequest,
    ) -> Result<ApiResponse<PaymentResponse>, AppError> {
        let delivery = self
            .deliveries
            .find_owned(client.id, delivery_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Entrega no encontrada".to_string()))?;

        if !delivery.accepts_feedback_or_payment() {
            return Err(AppError::Conflict(
                "Sólo se puede pagar una entrega completada".to_string(),
            ));
        }

        if self.payments.exists_for_delivery(delivery_id).await? {
            return Ok(ApiResponse::already_recorded(
                "El pago ya fue registrado".to_string(),
            ));
        }

        let inputs = self
            .deliveries
            .pricing_inputs(delivery_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Entrega no encontrada".to_string()))?;

        let amount = pricing_service::price(inputs.distance, Some(inputs.weight));

        match self.payments.create(delivery_id, amount, request.method).await? {
            Some(payment) => Ok(ApiResponse::success_with_message(
                PaymentResponse::from(payment),
                "Pago registrado".to_string(),
            )),
            None => Ok(ApiResponse::already_recorded(
                "El pago ya fue registrado".to_string(),
            )),
        }
    }
}
