//! Rutas del lado cliente
//!
//! Todas pasan por el middleware de autenticación; cada handler exige
//! además el rol de cliente antes de tocar nada.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::delivery_controller::DeliveryController;
use crate::controllers::export_controller::ExportController;
use crate::controllers::profile_controller::ProfileController;
use crate::dto::delivery_dto::{
    CreateDeliveryRequest, DeliveryCreatedResponse, DeliveryDetailResponse, DeliveryListQuery,
    DeliverySummaryResponse, ExportQuery, FeedbackRequest, PaymentRequest, PaymentResponse,
    QuoteRequest, QuoteResponse,
};
use crate::dto::profile_dto::ClientProfileResponse;
use crate::dto::ApiResponse;
use crate::middleware::auth::Identity;
use crate::models::feedback::Feedback;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_client_router() -> Router<AppState> {
    Router::new()
        .route("/deliveries", post(create_delivery))
        .route("/deliveries", get(list_deliveries))
        .route("/deliveries/quote", post(quote_price))
        .route("/deliveries/export", get(export_deliveries))
        .route("/deliveries/:id", get(delivery_detail))
        .route("/deliveries/:id", delete(cancel_delivery))
        .route("/deliveries/:id/feedback", post(submit_feedback))
        .route("/deliveries/:id/payment", post(record_payment))
        .route("/profile", get(client_profile))
}

async fn create_delivery(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<CreateDeliveryRequest>,
) -> Result<Json<ApiResponse<DeliveryCreatedResponse>>, AppError> {
    let client = identity.require_client()?;
    let controller = DeliveryController::new(state.pool.clone());
    let response = controller.create(client, request).await?;
    Ok(Json(response))
}

async fn quote_price(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    identity.require_client()?;
    let controller = DeliveryController::new(state.pool.clone());
    let response = controller.quote(request)?;
    Ok(Json(response))
}

async fn list_deliveries(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<DeliveryListQuery>,
) -> Result<Json<Vec<DeliverySummaryResponse>>, AppError> {
    let client = identity.require_client()?;
    let controller = DeliveryController::new(state.pool.clone());
    let response = controller.list(client, query).await?;
    Ok(Json(response))
}

async fn delivery_detail(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeliveryDetailResponse>, AppError> {
    let client = identity.require_client()?;
    let controller = DeliveryController::new(state.pool.clone());
    let response = controller.detail(client, id).await?;
    Ok(Json(response))
}

async fn cancel_delivery(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let client = identity.require_client()?;
    let controller = DeliveryController::new(state.pool.clone());
    let response = controller.cancel(client, id).await?;
    Ok(Json(response))
}

async fn submit_feedback(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<ApiResponse<Feedback>>, AppError> {
    let client = identity.require_client()?;
    let controller = DeliveryController::new(state.pool.clone());
    let response = controller.submit_feedback(client, id, request).await?;
    Ok(Json(response))
}

async fn record_payment(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<ApiResponse<PaymentResponse>>, AppError> {
    let client = identity.require_client()?;
    let controller = DeliveryController::new(state.pool.clone());
    let response = controller.record_payment(client, id, request).await?;
    Ok(Json(response))
}

async fn export_deliveries(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let client = identity.require_client()?;
    let controller = ExportController::new(state.pool.clone());
    let (format, bytes) = controller.export(client, query).await?;

    let headers = [
        (header::CONTENT_TYPE, format.content_type().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", format.file_name()),
        ),
    ];

    Ok((headers, bytes).into_response())
}

async fn client_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<ClientProfileResponse>, AppError> {
    let client = identity.require_client()?;
    let controller = ProfileController::new(state.pool.clone());
    let response = controller.client_profile(client).await?;
    Ok(Json(response))
}
