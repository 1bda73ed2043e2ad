//! Controlador de exportación del historial de entregas

use sqlx::PgPool;

use crate::dto::delivery_dto::ExportQuery;
use crate::models::client::Client;
use crate::repositories::delivery_repository::DeliveryRepository;
use crate::services::export_service::{self, ExportFormat};
use crate::utils::errors::AppError;

pub struct ExportController {
    deliveries: DeliveryRepository,
}

impl ExportController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            deliveries: DeliveryRepository::new(pool),
        }
    }

    /// Exportar todas las entregas del cliente en el formato pedido
    pub async fn export(
        &self,
        client: &Client,
        query: ExportQuery,
    ) -> Result<(ExportFormat, Vec<u8>), AppError> {
        let format = ExportFormat::parse(&query.format)?;
        let rows = self.deliveries.list_by_client(client.id, None).await?;
        let bytes = export_service::render(format, &rows)?;

        Ok((format, bytes))
    }
}
