//! Exportación del historial de entregas de un cliente
//!
//! Dos formatos: tabular delimitado (CSV) y jerárquico (JSON). El precio
//! se recalcula con el motor de tarifas en el momento de exportar; los
//! campos numéricos del JSON se serializan como números, no como texto,
//! y el texto no ASCII (etiquetas localizadas, ciudades) va literal.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::repositories::delivery_repository::DeliverySummaryRow;
use crate::services::pricing_service;
use crate::utils::errors::AppError;

/// Formato de exportación solicitado por el cliente
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Formato desconocido -> `InvalidFormat` (400)
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(AppError::InvalidFormat(other.to_string())),
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "entregas.csv",
            ExportFormat::Json => "entregas.json",
        }
    }
}

/// Registro exportado; mismo conjunto de campos en ambos formatos
#[derive(Debug, Serialize)]
struct ExportRecord<'a> {
    id: Uuid,
    cargo: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    weight: Decimal,
    departure_city: &'a str,
    arrival_city: &'a str,
    status: &'static str,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    created_at: String,
}

impl<'a> ExportRecord<'a> {
    fn from_row(row: &'a DeliverySummaryRow) -> Self {
        Self {
            id: row.id,
            cargo: &row.cargo_name,
            weight: row.cargo_weight,
            departure_city: &row.departure_city,
            arrival_city: &row.arrival_city,
            status: row.status.display_name(),
            price: pricing_service::price(row.distance, Some(row.cargo_weight)),
            created_at: row.created_at.format("%d.%m.%Y %H:%M").to_string(),
        }
    }
}

const CSV_HEADER: &str = "id,carga,peso_kg,ciudad_salida,ciudad_llegada,estado,precio,fecha_creacion";

/// Generar los bytes de la exportación. Cero entregas no es un error:
/// CSV con sólo cabecera, JSON con lista vacía.
pub fn render(format: ExportFormat, rows: &[DeliverySummaryRow]) -> Result<Vec<u8>, AppError> {
    let records: Vec<ExportRecord> = rows.iter().map(ExportRecord::from_row).collect();

    match format {
        ExportFormat::Csv => Ok(render_csv(&records).into_bytes()),
        ExportFormat::Json => serde_json::to_vec(&records)
            .map_err(|e| AppError::Internal(format!("Error serializando exportación: {}", e))),
    }
}

fn render_csv(records: &[ExportRecord]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for r in records {
        let line = [
            r.id.to_string(),
            csv_field(r.cargo),
            r.weight.to_string(),
            csv_field(r.departure_city),
            csv_field(r.arrival_city),
            csv_field(r.status),
            r.price.to_string(),
            r.created_at.clone(),
        ]
        .join(",");
        out.push_str(&line);
        out.push('\n');
    }

    out
}

/// Entrecomillar un campo sólo cuando lo necesita; las comillas internas
/// se duplican según RFC 4180
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::delivery::{DeliveryStatus, DeliveryType};
    use chrono::TimeZone;
    use std::str::FromStr;

    fn sample_row() -> DeliverySummaryRow {
        DeliverySummaryRow {
            id: Uuid::new_v4(),
            status: DeliveryStatus::Delivered,
            delivery_type: DeliveryType::Intercity,
            created_at: chrono::Utc.with_ymd_and_hms(2025, 3, 7, 14, 5, 0).unwrap(),
            driver_id: None,
            cargo_name: "Muebles de diseño".to_string(),
            cargo_weight: Decimal::from_str("20.00").unwrap(),
            departure_city: "Málaga".to_string(),
            departure_street: "Calle Larios".to_string(),
            departure_house: "12".to_string(),
            arrival_city: "Córdoba".to_string(),
            arrival_street: "Av. América".to_string(),
            arrival_house: "3".to_string(),
            distance: Some(Decimal::from_str("10").unwrap()),
        }
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(matches!(
            ExportFormat::parse("xml"),
            Err(AppError::InvalidFormat(_))
        ));
        assert_eq!(ExportFormat::parse("csv").unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::parse("json").unwrap(), ExportFormat::Json);
    }

    #[test]
    fn empty_export_is_not_an_error() {
        let json = render(ExportFormat::Json, &[]).unwrap();
        assert_eq!(String::from_utf8(json).unwrap(), "[]");

        let csv = render(ExportFormat::Csv, &[]).unwrap();
        assert_eq!(String::from_utf8(csv).unwrap(), format!("{}\n", CSV_HEADER));
    }

    #[test]
    fn csv_row_carries_localized_status_and_derived_price() {
        let row = sample_row();
        let csv = String::from_utf8(render(ExportFormat::Csv, &[row.clone()]).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], CSV_HEADER);
        // 10 km * 50 + 20 kg * 10 = 700.00
        assert!(lines[1].contains("Muebles de diseño"));
        assert!(lines[1].contains("entregada"));
        assert!(lines[1].contains("700.00"));
        assert!(lines[1].contains("07.03.2025 14:05"));
    }

    #[test]
    fn csv_quotes_fields_containing_the_delimiter() {
        let mut row = sample_row();
        row.cargo_name = "Cajas, frágil".to_string();
        let csv = String::from_utf8(render(ExportFormat::Csv, &[row]).unwrap()).unwrap();
        assert!(csv.contains("\"Cajas, frágil\""));
    }

    #[test]
    fn json_preserves_numeric_types_and_non_ascii_text() {
        let row = sample_row();
        let bytes = render(ExportFormat::Json, &[row]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        let record = &value[0];
        assert!(record["weight"].is_number());
        assert!(record["price"].is_number());
        assert_eq!(record["weight"], serde_json::json!(20.0));
        assert_eq!(record["price"], serde_json::json!(700.0));
        assert_eq!(record["departure_city"], "Málaga");
        assert_eq!(record["arrival_city"], "Córdoba");
        assert_eq!(record["status"], "entregada");
        assert_eq!(record["created_at"], "07.03.2025 14:05");
    }

    #[test]
    fn missing_distance_falls_back_to_the_minimum_fare() {
        let mut row = sample_row();
        row.distance = None;
        row.cargo_weight = Decimal::from_str("5").unwrap();
        let bytes = render(ExportFormat::Json, &[row]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value[0]["price"], serde_json::json!(500.0));
    }
}
