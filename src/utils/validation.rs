//! Utilidades de validación
//!
//! Funciones helper de validación compartidas por los controladores.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Validar y convertir string a UUID
pub fn parse_uuid(field: &str, value: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value)
        .map_err(|_| AppError::BadRequest(format!("El campo '{}' no es un UUID válido", field)))
}

/// Exigir una cantidad estrictamente positiva (litros, precio por litro)
pub fn require_positive(field: &str, value: Decimal) -> Result<Decimal, AppError> {
    if value <= Decimal::ZERO {
        return Err(AppError::BadRequest(format!(
            "El campo '{}' debe ser mayor que cero",
            field
        )));
    }
    Ok(value)
}

/// Exigir una cantidad no negativa (peso, distancia)
pub fn require_non_negative(field: &str, value: Decimal) -> Result<Decimal, AppError> {
    if value < Decimal::ZERO {
        return Err(AppError::BadRequest(format!(
            "El campo '{}' no puede ser negativo",
            field
        )));
    }
    Ok(value)
}

/// Exigir un texto no vacío
pub fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!(
            "El campo '{}' es requerido",
            field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn positive_rejects_zero_and_negative() {
        assert!(require_positive("liters", Decimal::ZERO).is_err());
        assert!(require_positive("liters", Decimal::from_str("-1").unwrap()).is_err());
        assert!(require_positive("liters", Decimal::from_str("45.5").unwrap()).is_ok());
    }

    #[test]
    fn non_negative_accepts_zero() {
        assert!(require_non_negative("weight", Decimal::ZERO).is_ok());
        assert!(require_non_negative("weight", Decimal::from_str("-0.01").unwrap()).is_err());
    }

    #[test]
    fn text_must_not_be_blank() {
        assert!(require_text("name", "  ").is_err());
        assert!(require_text("name", "Muebles").is_ok());
    }

    #[test]
    fn uuid_parsing_reports_the_field() {
        let err = parse_uuid("fleet_choice", "no-es-uuid").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
