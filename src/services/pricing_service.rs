//! Motor de tarifas
//!
//! Función pura y determinista sobre aritmética decimal. El precio de
//! una entrega nunca se almacena como campo mutable: se recalcula aquí
//! cada vez y sólo queda congelado como snapshot en `payments.amount`.

use lazy_static::lazy_static;
use rust_decimal::Decimal;

lazy_static! {
    /// Tarifa por kilómetro
    pub static ref RATE_PER_KM: Decimal = Decimal::new(5000, 2); // 50.00
    /// Tarifa por kilogramo
    pub static ref RATE_PER_KG: Decimal = Decimal::new(1000, 2); // 10.00
    /// Importe mínimo de una entrega
    pub static ref MIN_AMOUNT: Decimal = Decimal::new(50000, 2); // 500.00
}

/// Calcular el precio de una entrega.
///
/// `precio = max(MIN_AMOUNT, distancia * RATE_PER_KM + peso * RATE_PER_KG)`.
/// Distancia o peso ausentes cuentan como 0. Nunca falla.
pub fn price(distance: Option<Decimal>, weight: Option<Decimal>) -> Decimal {
    let distance = distance.unwrap_or(Decimal::ZERO);
    let weight = weight.unwrap_or(Decimal::ZERO);

    let amount = distance * *RATE_PER_KM + weight * *RATE_PER_KG;

    if amount < *MIN_AMOUNT {
        *MIN_AMOUNT
    } else {
        amount.round_dp(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn formula_applies_above_the_minimum() {
        // 10 km y 20 kg: 500 + 200 = 700.00
        let amount = price(Some(dec("10")), Some(dec("20")));
        assert_eq!(amount, dec("700.00"));
    }

    #[test]
    fn minimum_binds_below_the_threshold() {
        // 1 km y 1 kg: 60 < 500, aplica el mínimo
        assert_eq!(price(Some(dec("1")), Some(dec("1"))), dec("500.00"));
        assert_eq!(price(None, None), dec("500.00"));
        assert_eq!(price(Some(Decimal::ZERO), Some(Decimal::ZERO)), dec("500.00"));
    }

    #[test]
    fn minimum_binds_exactly_at_the_boundary() {
        // 10 km y 0 kg: 500 exacto, el mínimo ya no "sube" nada
        assert_eq!(price(Some(dec("10")), None), dec("500.00"));
        // Un céntimo por encima del umbral
        assert_eq!(price(Some(dec("10")), Some(dec("0.001"))), dec("500.01"));
    }

    #[test]
    fn fractional_quantities_stay_exact() {
        // 12.5 km y 7.25 kg: 625 + 72.50 = 697.50 < 700 -> sin redondeos raros
        assert_eq!(price(Some(dec("12.5")), Some(dec("7.25"))), dec("697.50"));
    }

    #[test]
    fn absent_distance_prices_by_weight_alone() {
        // 80 kg sin distancia: 800.00
        assert_eq!(price(None, Some(dec("80"))), dec("800.00"));
    }
}
