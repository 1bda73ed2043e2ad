//! Servicios de dominio
//!
//! Lógica pura que no toca la base de datos: tarifas y exportación.

pub mod export_service;
pub mod pricing_service;
