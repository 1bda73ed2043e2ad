//! Capa de acceso a datos
//!
//! Un repositorio por agregado; todas las transiciones del ciclo de vida
//! viven en `delivery_repository` como transacciones con UPDATE
//! condicionales.

pub mod client_repository;
pub mod delivery_repository;
pub mod driver_repository;
pub mod feedback_repository;
pub mod fleet_repository;
pub mod payment_repository;
pub mod refueling_repository;
pub mod user_repository;
