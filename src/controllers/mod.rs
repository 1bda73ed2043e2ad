//! Controladores de la aplicación
//!
//! Validan la entrada, aplican las reglas de negocio y delegan la
//! persistencia en los repositorios.

pub mod auth_controller;
pub mod delivery_controller;
pub mod driver_controller;
pub mod export_controller;
pub mod fleet_controller;
pub mod profile_controller;
pub mod refueling_controller;
