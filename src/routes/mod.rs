//! Routers de la API, uno por superficie de rol

pub mod auth_routes;
pub mod client_routes;
pub mod driver_routes;
pub mod fleet_routes;
