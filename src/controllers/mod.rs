//! Controllers - orquestación entre rutas, servicios y repositorios

pub mod driver_controller;
pub mod report_controller;
pub mod route_controller;
pub mod settlement_controller;
pub mod trip_controller;
