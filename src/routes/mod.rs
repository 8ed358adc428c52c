pub mod driver_routes;
pub mod report_routes;
pub mod route_routes;
pub mod settlement_routes;
pub mod trip_routes;
