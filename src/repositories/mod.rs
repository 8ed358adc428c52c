//! Repositorios de acceso a datos
//!
//! Única capa con I/O: lecturas filtradas e inserts sobre PostgreSQL.
//! Los repositorios devuelven modelos de dominio ya tipados; un
//! payment_mode corrupto falla acá, nunca se degrada en silencio.

pub mod driver_repository;
pub mod route_repository;
pub mod settlement_repository;
pub mod trip_repository;
