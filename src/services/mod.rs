//! Servicios de negocio
//!
//! El core del sistema: cálculo de dues, resolución del período,
//! escritura de settlements y reportes agregados. Todo el cálculo es
//! puro y en memoria; el único I/O vive en los repositorios.

pub mod due_calculator;
pub mod report_service;
pub mod settlement_period;
pub mod settlement_service;
