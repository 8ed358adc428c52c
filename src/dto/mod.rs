//! DTOs compartidos de la API

pub mod api_dto;
