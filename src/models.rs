pub mod context_dto;
pub mod health_dto;
