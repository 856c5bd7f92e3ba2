pub mod coerce;
pub mod export_rows;
pub mod export_service;
pub mod field_mapping;
pub mod shape;
pub mod wire;
