pub mod export;
pub mod rest;
