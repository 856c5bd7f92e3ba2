//! # REST Boundary
//!
//! Conversions applied to bodies received from and sent to backend endpoints.
//! Transport, auth and retries belong to the caller.

pub mod mappers;
