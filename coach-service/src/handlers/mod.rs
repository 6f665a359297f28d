//! HTTP handlers for the coach service.

pub mod generate;
pub mod health;
