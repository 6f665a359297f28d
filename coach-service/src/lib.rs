//! coach-service: relays persona-steered prompts to Gemini over HTTP.
pub mod config;
pub mod handlers;
pub mod models;
pub mod persona;
pub mod services;
pub mod startup;

pub use startup::AppState;
