//! HTTP surface of the email OTP service

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use state::{build_state, AppState, DefaultAppState};
