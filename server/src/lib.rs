//! HTTP service for evaluating arithmetic expressions.
//!
//! Exposes `POST /api/v1/calculate` taking `{"expression": string}`
//! and answering with `{"result": number}` or `{"error": string}`.
pub mod api;
pub mod config;
pub mod error;
pub mod server;

pub use config::Config;
pub use error::Error;
