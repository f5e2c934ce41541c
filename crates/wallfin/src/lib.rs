//! Wallfin client-area credit engine.
//!
//! Prices consumer credits against the reference grid, screens them for affordability and
//! handles credit request intake for the HTTP service in `services/api`.

pub mod config;
pub mod credit;
pub mod error;
pub mod format;
pub mod telemetry;
