//! Shared types and models for the POS back-office platform
//!
//! This crate contains types shared between the client core, the browser
//! frontend (via WASM), and other components of the system.

pub mod geo;
pub mod models;
pub mod types;
pub mod validation;

pub use geo::*;
pub use models::*;
pub use types::*;
pub use validation::*;
