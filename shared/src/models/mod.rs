//! Domain models for the POS back-office platform

mod stock;
mod summary;
mod user;
mod worktime;

pub use stock::*;
pub use summary::*;
pub use user::*;
pub use worktime::*;
