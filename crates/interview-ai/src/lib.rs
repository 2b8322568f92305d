//! Mock-interview trainer: four fixed rounds per role, scored by external
//! services, with a summary and printable report at the end.

pub mod config;
pub mod error;
pub mod runner;
pub mod telemetry;
pub mod workflows;

pub use error::AppError;
