//! Infrastructure layer providing external service integrations.
//!
//! This module contains the durable key-value storage behind the list,
//! CSV export, environment configuration and log output.

pub mod persistence;
pub mod export;
pub mod config;
pub mod logging;

pub use persistence::*;
pub use export::*;
pub use config::*;
pub use logging::*;
