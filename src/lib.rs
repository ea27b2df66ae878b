//! shoplist - Terminal Shopping List Library
//!
//! The shopping list model, its persistence and a terminal UI, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
