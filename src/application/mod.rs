//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! managing application state, user interactions, and keeping the list in
//! step with storage.

pub mod state;
pub mod sync;

pub use state::*;
pub use sync::*;
