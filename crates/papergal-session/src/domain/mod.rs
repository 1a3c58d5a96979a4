//! Session state and mode catalog.

pub mod catalog;
pub mod state;
