//! Domain model for the Narrative context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod resolution;
pub mod transition;
