//! Paper Galgame — Session State bounded context.
//!
//! Responsible for the mutable record of a playthrough (current scene,
//! audience, guide, quiz answers), the catalog of selectable modes, and the
//! snapshot format used to persist and restore that record.

pub mod application;
pub mod domain;
