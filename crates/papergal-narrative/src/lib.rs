//! Paper Galgame — Narrative bounded context.
//!
//! Responsible for choosing which content variant to show for the current
//! scene, audience and guide, and for every transition of a playthrough:
//! start, advance, quiz answers, resume, reset and return to the menu.

pub mod application;
pub mod domain;
