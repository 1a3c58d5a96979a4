//! Shared test doubles for the Paper Galgame narrative engine.

mod clock;
mod repository;

pub use clock::{FixedClock, fixed_now};
pub use repository::{FailingSaveRepository, RecordingSaveRepository};
