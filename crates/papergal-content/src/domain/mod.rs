//! Content data model and the scene index.

pub mod index;
pub mod scene;
