//! Paper Galgame — Content Store bounded context.
//!
//! Responsible for fetching the scene graph document, validating its
//! top-level shape, hashing it for versioning, and indexing scenes by id.

pub mod application;
pub mod domain;
