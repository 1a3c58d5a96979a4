//! Paper Galgame — Save store.
//!
//! Implementations of the `SaveRepository` port. Each holds a single JSON
//! snapshot under one fixed key.

pub mod file_save_repository;
pub mod in_memory_save_repository;

/// Key the playthrough snapshot is stored under unless configured otherwise.
pub const DEFAULT_SAVE_KEY: &str = "paper2galgame.save.v1";
