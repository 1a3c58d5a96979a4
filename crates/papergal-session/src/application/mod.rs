//! Snapshot encoding and restore.

pub mod snapshot;
