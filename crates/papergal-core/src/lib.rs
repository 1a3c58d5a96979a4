//! Paper Galgame Core — shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that every bounded
//! context depends on: the audience/guide mode types, the error taxonomy,
//! the clock, command and event abstractions, and the save repository port.
//! It contains no infrastructure code.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod mode;
pub mod save;
