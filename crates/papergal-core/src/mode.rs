//! Audience and guide selections.
//!
//! Both are open string identifiers rather than closed enums: the set of
//! valid values is configured per deployment (see `ModeCatalog` in the
//! session crate). The well-known identifiers below are the defaults and the
//! anchors of the content fallback chains.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of the lay-reader audience.
pub const LAY: &str = "lay";
/// Identifier of the informed-reader audience.
pub const INFORMED: &str = "informed";
/// Identifier of the expert audience.
pub const EXPERT: &str = "expert";
/// Identifier of the default guide persona.
pub const SENPAI: &str = "senpai";

macro_rules! mode_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }
    };
}

mode_id!(
    /// The reading lens that selects which content variant is shown.
    Audience
);

mode_id!(
    /// The persona whose lines are shown.
    Guide
);

impl Default for Audience {
    fn default() -> Self {
        Self::new(INFORMED)
    }
}

impl Default for Guide {
    fn default() -> Self {
        Self::new(SENPAI)
    }
}
