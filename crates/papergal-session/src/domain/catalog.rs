//! The finite sets of selectable audiences and guides.

use papergal_core::error::DomainError;
use papergal_core::mode::{Audience, EXPERT, Guide, INFORMED, LAY, SENPAI};

/// Audiences and guides a playthrough may be started with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeCatalog {
    audiences: Vec<Audience>,
    guides: Vec<Guide>,
}

impl Default for ModeCatalog {
    fn default() -> Self {
        Self {
            audiences: [LAY, INFORMED, EXPERT].map(Audience::from).to_vec(),
            guides: vec![Guide::new(SENPAI)],
        }
    }
}

impl ModeCatalog {
    /// Creates a catalog. An empty list falls back to the default set for
    /// that dimension.
    #[must_use]
    pub fn new(audiences: Vec<Audience>, guides: Vec<Guide>) -> Self {
        let defaults = Self::default();
        Self {
            audiences: if audiences.is_empty() {
                defaults.audiences
            } else {
                audiences
            },
            guides: if guides.is_empty() {
                defaults.guides
            } else {
                guides
            },
        }
    }

    /// Selectable audiences in display order.
    #[must_use]
    pub fn audiences(&self) -> &[Audience] {
        &self.audiences
    }

    /// Selectable guides in display order.
    #[must_use]
    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    /// Checks that both selections belong to the catalog.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the first unknown selection.
    pub fn validate(&self, audience: &Audience, guide: &Guide) -> Result<(), DomainError> {
        if !self.audiences.contains(audience) {
            return Err(DomainError::Validation(format!(
                "unknown audience: {audience}"
            )));
        }
        if !self.guides.contains(guide) {
            return Err(DomainError::Validation(format!("unknown guide: {guide}")));
        }
        Ok(())
    }
}
