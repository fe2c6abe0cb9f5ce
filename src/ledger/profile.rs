use serde::{Deserialize, Serialize};

pub const DEFAULT_BUSINESS_NAME: &str = "My Business";

/// Display identity of the business that owns the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BusinessProfile {
    name: String,
}

impl BusinessProfile {
    /// Builds a profile, falling back to the default name when `name` is blank.
    pub fn new(name: &str) -> Self {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            Self::default()
        } else {
            Self {
                name: trimmed.to_string(),
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces the name; blank names are ignored.
    pub fn rename(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed == self.name {
            return false;
        }
        self.name = trimmed.to_string();
        true
    }
}

impl Default for BusinessProfile {
    fn default() -> Self {
        Self {
            name: DEFAULT_BUSINESS_NAME.to_string(),
        }
    }
}
