//! Static company directory.
//!
//! Read-only, process-wide configuration: built once, shared via `Arc`,
//! never mutated at runtime. Safe for unsynchronized concurrent reads from
//! any number of pipeline invocations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Profile of a known counterparty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Starting priority for letters from this company, 0..=9.
    pub base_priority: u8,
    /// Business segment label, e.g. "VIP".
    pub segment: String,
    /// Risk level label, e.g. "высокий".
    pub risk_level: String,
}

/// Case-insensitive exact-match lookup of company profiles.
pub struct CompanyDirectory {
    // Keyed by the lower-cased company string.
    profiles: HashMap<String, CompanyProfile>,
}

impl CompanyDirectory {
    /// Directory with the reference entries: one VIP client and the regulator.
    pub fn default_directory() -> Self {
        Self::empty()
            .with_profile(
                "ООО \"Ромашка\"",
                CompanyProfile {
                    base_priority: 8,
                    segment: "VIP".to_string(),
                    risk_level: "низкий".to_string(),
                },
            )
            .with_profile(
                "Банк России",
                CompanyProfile {
                    base_priority: 9,
                    segment: "Регулятор".to_string(),
                    risk_level: "высокий".to_string(),
                },
            )
    }

    /// Empty directory (for tests and custom configurations).
    pub fn empty() -> Self {
        Self {
            profiles: HashMap::new(),
        }
    }

    /// Add a profile at construction time. There is no runtime mutation API;
    /// the directory is frozen once handed to the pipeline.
    pub fn with_profile(mut self, company: &str, profile: CompanyProfile) -> Self {
        self.profiles.insert(company.to_lowercase(), profile);
        self
    }

    /// Look up a company, case-insensitively. Unknown company → `None`;
    /// the scorer then applies the default base priority.
    pub fn lookup(&self, company: &str) -> Option<&CompanyProfile> {
        self.profiles.get(&company.to_lowercase())
    }
}

impl Default for CompanyDirectory {
    fn default() -> Self {
        Self::default_directory()
    }
}
