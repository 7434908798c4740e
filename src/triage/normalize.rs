//! Text normalization — the first pipeline stage.

use serde::{Deserialize, Serialize};

/// Canonicalized letter text.
///
/// Trimmed, carriage returns removed, every whitespace run collapsed to a
/// single ASCII space. Immutable once built; later stages read it via
/// [`NormalizedText::as_str`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lower-cased copy for the case-insensitive rule cascades.
    pub fn to_lowercase(&self) -> String {
        self.0.to_lowercase()
    }
}

impl std::fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize raw letter text.
///
/// Total function: any input produces a valid (possibly empty) result, and
/// running it on already-normalized text is a no-op. `split_whitespace`
/// treats `\r` and `\n` as separators, so line endings collapse together
/// with ordinary whitespace runs.
pub fn normalize(text: &str) -> NormalizedText {
    NormalizedText(text.split_whitespace().collect::<Vec<_>>().join(" "))
}
