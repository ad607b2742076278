// ── Core error types ──
//
// The calculators never compute over a model they cannot find or over
// values they cannot divide by. Both situations surface here and are
// propagated unchanged to the caller.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Lookup errors ────────────────────────────────────────────────
    #[error("Unknown deployment model: {name}")]
    UnknownModel {
        name: String,
        /// Models the settings do define, in document order.
        available: Vec<String>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Malformed configuration at `{field}`: {reason}")]
    MalformedConfiguration { field: String, reason: String },
}

impl CoreError {
    pub(crate) fn unknown_model<'a>(
        name: &str,
        available: impl Iterator<Item = &'a str>,
    ) -> Self {
        Self::UnknownModel {
            name: name.to_owned(),
            available: available.map(str::to_owned).collect(),
        }
    }

    pub(crate) fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedConfiguration {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
