/// Convenience result type used across Rastile.
pub type RastileResult<T> = Result<T, RastileError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Configuration errors leave the engine in its previous valid state: the
/// offending call is a no-op. Steady-state rendering never returns an error;
/// malformed per-frame input is normalized instead (wrapped angles, clamped
/// pivots, absolute scales).
#[derive(thiserror::Error, Debug)]
pub enum RastileError {
    /// Invalid slot, table index or entity pairing supplied to a live engine.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid data shape detected while constructing an asset or engine.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while binding or validating sequences and palette cycles.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RastileError {
    /// Build a [`RastileError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`RastileError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RastileError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`RastileError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
