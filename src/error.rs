//! Error types for network descriptions and layout configuration.

use thiserror::Error;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or loading a network description.
///
/// Rendering never fails once a [`crate::Network`] and [`crate::Layout`]
/// have been constructed; every variant here is an input-contract violation
/// caught up front.
#[derive(Debug, Error)]
pub enum Error {
    /// A matrix row has a different length than the first row.
    #[error("ragged matrix: row {row} has {actual} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A weight matrix does not connect the neuron counts of its two layers.
    #[error(
        "shape mismatch for weights {index}: expected {expected_rows}x{expected_cols}, got {rows}x{cols}"
    )]
    ShapeMismatch {
        index: usize,
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    /// The number of weight matrices is not one less than the number of layers.
    #[error("{layers} bias vectors need {expected} weight matrices, got {actual}")]
    LayerCountMismatch {
        layers: usize,
        expected: usize,
        actual: usize,
    },

    /// A bias or weight is NaN or infinite.
    #[error("non-finite value in {0}")]
    NonFinite(String),

    /// Geometry parameters that cannot produce a drawing.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
