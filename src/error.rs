//! Error taxonomy for grid object assembly.
//!
//! Every failure aborts the whole invocation; there is no degraded output.
//! Variants are grouped by origin: configuration tokens, unmet preconditions,
//! malformed grid definitions and missing store entries.

/// Failure raised while configuring or assembling grid objects.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Shape token is not one of the known policies.
    #[error("unrecognized shape `{0}` (expected `Natural Shape`, `Circle` or `Rectangle`)")]
    UnknownShape(String),

    /// Diameter token is neither `Automatic` nor a non-negative integer.
    #[error("invalid diameter `{0}` (expected `Automatic` or a pixel count)")]
    InvalidDiameter(String),

    /// Automatic radius requested but the guide objects contain no components.
    #[error("cannot estimate a radius: guide objects contain no components")]
    NoComponents,

    /// The chosen configuration needs guide objects but none were named.
    #[error("{0} requires existing guide objects but none were configured")]
    MissingGuideObjects(&'static str),

    /// Guide label image does not cover the grid canvas.
    #[error("guide objects are {actual_w}x{actual_h} but the grid canvas is {canvas_w}x{canvas_h}")]
    CanvasMismatch {
        canvas_w: usize,
        canvas_h: usize,
        actual_w: usize,
        actual_h: usize,
    },

    /// Grid definition violates its invariants.
    #[error("invalid grid definition: {0}")]
    InvalidGrid(String),

    /// Named entity is absent from the store.
    #[error("`{0}` not found in the object store")]
    NotFound(String),

    /// Named entity exists but holds a different kind of value.
    #[error("`{name}` is a {found}, expected a {expected}")]
    WrongKind {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, GridError>;
