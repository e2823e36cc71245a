use thiserror::Error;

/// Top-level error type for the arcline kernel.
#[derive(Debug, Error)]
pub enum ArclineError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// A finite point was requested on a curve extremity at infinity.
    #[error("unbounded shape: {what} has no finite value")]
    UnboundedShape { what: &'static str },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    /// Consecutive chain elements do not share an endpoint.
    #[error("discontinuous chain: gap of {gap} before element {index}")]
    Discontinuous { index: usize, gap: f64 },

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to curve operations.
#[derive(Debug, Error)]
pub enum OperationError {
    /// The junction between two offset pieces could not be classified
    /// as salient, reentrant, or flat.
    #[error("unclassified junction: tangent turn {turn}, curvature step {curvature_step}")]
    UnclassifiedJunction { turn: f64, curvature_step: f64 },

    /// A structural assumption of the buffer/splitting machinery failed.
    #[error("assembly invariant violated: {0}")]
    AssemblyInvariant(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`ArclineError`].
pub type Result<T> = std::result::Result<T, ArclineError>;
