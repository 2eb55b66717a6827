/// Errors that can occur during convex hull computation.
///
/// Hull failures are recoverable: contact reduction reacts to them by falling back to a
/// lower-dimensional reduction.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvexHullError {
    /// Not enough points were given to build a hull of the requested dimension.
    ///
    /// A 2D hull needs 3 non-collinear points and a 3D hull needs 4 points.
    #[error("not enough points were given to the convex-hull algorithm")]
    IncompletePoints,
    /// The input points are all collinear or coplanar, so the hull has no volume.
    #[error("the input points are degenerate (collinear or coplanar)")]
    Degenerate,
    /// An internal error occurred during convex hull computation.
    #[error("internal error: {0}")]
    InternalError(&'static str),
}
