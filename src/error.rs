//! Error types for the parking geometry core.

/// Result type alias
pub type Result<T> = std::result::Result<T, GeometryError>;

/// Errors raised when constructing geometry or kinematics components.
///
/// These are all construction-time failures; once a component is built,
/// its operations are total over finite inputs. Per-axis and per-edge
/// degeneracies (zero-length edges, rays parallel to a segment) are
/// recovered internally and never surface as errors.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// Rectangle with a non-positive width or height
    #[error("invalid rectangle size {w}x{h}: width and height must be positive")]
    InvalidGeometry {
        /// Requested width
        w: f64,
        /// Requested height
        h: f64,
    },

    /// Non-positive scalar parameter (wheelbase, timestep, lidar range...)
    #[error("invalid parameter {name} = {value}: must be positive")]
    InvalidParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// The rejected value
        value: f64,
    },
}
