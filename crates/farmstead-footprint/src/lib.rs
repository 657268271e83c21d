#![warn(missing_docs)]

//! Footprint construction for the farmstead geometry engine.
//!
//! Produces closed outlines and open paths in the ground plane: axis-aligned
//! rectangles, rotated rectangles, explicit composite outlines (L or U
//! shaped houses), and open polylines for drives and beam lines. Every
//! builder returns a fresh value; nothing here mutates a footprint.
//!
//! # Example
//!
//! ```
//! use farmstead_footprint::{Footprint, FootprintCategory};
//! use farmstead_math::Point2;
//!
//! let barn = Footprint::rotated_rectangle(Point2::new(155.0, 100.0), 36.0, 26.0, 10.0)
//!     .unwrap()
//!     .with_category(FootprintCategory::Building)
//!     .with_label("Barn");
//! assert_eq!(barn.len(), 4);
//! assert!(barn.is_ccw());
//! ```

mod footprint;
mod rotated;

pub use footprint::{Footprint, FootprintCategory};
pub use rotated::RotatedRect;

use thiserror::Error;

/// Errors from footprint construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FootprintError {
    /// Not enough vertices for the requested kind of footprint.
    #[error("footprint needs at least {required} vertices, got {got}")]
    TooFewVertices {
        /// Minimum vertex count.
        required: usize,
        /// Vertex count supplied.
        got: usize,
    },

    /// A vertex has a NaN or infinite coordinate.
    #[error("vertex {0} is not finite")]
    NonFiniteVertex(usize),

    /// A rectangle with zero or negative extent.
    #[error("degenerate rectangle: length {length}, width {width}")]
    DegenerateRectangle {
        /// Extent along the rectangle's own x axis.
        length: f64,
        /// Extent along the rectangle's own y axis.
        width: f64,
    },
}

/// Result type for footprint construction.
pub type Result<T> = std::result::Result<T, FootprintError>;
