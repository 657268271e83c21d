#![warn(missing_docs)]

//! Elevations and sections for the farmstead geometry engine.
//!
//! This crate turns resolved buildings into 2D drawings:
//!
//! - **Elevations**: one orthographic view per cardinal direction, with
//!   gable or broadside silhouettes chosen per building, walls, gables and
//!   the openings that face the viewer
//! - **Depth classification**: buildings covered by a nearer one are kept
//!   but marked as background
//! - **Sections**: vertical cuts with roof lines, partitions, floors and
//!   hatching
//! - **Layout**: disjoint placement of views on one sheet
//!
//! # Example
//!
//! ```
//! use farmstead_drafting::{project_elevation, ElementKind, ViewDirection};
//! use farmstead_params::ParameterSet;
//!
//! let params = ParameterSet::farmhouse();
//! let buildings = params.resolve_buildings();
//! let west = project_elevation(&buildings, &params.lot_bounds(), ViewDirection::West);
//!
//! // The main bar is seen end on from the west: five points, one apex.
//! let main = west.silhouette("Main").unwrap();
//! assert_eq!(main.points.len(), 5);
//! assert_eq!(west.of_kind(ElementKind::Grade).count(), 1);
//! ```

pub mod layout;
pub mod projection;
pub mod section;
pub mod types;

pub use layout::{layout_sheet, layout_views};
pub use projection::{
    classify, project_elevation, project_elevation_toward, project_elevation_with_options,
    silhouette, ElevationOptions, ViewFrame,
};
pub use section::{hatch_lines, section_view, section_view_with_options, SectionOptions, SectionPlane};
pub use types::{
    ElementKind, ProfileElement, ProfileShape, ViewDirection, ViewProfile, Visibility,
};

use thiserror::Error;

/// Errors from drafting operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftingError {
    /// The requested direction is not one of the four horizontal cardinal
    /// directions.
    #[error("unsupported view direction: {0}")]
    UnsupportedDirection(String),

    /// A section plane crosses no building and has none beyond it.
    #[error("section {0} cuts nothing and sees nothing")]
    EmptySection(String),
}

/// Result type for drafting operations.
pub type Result<T> = std::result::Result<T, DraftingError>;

#[cfg(test)]
mod tests {
    use super::*;
    use farmstead_massing::build_volume;
    use farmstead_params::ParameterSet;

    /// Elevation silhouettes agree with the massing solids they depict.
    #[test]
    fn test_silhouettes_match_massing_heights() {
        let params = ParameterSet::farmhouse();
        let buildings = params.resolve_buildings();
        let lot = params.lot_bounds();
        for dir in ViewDirection::LAYOUT_ORDER {
            let view = project_elevation(&buildings, &lot, dir);
            for b in &buildings {
                let volume = build_volume(b).unwrap();
                let outline = view.silhouette(&b.name).unwrap();
                assert!(
                    (outline.max_height() - volume.max_height()).abs() < 1e-6,
                    "{} from {dir}",
                    b.name
                );
            }
        }
    }

    /// Horizontal extents of a silhouette cover the projected roof solid.
    #[test]
    fn test_silhouette_width_matches_roof() {
        let params = ParameterSet::farmhouse();
        let buildings = params.resolve_buildings();
        let lot = params.lot_bounds();
        for dir in ViewDirection::LAYOUT_ORDER {
            let frame = ViewFrame::new(dir, &lot);
            let view = project_elevation(&buildings, &lot, dir);
            for b in &buildings {
                let volume = build_volume(b).unwrap();
                let roof_pts: Vec<_> = volume.roof.vertices.iter().map(|p| p.xy()).collect();
                let (lo, hi) = frame.horizontal_span(&roof_pts);
                let bounds = view.silhouette(&b.name).unwrap().bounds();
                assert!((bounds.min_x - lo).abs() < 1e-6, "{} from {dir}", b.name);
                assert!((bounds.max_x - hi).abs() < 1e-6, "{} from {dir}", b.name);
            }
        }
    }
}
