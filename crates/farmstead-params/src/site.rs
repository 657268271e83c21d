//! Lot-level geometry derived from the parameter set: lot and setback
//! outlines, plan features, and the tree exclusion zones.

use farmstead_footprint::{Footprint, FootprintCategory};
use farmstead_math::units::point2_ft;
use farmstead_math::{to_internal, Aabb2, Point2};

use crate::set::{FeatureParams, FeatureShape, ParameterSet};
use crate::{ParamError, Result};

/// Build a feature's outline in internal units.
pub fn feature_footprint(feature: &FeatureParams) -> Result<Footprint> {
    let to_points = |pts: &[[f64; 2]]| -> Vec<Point2> {
        pts.iter().map(|[x, y]| point2_ft(*x, *y)).collect()
    };
    let built = match &feature.shape {
        FeatureShape::Rect { min, max } => Footprint::rectangle(
            to_internal(min[0]),
            to_internal(min[1]),
            to_internal(max[0]),
            to_internal(max[1]),
        ),
        FeatureShape::Polygon { points } => Footprint::composite_polygon(to_points(points)),
        FeatureShape::Polyline { points } => Footprint::open_polyline(to_points(points)),
    };
    built
        .map(|f| {
            f.with_category(feature.category)
                .with_label(feature.name.clone())
        })
        .map_err(|source| ParamError::InvalidFeature {
            name: feature.name.clone(),
            source,
        })
}

impl ParameterSet {
    /// Lot extent in internal units.
    pub fn lot_bounds(&self) -> Aabb2 {
        Aabb2::new(
            Point2::origin(),
            point2_ft(self.site.lot_width, self.site.lot_depth),
        )
    }

    /// Lot boundary outline.
    pub fn lot_footprint(&self) -> Result<Footprint> {
        Ok(Footprint::from_box(&self.lot_bounds())
            .map_err(|source| ParamError::InvalidFeature {
                name: "Lot_Boundary".into(),
                source,
            })?
            .with_category(FootprintCategory::Site)
            .with_label("Lot_Boundary"))
    }

    /// Buildable area inside the setbacks.
    pub fn setback_bounds(&self) -> Aabb2 {
        let s = &self.site;
        Aabb2::new(
            point2_ft(s.setback_side, s.setback_front),
            point2_ft(s.lot_width - s.setback_side, s.lot_depth - s.setback_rear),
        )
    }

    /// Setback outline.
    pub fn setback_footprint(&self) -> Result<Footprint> {
        Ok(Footprint::from_box(&self.setback_bounds())
            .map_err(|source| ParamError::InvalidFeature {
                name: "Setback_Line".into(),
                source,
            })?
            .with_category(FootprintCategory::Setback)
            .with_label("Setback_Line"))
    }

    /// Every plan feature, in declaration order.
    pub fn resolve_features(&self) -> Result<Vec<Footprint>> {
        self.features.iter().map(feature_footprint).collect()
    }

    /// Rectangles trees must stay out of, in internal units.
    ///
    /// Buildings contribute the bounds of their rotated wall rectangle
    /// grown by the building margin; features contribute only when they
    /// declare a margin; explicit zones are taken as given.
    pub fn exclusion_zones(&self) -> Result<Vec<Aabb2>> {
        let margin = to_internal(self.trees.building_margin);
        let mut zones: Vec<Aabb2> = self
            .resolve_buildings()
            .iter()
            .map(|b| b.wall_rect().bounding_box().expanded(margin))
            .collect();

        for f in &self.features {
            if let Some(m) = f.exclusion_margin {
                let outline = feature_footprint(f)?;
                zones.push(outline.bounds().expanded(to_internal(m)));
            }
        }
        zones.extend(
            self.exclusions
                .iter()
                .map(|z| Aabb2::new(point2_ft(z.min[0], z.min[1]), point2_ft(z.max[0], z.max[1]))),
        );
        Ok(zones)
    }
}
