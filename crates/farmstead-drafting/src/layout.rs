//! Placement of views on a shared sheet.

use farmstead_math::{Aabb2, Vec2};

use crate::types::ViewProfile;

/// Place views left to right in the given order, `gap` apart, with their
/// grade lines on a common baseline. Returns the bounds of the row on the
/// sheet. Views with no elements are skipped.
pub fn layout_views(views: &mut [ViewProfile], gap: f64) -> Aabb2 {
    let mut cursor = 0.0;
    let mut row = Aabb2::empty();
    for view in views.iter_mut() {
        if !view.bounds.is_valid() {
            continue;
        }
        view.offset = Vec2::new(cursor - view.bounds.min_x, 0.0);
        row.include_box(&view.placed_bounds());
        cursor += view.bounds.width() + gap;
    }
    row
}

/// Lay out several rows of views, each row below the previous one with
/// `gap` between the lowest point of one row and the highest of the next.
pub fn layout_sheet(rows: &mut [Vec<ViewProfile>], gap: f64) -> Aabb2 {
    let mut sheet = Aabb2::empty();
    let mut floor: Option<f64> = None;
    for row in rows.iter_mut() {
        let placed = layout_views(row, gap);
        if !placed.is_valid() {
            continue;
        }
        let shift = floor.map_or(0.0, |f| f - gap - placed.max_y);
        for view in row.iter_mut() {
            view.offset.y += shift;
        }
        floor = Some(placed.min_y + shift);
        sheet.include_box(&Aabb2 {
            min_x: placed.min_x,
            min_y: placed.min_y + shift,
            max_x: placed.max_x,
            max_y: placed.max_y + shift,
        });
    }
    sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project_elevation;
    use crate::section::{section_view, SectionPlane};
    use crate::types::ViewDirection;
    use farmstead_math::to_internal;
    use farmstead_params::ParameterSet;

    fn elevations() -> Vec<ViewProfile> {
        let params = ParameterSet::farmhouse();
        let buildings = params.resolve_buildings();
        let lot = params.lot_bounds();
        ViewDirection::LAYOUT_ORDER
            .iter()
            .map(|d| project_elevation(&buildings, &lot, *d))
            .collect()
    }

    #[test]
    fn test_views_do_not_overlap() {
        let mut views = elevations();
        let gap = to_internal(20.0);
        let row = layout_views(&mut views, gap);
        for (i, a) in views.iter().enumerate() {
            for b in &views[i + 1..] {
                assert!(!a.placed_bounds().intersects(&b.placed_bounds()));
            }
        }
        for pair in views.windows(2) {
            let gap_between = pair[1].placed_bounds().min_x - pair[0].placed_bounds().max_x;
            assert!((gap_between - gap).abs() < 1e-6);
        }
        assert!(row.min_x.abs() < 1e-9);
        assert_eq!(views[0].direction, ViewDirection::West);
        assert_eq!(views[3].direction, ViewDirection::North);
    }

    #[test]
    fn test_grades_share_baseline() {
        let mut views = elevations();
        layout_views(&mut views, 1000.0);
        assert!(views.iter().all(|v| v.offset.y == 0.0));
    }

    #[test]
    fn test_sheet_rows_stack_downward() {
        let params = ParameterSet::farmhouse();
        let buildings = params.resolve_buildings();
        let lot = params.lot_bounds();
        let sections: Vec<ViewProfile> = params
            .sections
            .iter()
            .map(|s| section_view(&buildings, &lot, &SectionPlane::from_params(s)).unwrap())
            .collect();
        let mut rows = vec![elevations(), sections];
        let gap = to_internal(20.0);
        let sheet = layout_sheet(&mut rows, gap);

        let top_row = rows[0]
            .iter()
            .map(|v| v.placed_bounds().min_y)
            .fold(f64::INFINITY, f64::min);
        let bottom_row = rows[1]
            .iter()
            .map(|v| v.placed_bounds().max_y)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!((top_row - bottom_row - gap).abs() < 1e-6);
        for v in rows.iter().flatten() {
            assert!(sheet.contains_box(&v.placed_bounds()));
        }
    }

    #[test]
    fn test_empty_views_skipped() {
        let mut views = vec![ViewProfile::new("Blank", ViewDirection::South)];
        assert!(!layout_views(&mut views, 1.0).is_valid());
        assert_eq!(views[0].offset, Vec2::zeros());
    }
}
