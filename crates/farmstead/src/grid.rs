//! Structural grid: columns at the bay lines, eave and ridge beams.

use serde::Serialize;

use farmstead_footprint::{Footprint, FootprintCategory};
use farmstead_math::Point2;
use farmstead_params::BuildingGeometry;

use crate::Result;

/// A column at a grid intersection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    /// Grid reference, e.g. `A3`.
    pub mark: String,
    /// Position on the lot.
    pub position: Point2,
}

/// A labelled grid line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridLine {
    /// Letter for lines along the ridge, number for bay lines.
    pub label: String,
    /// Line on the lot.
    pub line: Footprint,
}

/// Frame of one building.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuralGrid {
    /// Building name.
    pub building: String,
    /// Columns on both long walls at every bay line.
    pub columns: Vec<Column>,
    /// Bay lines across the span, numbered from the start wall.
    pub bays: Vec<GridLine>,
    /// Long-wall lines, `A` on the right of the ridge, `B` on the left.
    pub rows: Vec<GridLine>,
    /// Beams on the two long walls at eave height.
    pub eave_beams: Vec<Footprint>,
    /// Beam under the ridge. Flat roofs have none.
    pub ridge_beam: Option<Footprint>,
    /// Top of the eave beams.
    pub eave_height: f64,
    /// Top of the ridge beam.
    pub ridge_height: f64,
}

const ROWS: [(&str, f64); 2] = [("A", -1.0), ("B", 1.0)];

fn beam(a: Point2, b: Point2, label: String) -> Result<Footprint> {
    Ok(Footprint::segment(a, b)?
        .with_category(FootprintCategory::Structure)
        .with_label(label))
}

/// Build the structural grid of one building. Irregular trailing bays are
/// taken as they come from the bay lines.
pub fn structural_grid(b: &BuildingGeometry) -> Result<StructuralGrid> {
    let hl = b.length / 2.0;
    let hw = b.width / 2.0;
    let world = |x: f64, y: f64| b.to_world(&Point2::new(x, y));

    let mut columns = Vec::with_capacity(b.bay_lines.len() * 2);
    let mut bays = Vec::with_capacity(b.bay_lines.len());
    for (i, along) in b.bay_lines.iter().enumerate() {
        let x = b.along_ridge(*along);
        let number = (i + 1).to_string();
        for (letter, side) in ROWS {
            columns.push(Column {
                mark: format!("{letter}{number}"),
                position: world(x, side * hw),
            });
        }
        bays.push(GridLine {
            label: number.clone(),
            line: beam(
                world(x, -hw),
                world(x, hw),
                format!("{}_Grid_{number}", b.name),
            )?,
        });
    }

    let mut rows = Vec::with_capacity(2);
    let mut eave_beams = Vec::with_capacity(2);
    for (letter, side) in ROWS {
        let (start, end) = (world(-hl, side * hw), world(hl, side * hw));
        rows.push(GridLine {
            label: letter.to_string(),
            line: beam(start, end, format!("{}_Grid_{letter}", b.name))?,
        });
        eave_beams.push(beam(start, end, format!("{}_Eave_Beam_{letter}", b.name))?);
    }

    let ridge_beam = if b.is_flat() {
        None
    } else {
        let (start, end) = b.ridge_line();
        Some(beam(start, end, format!("{}_Ridge_Beam", b.name))?)
    };

    Ok(StructuralGrid {
        building: b.name.clone(),
        columns,
        bays,
        rows,
        eave_beams,
        ridge_beam,
        eave_height: b.heights.eave,
        ridge_height: b.heights.ridge,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use farmstead_math::{to_internal, to_real};
    use farmstead_params::ParameterSet;

    #[test]
    fn test_main_grid_with_merged_trailing_bay() {
        let params = ParameterSet::farmhouse();
        let main = params.resolve_building("Main").unwrap();
        let grid = structural_grid(&main).unwrap();
        // 0, 12, 24, 36, 48, 64: five bays, the last one 16 ft.
        assert_eq!(grid.bays.len(), 6);
        assert_eq!(grid.columns.len(), 12);
        let xs: Vec<f64> = grid
            .columns
            .iter()
            .filter(|c| c.mark.starts_with('A'))
            .map(|c| to_real(c.position.x))
            .collect();
        let expected = [68.0, 80.0, 92.0, 104.0, 116.0, 132.0];
        for (x, e) in xs.iter().zip(expected) {
            assert!((x - e).abs() < 1e-9);
        }
        // Row A is the south wall of an east-west bar.
        let a1 = grid.columns.iter().find(|c| c.mark == "A1").unwrap();
        assert!((to_real(a1.position.y) - 85.0).abs() < 1e-9);
        assert_eq!(grid.bays.last().unwrap().label, "6");
    }

    #[test]
    fn test_beams() {
        let params = ParameterSet::farmhouse();
        let main = params.resolve_building("Main").unwrap();
        let grid = structural_grid(&main).unwrap();
        assert_eq!(grid.eave_beams.len(), 2);
        for beam in &grid.eave_beams {
            assert!((beam.length() - to_internal(64.0)).abs() < 1e-6);
            assert_eq!(beam.category(), FootprintCategory::Structure);
        }
        let ridge = grid.ridge_beam.unwrap();
        assert!((to_real(ridge.vertices()[0].y) - 100.0).abs() < 1e-9);
        assert!((grid.ridge_height - to_internal(22.0)).abs() < 1e-6);
    }

    #[test]
    fn test_barn_columns_are_rotated() {
        let params = ParameterSet::farmhouse();
        let barn = params.resolve_building("Barn").unwrap();
        let grid = structural_grid(&barn).unwrap();
        // 36 ft at 12 ft bays: 0, 12, 24, 36.
        assert_eq!(grid.columns.len(), 8);
        for c in &grid.columns {
            let local = barn.to_local(&c.position);
            assert!((local.y.abs() - barn.width / 2.0).abs() < 1e-6);
        }
        let a1 = grid.columns.iter().find(|c| c.mark == "A1").unwrap();
        let b1 = grid.columns.iter().find(|c| c.mark == "B1").unwrap();
        let across = (b1.position - a1.position).normalize();
        assert!(across.dot(&barn.ridge_dir()).abs() < 1e-9);
    }

    #[test]
    fn test_flat_roof_has_no_ridge_beam() {
        let params = ParameterSet::farmhouse();
        let bw = params.resolve_building("Breezeway").unwrap();
        let grid = structural_grid(&bw).unwrap();
        assert!(grid.ridge_beam.is_none());
        // No bay spacing: columns only at the corners.
        assert_eq!(grid.columns.len(), 4);
    }
}
