//! The built-in sample design: a courtyard farmhouse compound on a
//! 200 x 220 ft lot.

use farmstead_footprint::FootprintCategory;

use crate::derive::TrailingBay;
use crate::set::{
    BuildingParams, Cardinal, FeatureParams, FeatureShape, OpeningParams, OverhangParams,
    ParameterSet, Placement, RidgeAxis, RoofParams, SectionParams, SiteParams, StructureParams,
    TreeParams, UpperFloorParams, UpperWallParams, ZoneParams,
};

fn opening(name: &str, facade: Cardinal, offset: f64, width: f64, sill: f64, head: f64) -> OpeningParams {
    OpeningParams {
        name: name.into(),
        facade,
        offset,
        width,
        sill,
        head,
    }
}

fn window(name: &str, facade: Cardinal, offset: f64, width: f64) -> OpeningParams {
    opening(name, facade, offset, width, 3.0, 7.0)
}

fn wall(name: &str, from: [f64; 2], to: [f64; 2]) -> UpperWallParams {
    UpperWallParams {
        name: name.into(),
        from,
        to,
    }
}

fn corners(min: [f64; 2], max: [f64; 2]) -> Placement {
    Placement::Corners { min, max }
}

fn rect(name: &str, category: FootprintCategory, min: [f64; 2], max: [f64; 2], margin: Option<f64>) -> FeatureParams {
    FeatureParams {
        name: name.into(),
        category,
        shape: FeatureShape::Rect { min, max },
        exclusion_margin: margin,
    }
}

impl ParameterSet {
    /// The sample compound: an L-shaped main house (bar plus north wing)
    /// around a courtyard, a guest pavilion to the north joined by a flat
    /// breezeway, and a barn east of the house turned 10 degrees.
    pub fn farmhouse() -> Self {
        use Cardinal::*;

        let main = BuildingParams {
            name: "Main".into(),
            placement: corners([68.0, 85.0], [132.0, 115.0]),
            ridge: RidgeAxis::EastWest,
            rotation: 0.0,
            eave_height: 12.0,
            pitch: 8.0 / 12.0,
            overhang: None,
            bay_spacing: Some(12.0),
            trailing_bay: TrailingBay::Merge { min: 6.0 },
            partitions: vec![24.0, 52.0],
            openings: vec![
                opening("Light_Wall", West, 0.0, 28.0, 0.0, 11.0),
                window("GreatRoom_Win1", South, -26.0, 4.0),
                window("GreatRoom_Win2", South, -18.0, 4.0),
                window("Kitchen_Ribbon", South, 5.0, 20.0),
                window("Entry_Win", South, 25.0, 4.0),
                opening("Entry_Door", East, 0.0, 4.0, 0.0, 7.0),
                window("Entry_Win_S", East, -7.0, 4.0),
                window("Entry_Win_N", East, 7.0, 4.0),
                opening("PrimarySuite_Slot", East, 0.0, 8.0, 14.0, 16.0),
            ],
            upper_floor: Some(UpperFloorParams {
                floored: [24.0, 64.0],
                walls: vec![
                    wall("UF_Balcony_Open", [20.0, 5.0], [20.0, 25.0]),
                    wall("UF_Balcony_S", [20.0, 5.0], [24.0, 5.0]),
                    wall("UF_Balcony_N", [20.0, 25.0], [24.0, 25.0]),
                    wall("UF_Wall_Hallway_Primary", [40.0, 0.0], [40.0, 30.0]),
                    wall("UF_PrimaryBath_W", [54.0, 0.0], [54.0, 12.0]),
                    wall("UF_PrimaryBath_N", [54.0, 12.0], [64.0, 12.0]),
                ],
            }),
        };

        let wing = BuildingParams {
            name: "Wing".into(),
            placement: corners([108.0, 115.0], [132.0, 143.0]),
            ridge: RidgeAxis::NorthSouth,
            rotation: 0.0,
            eave_height: 12.0,
            pitch: 8.0 / 12.0,
            overhang: None,
            bay_spacing: Some(14.0),
            trailing_bay: TrailingBay::Keep,
            partitions: Vec::new(),
            openings: vec![window("Library_Win", East, 0.0, 18.0)],
            upper_floor: Some(UpperFloorParams {
                floored: [0.0, 28.0],
                walls: vec![
                    wall("UF_Stair_Landing", [0.0, 20.0], [10.0, 20.0]),
                    wall("UF_Wall_Bed3_Bed2", [10.0, 0.0], [10.0, 24.0]),
                    wall("UF_Bed2Bath_W", [20.0, 10.0], [28.0, 10.0]),
                    wall("UF_Bed2Bath_S", [20.0, 0.0], [20.0, 10.0]),
                ],
            }),
        };

        let guest = BuildingParams {
            name: "Guest".into(),
            placement: corners([60.0, 151.0], [100.0, 171.0]),
            ridge: RidgeAxis::EastWest,
            rotation: 0.0,
            eave_height: 8.5,
            pitch: 8.0 / 12.0,
            overhang: None,
            bay_spacing: Some(10.0),
            trailing_bay: TrailingBay::Keep,
            partitions: vec![20.0],
            openings: vec![
                window("Guest_Win1", West, -5.0, 4.0),
                window("Guest_Win2", West, 5.0, 4.0),
                window("Guest_North_Win1", North, -10.0, 4.0),
                window("Guest_North_Win2", North, 10.0, 4.0),
            ],
            upper_floor: None,
        };

        let barn = BuildingParams {
            name: "Barn".into(),
            placement: Placement::Centered {
                center: [155.0, 100.0],
                length: 36.0,
                width: 26.0,
            },
            ridge: RidgeAxis::NorthSouth,
            rotation: 10.0,
            eave_height: 10.0,
            pitch: 10.0 / 12.0,
            overhang: None,
            bay_spacing: Some(12.0),
            trailing_bay: TrailingBay::Keep,
            partitions: vec![24.0],
            openings: vec![
                opening("Garage_Door", South, 0.0, 10.0, 0.0, 8.0),
                opening("Workshop_Door", East, 6.0, 4.0, 0.0, 7.0),
                window("Barn_Win", North, 0.0, 4.0),
            ],
            upper_floor: None,
        };

        let breezeway = BuildingParams {
            name: "Breezeway".into(),
            placement: corners([103.0, 143.0], [108.0, 151.0]),
            ridge: RidgeAxis::NorthSouth,
            rotation: 0.0,
            eave_height: 8.0,
            pitch: 0.0,
            overhang: Some(OverhangParams { eave: 1.0, rake: 1.0 }),
            bay_spacing: None,
            trailing_bay: TrailingBay::Keep,
            partitions: Vec::new(),
            openings: Vec::new(),
            upper_floor: None,
        };

        let features = vec![
            FeatureParams {
                name: "Main_House".into(),
                category: FootprintCategory::Building,
                shape: FeatureShape::Polygon {
                    points: vec![
                        [68.0, 85.0],
                        [132.0, 85.0],
                        [132.0, 143.0],
                        [108.0, 143.0],
                        [108.0, 115.0],
                        [68.0, 115.0],
                    ],
                },
                exclusion_margin: None,
            },
            rect(
                "Courtyard_Paving",
                FootprintCategory::Courtyard,
                [60.0, 115.0],
                [108.0, 151.0],
                Some(0.0),
            ),
            rect(
                "Guest_Porch",
                FootprintCategory::Porch,
                [60.0, 145.0],
                [100.0, 151.0],
                Some(4.0),
            ),
            rect(
                "Corten_Canopy",
                FootprintCategory::Canopy,
                [68.0, 115.0],
                [92.0, 125.0],
                None,
            ),
            rect(
                "Fire_Wall",
                FootprintCategory::Wall,
                [78.0, 125.0],
                [90.0, 126.0],
                None,
            ),
            FeatureParams {
                name: "Arrival_Drive".into(),
                category: FootprintCategory::Drive,
                shape: FeatureShape::Polyline {
                    points: vec![
                        [200.0, 80.0],
                        [185.0, 85.0],
                        [170.0, 92.0],
                        [170.0, 95.0],
                        [150.0, 85.0],
                        [140.0, 90.0],
                        [137.0, 100.0],
                    ],
                },
                exclusion_margin: None,
            },
        ];

        Self {
            site: SiteParams {
                lot_width: 200.0,
                lot_depth: 220.0,
                setback_front: 35.0,
                setback_side: 20.0,
                setback_rear: 30.0,
            },
            roof: RoofParams {
                eave_overhang: 4.0,
                rake_overhang: 2.0,
                flat_roof_thickness: 1.0,
            },
            structure: StructureParams {
                wall_thickness: 10.0 / 12.0,
                floor_to_floor: 10.5,
            },
            trees: TreeParams {
                target: 75,
                seed: 42,
                radius_min: 4.0,
                radius_max: 8.0,
                perimeter_buffer: 30.0,
                perimeter_fraction: 0.4,
                edge_margin: 3.0,
                max_retries: 5000,
                building_margin: 4.0,
                canopy_clearance: true,
                min_gap: Some(4.0),
            },
            buildings: vec![main, wing, guest, barn, breezeway],
            features,
            exclusions: vec![ZoneParams {
                name: "Driveway_Corridor".into(),
                min: [130.0, 70.0],
                max: [200.0, 115.0],
            }],
            sections: vec![
                // Longitudinal, along the main bar's ridge.
                SectionParams {
                    name: "Section A".into(),
                    looking: Cardinal::North,
                    position: 100.0,
                },
                // Across the wing.
                SectionParams {
                    name: "Section B".into(),
                    looking: Cardinal::West,
                    position: 110.0,
                },
            ],
        }
    }
}
