//! Two-phase seeded sampler.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use farmstead_math::{Aabb2, Point2};

use crate::{Result, ScatterConfig, ScatterResult, Tree};

#[derive(Debug, Clone, Copy)]
enum Phase {
    Perimeter,
    Interior,
}

/// Scatter features over `config.bounds`, avoiding `exclusions`.
///
/// Each feature gets up to `config.max_retries` attempts. A feature whose
/// attempts all land in an exclusion, inside the edge margin, or too close
/// to a placed feature when a minimum gap is set, is skipped. Fully excluded
/// bounds return zero features instead of looping.
pub fn scatter(config: &ScatterConfig, exclusions: &[Aabb2], seed: u64) -> Result<ScatterResult> {
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut result = ScatterResult::default();

    let perimeter_target = config.perimeter_target().min(config.target);
    result.perimeter_count = run_phase(
        Phase::Perimeter,
        perimeter_target,
        config,
        exclusions,
        &mut rng,
        &mut result,
    );
    let interior_target = config.target - result.trees.len();
    result.interior_count = run_phase(
        Phase::Interior,
        interior_target,
        config,
        exclusions,
        &mut rng,
        &mut result,
    );

    Ok(result)
}

fn run_phase(
    phase: Phase,
    count: usize,
    config: &ScatterConfig,
    exclusions: &[Aabb2],
    rng: &mut StdRng,
    result: &mut ScatterResult,
) -> usize {
    let mut placed = 0;
    let mut attempts = 0u64;
    for _ in 0..count {
        let mut accepted = None;
        for _ in 0..config.max_retries {
            attempts += 1;
            let candidate = sample(phase, config, rng);
            if is_clear(&candidate, config, exclusions, &result.trees) {
                accepted = Some(candidate);
                break;
            }
        }
        match accepted {
            Some(tree) => {
                result.trees.push(tree);
                placed += 1;
            }
            None => result.skipped += 1,
        }
    }

    debug!(?phase, requested = count, placed, attempts, "scatter phase finished");
    if placed < count {
        warn!(
            ?phase,
            requested = count,
            placed,
            "scatter placed fewer features than requested"
        );
    }
    placed
}

/// Uniform sample in `[lo, hi)`; collapses to `lo` when the range is empty.
fn sample_range(rng: &mut StdRng, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}

fn sample(phase: Phase, config: &ScatterConfig, rng: &mut StdRng) -> Tree {
    let b = &config.bounds;
    let radius = if config.radius_max > config.radius_min {
        rng.random_range(config.radius_min..=config.radius_max)
    } else {
        config.radius_min
    };
    let m = config.edge_margin + radius;
    // The band never reaches closer to the edge than the margin.
    let band = config.perimeter_buffer.max(m);

    let (x, y) = match phase {
        Phase::Interior => (
            sample_range(rng, b.min_x + m, b.max_x - m),
            sample_range(rng, b.min_y + m, b.max_y - m),
        ),
        Phase::Perimeter => match rng.random_range(0..4u8) {
            // north
            0 => (
                sample_range(rng, b.min_x + m, b.max_x - m),
                sample_range(rng, b.max_y - band, b.max_y - m),
            ),
            // south
            1 => (
                sample_range(rng, b.min_x + m, b.max_x - m),
                sample_range(rng, b.min_y + m, b.min_y + band),
            ),
            // east
            2 => (
                sample_range(rng, b.max_x - band, b.max_x - m),
                sample_range(rng, b.min_y + m, b.max_y - m),
            ),
            _ => (
                sample_range(rng, b.min_x + m, b.min_x + band),
                sample_range(rng, b.min_y + m, b.max_y - m),
            ),
        },
    };

    Tree {
        center: Point2::new(x, y),
        radius,
    }
}

fn is_clear(candidate: &Tree, config: &ScatterConfig, exclusions: &[Aabb2], placed: &[Tree]) -> bool {
    let c = &candidate.center;
    let b = &config.bounds;
    let m = config.edge_margin + candidate.radius;
    if !(c.x >= b.min_x + m && c.x <= b.max_x - m && c.y >= b.min_y + m && c.y <= b.max_y - m) {
        return false;
    }

    let excluded = if config.canopy_clearance {
        let r = candidate.radius;
        exclusions.iter().any(|z| {
            c.x + r > z.min_x && c.x - r < z.max_x && c.y + r > z.min_y && c.y - r < z.max_y
        })
    } else {
        exclusions.iter().any(|z| z.contains(c))
    };
    if excluded {
        return false;
    }

    match config.min_gap {
        Some(gap) => placed
            .iter()
            .all(|t| (t.center - c).norm() >= t.radius + candidate.radius + gap),
        None => true,
    }
}
