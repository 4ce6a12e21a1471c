//! Geometric variety transforms over a raw position list.
//!
//! Operators run in a fixed order: sign flips, seeded quarter turns, triad
//! stagger, settling, legacy column stagger, per-layer jitter, and finally the
//! strict no-overlap pass. Settling is always the last vertical step, and
//! lateral repulsion always precedes a final settle because pushing a tile
//! sideways can change what supports it.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::geometry::{TileMetrics, Vec3};
use crate::rng::{Mulberry32, Purpose};
use crate::settle::{resolve_in_layer_overlaps, snap_down};

/// Which perturbations to apply and how strongly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TransformConfig {
    pub mirror_x: bool,
    pub mirror_z: bool,
    pub rotate_180: bool,
    /// Seeded 0/90/180/270 degree turn about the vertical axis.
    pub random_quarter_turns: bool,
    pub stagger_triad_x: bool,
    /// Triad stagger amplitude in units of `spacing_x`.
    pub stagger_amount_x: f64,
    pub stagger_triad_z: bool,
    pub stagger_amount_z: f64,
    pub snap_down: bool,
    /// Alternating per-column nudge; only used outside strict mode.
    pub legacy_column_stagger: bool,
    /// Legacy nudge in units of `spacing_x`.
    pub legacy_stagger_delta: f64,
    pub jitter_enabled: bool,
    /// Requested jitter in units of spacing; clamped to the safe bound.
    pub jitter_amount: f64,
    /// Always finish with overlap resolution plus a settle.
    pub strict_no_overlap: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            mirror_x: false,
            mirror_z: false,
            rotate_180: false,
            random_quarter_turns: true,
            stagger_triad_x: true,
            stagger_amount_x: 0.33,
            stagger_triad_z: true,
            stagger_amount_z: 0.33,
            snap_down: true,
            legacy_column_stagger: true,
            legacy_stagger_delta: 0.1,
            jitter_enabled: false,
            jitter_amount: 0.25,
            strict_no_overlap: true,
        }
    }
}

/// Runs the full pipeline and returns the legalized positions.
pub fn apply(
    positions: Vec<Vec3>,
    config: &TransformConfig,
    seed: u32,
    metrics: &TileMetrics,
) -> Vec<Vec3> {
    let mut positions = positions;

    // 1. Quarter turns, then axis sign flips. The three boolean flips are
    // plain sign multipliers and combine multiplicatively.
    let quarter_steps = if config.random_quarter_turns {
        let mut rng = Mulberry32::for_purpose(seed, Purpose::QuarterTurn);
        rng.next_index(4)
    } else {
        0
    };
    let sx = sign(config.mirror_x) * sign(config.rotate_180);
    let sz = sign(config.mirror_z) * sign(config.rotate_180);
    for p in &mut positions {
        for _ in 0..quarter_steps {
            let (nx, nz) = (p.z, -p.x);
            p.x = nx;
            p.z = nz;
        }
        p.x *= sx;
        p.z *= sz;
    }

    // 2. Triad stagger: layers cycle through offsets -a, 0, +a so no three
    // consecutive layers line up on either axis.
    if config.stagger_triad_x && config.stagger_amount_x != 0.0 {
        for p in &mut positions {
            let tri = (metrics.layer_of(p.y).rem_euclid(3) - 1) as f64;
            p.x += tri * config.stagger_amount_x * metrics.spacing_x;
        }
    }
    if config.stagger_triad_z && config.stagger_amount_z != 0.0 {
        for p in &mut positions {
            let tri = (metrics.layer_of(p.y).rem_euclid(3) - 1) as f64;
            p.z += tri * config.stagger_amount_z * metrics.spacing_z;
        }
    }

    if config.snap_down {
        positions = snap_down(&positions, metrics);
    }

    // 3. Legacy alternating column nudge. Superseded by strict mode, which
    // guarantees separation without it.
    if config.legacy_column_stagger && !config.strict_no_overlap {
        apply_column_stagger(&mut positions, config.legacy_stagger_delta, metrics);
        if config.snap_down {
            positions = snap_down(&positions, metrics);
        }
    }

    // 4. Per-layer jitter, clamped so a full layer shifted by the worst-case
    // offset still cannot overlap its neighbors.
    if config.jitter_enabled && config.jitter_amount > 0.0 && !config.strict_no_overlap {
        apply_layer_jitter(&mut positions, config.jitter_amount, seed, metrics);
        resolve_in_layer_overlaps(&mut positions, metrics);
        if config.snap_down {
            positions = snap_down(&positions, metrics);
        }
    }

    // 5. Strict mode: resolve whatever the optional stages left behind, then
    // settle one final time.
    if config.strict_no_overlap {
        resolve_in_layer_overlaps(&mut positions, metrics);
        if config.snap_down {
            positions = snap_down(&positions, metrics);
        }
    }

    positions
}

fn sign(flip: bool) -> f64 {
    if flip {
        -1.0
    } else {
        1.0
    }
}

/// Alternates stacked tiles in a shared (x, z) column by +/- delta in x, so
/// no tile sits perfectly above another. The bottom tile stays put.
fn apply_column_stagger(positions: &mut [Vec3], delta: f64, metrics: &TileMetrics) {
    let mut by_column: FxHashMap<(i64, i64), Vec<usize>> = FxHashMap::default();
    for (idx, p) in positions.iter().enumerate() {
        let key = (
            (p.x * 1000.0).round() as i64,
            (p.z * 1000.0).round() as i64,
        );
        by_column.entry(key).or_default().push(idx);
    }
    let dx = delta * metrics.spacing_x;
    for indices in by_column.values_mut() {
        indices.sort_by(|&a, &b| positions[a].y.total_cmp(&positions[b].y));
        for (order, &idx) in indices.iter().enumerate() {
            if order > 0 {
                let sign = if order % 2 == 1 { 1.0 } else { -1.0 };
                positions[idx].x += sign * dx;
            }
        }
    }
}

/// One random (dx, dz) per layer, drawn on first encounter in position order.
fn apply_layer_jitter(positions: &mut [Vec3], amount: f64, seed: u32, metrics: &TileMetrics) {
    let safe_x = amount.min(metrics.max_safe_jitter_x());
    let safe_z = amount.min(metrics.max_safe_jitter_z());
    let mut rng = Mulberry32::for_purpose(seed, Purpose::Jitter);
    let mut by_layer: FxHashMap<i32, (f64, f64)> = FxHashMap::default();
    for p in positions.iter() {
        let layer = metrics.layer_of(p.y);
        by_layer.entry(layer).or_insert_with(|| {
            (
                rng.next_signed() * safe_x * metrics.spacing_x,
                rng.next_signed() * safe_z * metrics.spacing_z,
            )
        });
    }
    for p in positions.iter_mut() {
        let (jx, jz) = by_layer[&metrics.layer_of(p.y)];
        p.x += jx;
        p.z += jz;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settle::{has_layer_overlap, is_fully_supported};

    fn m() -> TileMetrics {
        TileMetrics::default()
    }

    fn six_layer_tower(metrics: &TileMetrics) -> Vec<Vec3> {
        (0..6).map(|l| Vec3::new(0.0, metrics.layer_y(l), 0.0)).collect()
    }

    fn plain_config() -> TransformConfig {
        TransformConfig {
            random_quarter_turns: false,
            stagger_triad_x: false,
            stagger_triad_z: false,
            legacy_column_stagger: false,
            strict_no_overlap: false,
            ..TransformConfig::default()
        }
    }

    #[test]
    fn test_mirror_x_flips_sign() {
        let metrics = m();
        let config = TransformConfig {
            mirror_x: true,
            ..plain_config()
        };
        let input = vec![Vec3::new(2.24, metrics.base_center_y(), 1.52)];
        let out = apply(input, &config, 1, &metrics);
        assert!((out[0].x + 2.24).abs() < 1e-9);
        assert!((out[0].z - 1.52).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_180_flips_both_axes() {
        let metrics = m();
        let config = TransformConfig {
            rotate_180: true,
            ..plain_config()
        };
        let input = vec![Vec3::new(1.12, metrics.base_center_y(), -1.52)];
        let out = apply(input, &config, 1, &metrics);
        assert!((out[0].x + 1.12).abs() < 1e-9);
        assert!((out[0].z - 1.52).abs() < 1e-9);
    }

    #[test]
    fn test_quarter_turn_choice_is_seeded() {
        let metrics = m();
        let config = TransformConfig {
            random_quarter_turns: true,
            ..plain_config()
        };
        let input = vec![Vec3::new(1.12, metrics.base_center_y(), 3.04)];
        let a = apply(input.clone(), &config, 77, &metrics);
        let b = apply(input, &config, 77, &metrics);
        assert_eq!(a, b);
    }

    #[test]
    fn test_triad_stagger_mod3_classes() {
        let metrics = m();
        let config = TransformConfig {
            stagger_triad_x: true,
            stagger_amount_x: 0.33,
            stagger_triad_z: false,
            snap_down: false,
            ..plain_config()
        };
        let out = apply(six_layer_tower(&metrics), &config, 1, &metrics);
        let step = 0.33 * metrics.spacing_x;
        // layers 0,3 share offset -step; 1,4 share 0; 2,5 share +step
        for (layer, p) in out.iter().enumerate() {
            let expected = ((layer % 3) as f64 - 1.0) * step;
            assert!(
                (p.x - expected).abs() < 1e-9,
                "layer {layer}: x {} != {expected}",
                p.x
            );
        }
        assert!((out[0].x - out[3].x).abs() < 1e-9);
        assert!((out[1].x - out[4].x).abs() < 1e-9);
        assert!((out[2].x - out[5].x).abs() < 1e-9);
    }

    #[test]
    fn test_column_stagger_alternates_above_base() {
        let metrics = m();
        let config = TransformConfig {
            legacy_column_stagger: true,
            legacy_stagger_delta: 0.1,
            stagger_triad_x: false,
            stagger_triad_z: false,
            snap_down: false,
            strict_no_overlap: false,
            random_quarter_turns: false,
            ..TransformConfig::default()
        };
        let out = apply(six_layer_tower(&metrics), &config, 1, &metrics);
        let dx = 0.1 * metrics.spacing_x;
        assert!((out[0].x).abs() < 1e-9, "bottom tile must stay");
        assert!((out[1].x - dx).abs() < 1e-9);
        assert!((out[2].x + dx).abs() < 1e-9);
    }

    #[test]
    fn test_jitter_is_clamped_to_safe_bound() {
        let metrics = m();
        let config = TransformConfig {
            jitter_enabled: true,
            jitter_amount: 10.0, // absurd request
            snap_down: false,
            ..plain_config()
        };
        let input = six_layer_tower(&metrics);
        let out = apply(input.clone(), &config, 9, &metrics);
        let max_dx = metrics.max_safe_jitter_x() * metrics.spacing_x;
        let max_dz = metrics.max_safe_jitter_z() * metrics.spacing_z;
        for (before, after) in input.iter().zip(&out) {
            assert!((after.x - before.x).abs() <= max_dx + 1e-9);
            assert!((after.z - before.z).abs() <= max_dz + 1e-9);
        }
    }

    #[test]
    fn test_strict_mode_yields_legal_layout() {
        let metrics = m();
        let config = TransformConfig::default();
        // Deliberately dirty input: duplicates and floaters.
        let mut input = six_layer_tower(&metrics);
        input.push(Vec3::new(0.0, metrics.layer_y(0), 0.0));
        input.push(Vec3::new(metrics.spacing_x * 5.0, metrics.layer_y(9), 0.0));
        let out = apply(input, &config, 98597, &metrics);
        assert!(!has_layer_overlap(&out, &metrics));
        assert!(is_fully_supported(&out, &metrics));
    }

    #[test]
    fn test_pipeline_deterministic() {
        let metrics = m();
        let config = TransformConfig::default();
        let input = six_layer_tower(&metrics);
        let a = apply(input.clone(), &config, 4242, &metrics);
        let b = apply(input, &config, 4242, &metrics);
        assert_eq!(a, b);
    }
}
