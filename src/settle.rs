//! Overlap resolution and gravity settling.
//!
//! Two passes keep an arrangement legal: `snap_down` makes every tile rest on
//! the base or on a tile below it (no floating, no gaps inside a stack), and
//! `resolve_in_layer_overlaps` pushes laterally interpenetrating tiles apart.
//! Repulsion can change which tiles support which, so settling must always be
//! re-run after it.

use rustc_hash::FxHashMap;

use crate::geometry::{TileMetrics, Vec3, EPS};

/// Iteration cap for the pairwise repulsion relaxation.
///
/// A bounded-effort guarantee, not a convergence proof: with the default
/// spacing margins the relaxation settles in one or two rounds, and the cap
/// only matters for adversarial jitter. Residual overlap past the cap is
/// accepted.
const MAX_RESOLVE_ITERATIONS: usize = 6;

/// Drops every tile onto its support: the base, or the highest tile below it
/// whose grid cell overlaps its own.
///
/// Returns positions sorted ascending by height. After this pass no tile
/// floats and every stack is gap-free from the ground up.
pub fn snap_down(positions: &[Vec3], metrics: &TileMetrics) -> Vec<Vec3> {
    if positions.is_empty() {
        return Vec::new();
    }
    let mut tiles: Vec<Vec3> = positions.to_vec();
    tiles.sort_by(|a, b| a.y.total_cmp(&b.y));

    let mut changed = false;
    for i in 0..tiles.len() {
        let mut support = metrics.base_center_y();
        for j in 0..i {
            if metrics.columns_overlap(tiles[i], tiles[j]) {
                let candidate = tiles[j].y + metrics.layer_step;
                if candidate > support {
                    support = candidate;
                }
            }
        }
        if (tiles[i].y - support).abs() > EPS {
            tiles[i].y = support;
            changed = true;
        }
    }
    if changed {
        tiles.sort_by(|a, b| a.y.total_cmp(&b.y));
    }
    tiles
}

/// Pushes overlapping same-layer pairs apart along the axis of lesser
/// penetration, half the overlap each way plus a hair of separation.
///
/// Discrete relaxation with a fixed iteration cap per layer; see
/// [`MAX_RESOLVE_ITERATIONS`].
pub fn resolve_in_layer_overlaps(positions: &mut [Vec3], metrics: &TileMetrics) {
    if positions.is_empty() {
        return;
    }
    let mut by_layer: FxHashMap<i32, Vec<usize>> = FxHashMap::default();
    for (idx, p) in positions.iter().enumerate() {
        by_layer.entry(metrics.layer_of(p.y)).or_default().push(idx);
    }

    for indices in by_layer.values() {
        for _ in 0..MAX_RESOLVE_ITERATIONS {
            let mut moved = false;
            for a_pos in 0..indices.len() {
                for b_pos in a_pos + 1..indices.len() {
                    let (ia, ib) = (indices[a_pos], indices[b_pos]);
                    let dx = positions[ib].x - positions[ia].x;
                    let dz = positions[ib].z - positions[ia].z;
                    let overlap_x = metrics.width - dx.abs();
                    let overlap_z = metrics.depth - dz.abs();
                    if overlap_x > 0.0 && overlap_z > 0.0 {
                        if overlap_x < overlap_z {
                            let push = overlap_x / 2.0 + 1e-4;
                            let sign = if dx >= 0.0 { 1.0 } else { -1.0 };
                            positions[ia].x -= sign * push;
                            positions[ib].x += sign * push;
                        } else {
                            let push = overlap_z / 2.0 + 1e-4;
                            let sign = if dz >= 0.0 { 1.0 } else { -1.0 };
                            positions[ia].z -= sign * push;
                            positions[ib].z += sign * push;
                        }
                        moved = true;
                    }
                }
            }
            if !moved {
                break;
            }
        }
    }
}

/// Whether any two same-layer tiles' footprints interpenetrate.
pub fn has_layer_overlap(positions: &[Vec3], metrics: &TileMetrics) -> bool {
    let mut by_layer: FxHashMap<i32, Vec<Vec3>> = FxHashMap::default();
    for &p in positions {
        by_layer.entry(metrics.layer_of(p.y)).or_default().push(p);
    }
    for tiles in by_layer.values() {
        for i in 0..tiles.len() {
            for j in i + 1..tiles.len() {
                if metrics.footprints_overlap(tiles[i], tiles[j]) {
                    return true;
                }
            }
        }
    }
    false
}

/// Whether two tiles share a footprint column on the same layer.
///
/// Settling makes this impossible: a later-settled tile over an occupied
/// column always lands one step higher.
pub fn has_column_conflict(positions: &[Vec3], metrics: &TileMetrics) -> bool {
    let mut by_layer: FxHashMap<i32, Vec<Vec3>> = FxHashMap::default();
    for &p in positions {
        by_layer.entry(metrics.layer_of(p.y)).or_default().push(p);
    }
    for tiles in by_layer.values() {
        for i in 0..tiles.len() {
            for j in i + 1..tiles.len() {
                if metrics.columns_overlap(tiles[i], tiles[j]) {
                    return true;
                }
            }
        }
    }
    false
}

/// Whether every tile above layer 0 has a supporting tile one layer step
/// directly beneath its grid cell.
pub fn is_fully_supported(positions: &[Vec3], metrics: &TileMetrics) -> bool {
    for &p in positions {
        if metrics.layer_of(p.y) == 0 {
            continue;
        }
        let supported = positions.iter().any(|&q| {
            metrics.columns_overlap(p, q) && (p.y - q.y - metrics.layer_step).abs() <= EPS
        });
        if !supported {
            return false;
        }
    }
    true
}
