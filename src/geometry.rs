//! Board-space geometry: positions, tile metrics, footprint tests.
//!
//! Heights are quantized to discrete layers: a tile's center sits at
//! `height / 2 + layer * layer_step`. All overlap and stacking rules reduce to
//! axis-aligned interval tests in x/z plus a layer comparison in y.

use serde::{Deserialize, Serialize};

/// Tolerance for support-height and footprint comparisons, in world units.
pub const EPS: f64 = 1e-3;

/// A tile center position in continuous board space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Physical tile dimensions and grid spacing.
///
/// `width`/`depth` are the tile footprint; `spacing_x`/`spacing_z` are the
/// center-to-center grid steps (slightly larger than the footprint so
/// neighbors have a visible gap); `layer_step` is the vertical rise per layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TileMetrics {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub spacing_x: f64,
    pub spacing_z: f64,
    pub layer_step: f64,
}

impl Default for TileMetrics {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 0.35,
            depth: 1.4,
            spacing_x: 1.12,
            spacing_z: 1.52,
            layer_step: 0.35,
        }
    }
}

impl TileMetrics {
    /// Center height of a tile resting on the base (layer 0).
    pub fn base_center_y(&self) -> f64 {
        self.height * 0.5
    }

    /// Center height of a tile at the given layer index.
    pub fn layer_y(&self, layer: i32) -> f64 {
        self.base_center_y() + layer as f64 * self.layer_step
    }

    /// Quantizes a center height back to its layer index.
    pub fn layer_of(&self, y: f64) -> i32 {
        ((y - self.base_center_y()) / self.layer_step).round() as i32
    }

    /// Whether two positions' grid cells overlap in both x and z.
    ///
    /// Uses spacing half-extents, so this is the coarse "same column family"
    /// test that stacking and blocked-above checks rely on.
    pub fn columns_overlap(&self, a: Vec3, b: Vec3) -> bool {
        (a.x - b.x).abs() <= self.spacing_x * 0.5 + EPS
            && (a.z - b.z).abs() <= self.spacing_z * 0.5 + EPS
    }

    /// Whether two tiles' physical footprints interpenetrate in the x/z plane.
    ///
    /// Strict inequality against the summed half-extents: tiles exactly
    /// touching do not count as overlapping.
    pub fn footprints_overlap(&self, a: Vec3, b: Vec3) -> bool {
        (a.x - b.x).abs() < self.width && (a.z - b.z).abs() < self.depth
    }

    /// Largest jitter fraction (of spacing) that cannot cause in-layer overlap.
    pub fn max_safe_jitter_x(&self) -> f64 {
        ((self.spacing_x - self.width) / (2.0 * self.spacing_x)).max(0.0)
    }

    /// Z analog of [`max_safe_jitter_x`](Self::max_safe_jitter_x).
    pub fn max_safe_jitter_z(&self) -> f64 {
        ((self.spacing_z - self.depth) / (2.0 * self.spacing_z)).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_roundtrip() {
        let m = TileMetrics::default();
        for layer in 0..12 {
            assert_eq!(m.layer_of(m.layer_y(layer)), layer);
        }
    }

    #[test]
    fn test_layer_of_tolerates_drift() {
        let m = TileMetrics::default();
        let y = m.layer_y(4) + 0.4 * m.layer_step;
        assert_eq!(m.layer_of(y), 4);
    }

    #[test]
    fn test_footprint_overlap_strictness() {
        let m = TileMetrics::default();
        let a = Vec3::new(0.0, 0.175, 0.0);
        // Exactly touching along x: not overlapping.
        let touching = Vec3::new(m.width, 0.175, 0.0);
        assert!(!m.footprints_overlap(a, touching));
        let inside = Vec3::new(m.width - 0.01, 0.175, 0.0);
        assert!(m.footprints_overlap(a, inside));
    }

    #[test]
    fn test_grid_neighbors_are_distinct_columns() {
        let m = TileMetrics::default();
        let a = Vec3::new(0.0, 0.175, 0.0);
        let bx = Vec3::new(m.spacing_x, 0.175, 0.0);
        let bz = Vec3::new(0.0, 0.175, m.spacing_z);
        assert!(!m.footprints_overlap(a, bx));
        assert!(!m.footprints_overlap(a, bz));
        assert!(!m.columns_overlap(a, bx));
        assert!(!m.columns_overlap(a, bz));
    }

    #[test]
    fn test_half_step_offsets_share_columns() {
        // A tile offset half a cell still belongs to both neighboring column
        // families, which is what makes cross-layer stacking catch it.
        let m = TileMetrics::default();
        let a = Vec3::new(0.0, 0.175, 0.0);
        let b = Vec3::new(m.spacing_x * 0.5, 0.525, 0.0);
        assert!(m.columns_overlap(a, b));
    }

    #[test]
    fn test_safe_jitter_bounds() {
        let m = TileMetrics::default();
        let jx = m.max_safe_jitter_x();
        let jz = m.max_safe_jitter_z();
        assert!(jx > 0.0 && jz > 0.0);
        // Two neighbors jittered maximally toward each other touch at most,
        // never interpenetrate.
        let a = Vec3::new(jx * m.spacing_x, 0.175, 0.0);
        let b = Vec3::new(m.spacing_x - jx * m.spacing_x, 0.175, 0.0);
        assert!(!m.footprints_overlap(a, b));
    }
}
