//! Compiles ASCII layer masks into 3D tile positions.
//!
//! A mask is a block of character rows where any non-space character marks an
//! occupied cell. Rows are right-padded to the widest row before scanning, and
//! the whole block is centered on the origin. Fractional offsets (in units of
//! grid spacing) shift a layer off the exact grid, which the procedural
//! generator uses to break perfect vertical alignment between layers.

use rustc_hash::FxHashSet;

use crate::geometry::{TileMetrics, Vec3};

/// One mask layer: rows of characters plus the layer it compiles onto.
#[derive(Debug, Clone)]
pub struct LayerMask {
    pub layer: i32,
    pub rows: Vec<String>,
    /// Lateral offsets in units of `spacing_x` / `spacing_z`.
    pub offset_x: f64,
    pub offset_z: f64,
}

impl LayerMask {
    pub fn new(layer: i32, rows: &[&str]) -> Self {
        Self {
            layer,
            rows: rows.iter().map(|r| r.to_string()).collect(),
            offset_x: 0.0,
            offset_z: 0.0,
        }
    }

    pub fn with_offsets(mut self, offset_x: f64, offset_z: f64) -> Self {
        self.offset_x = offset_x;
        self.offset_z = offset_z;
        self
    }

    /// Number of occupied cells in this mask.
    pub fn cell_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.chars().filter(|&c| c != ' ').count())
            .sum()
    }
}

/// A non-fatal irregularity detected while building a layout.
///
/// Diagnostics are surfaced, never thrown: downstream settling repairs
/// duplicates, and a wrong count only means an unusual board size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Total compiled position count differs from the expected board size.
    CountMismatch { expected: usize, actual: usize },
    /// Two positions compiled to the same point (4-decimal precision).
    DuplicatePosition { key: String },
    /// Solvable assignment exhausted its retries and fell back to an
    /// unconstrained pairing.
    AssignmentFallback { attempts: usize },
    /// A build produced zero positions; a sentinel slot was substituted.
    EmptyLayout,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::CountMismatch { expected, actual } => {
                write!(f, "layout count != {expected}, got {actual}")
            }
            Diagnostic::DuplicatePosition { key } => {
                write!(f, "duplicate tile position at {key}")
            }
            Diagnostic::AssignmentFallback { attempts } => write!(
                f,
                "solvable assignment failed after {attempts} attempts; using fallback pairing"
            ),
            Diagnostic::EmptyLayout => write!(f, "no positions generated; sentinel slot spawned"),
        }
    }
}

/// Compiles one mask layer into positions.
///
/// `x = -((cols - 1) / 2) * spacing_x + offset_x * spacing_x + col * spacing_x`
/// and the z analog; `y = height / 2 + layer * layer_step`.
pub fn positions_from_mask(mask: &LayerMask, metrics: &TileMetrics) -> Vec<Vec3> {
    if mask.rows.is_empty() {
        return Vec::new();
    }
    let cols = mask.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let y = metrics.layer_y(mask.layer);
    let x_start = -((cols as f64 - 1.0) / 2.0) * metrics.spacing_x + mask.offset_x * metrics.spacing_x;
    let z_start =
        -((mask.rows.len() as f64 - 1.0) / 2.0) * metrics.spacing_z + mask.offset_z * metrics.spacing_z;

    let mut positions = Vec::new();
    for (row_idx, row) in mask.rows.iter().enumerate() {
        let mut chars: Vec<char> = row.chars().collect();
        chars.resize(cols, ' ');
        for (col_idx, &c) in chars.iter().enumerate() {
            if c != ' ' {
                positions.push(Vec3::new(
                    x_start + col_idx as f64 * metrics.spacing_x,
                    y,
                    z_start + row_idx as f64 * metrics.spacing_z,
                ));
            }
        }
    }
    positions
}

/// Compiles a stack of mask layers into one flat position list.
pub fn flatten_masks(masks: &[LayerMask], metrics: &TileMetrics) -> Vec<Vec3> {
    masks
        .iter()
        .flat_map(|mask| positions_from_mask(mask, metrics))
        .collect()
}

/// Checks a position list against the expected board size and for duplicates.
///
/// Both findings are diagnostics only; the positions are returned untouched
/// because overlap resolution repairs duplicates later in the pipeline.
pub fn validate_positions(positions: &[Vec3], expected: usize, out: &mut Vec<Diagnostic>) {
    if positions.len() != expected {
        out.push(Diagnostic::CountMismatch {
            expected,
            actual: positions.len(),
        });
    }
    let mut seen: FxHashSet<String> = FxHashSet::default();
    for p in positions {
        let key = format!("{:.4}|{:.4}|{:.4}", p.x, p.y, p.z);
        if !seen.insert(key.clone()) {
            out.push(Diagnostic::DuplicatePosition { key });
        }
    }
}
