//! Board assembly: masks to transformed positions to value-bearing slots.
//!
//! Two build paths share the slot representation. The mahjong path compiles a
//! layout preset, legalizes it through the transform pipeline, and pairs flag
//! codes so the board stays clearable. The piles path stands up five
//! continent-track columns fed from a balanced pool plus a single hand tile in
//! front of them. Both are pure functions of a [`BoardConfig`].

use serde::{Deserialize, Serialize};

use crate::assign::{self, build_solvable_assignment};
use crate::countries::{all_codes, continent_of, Continent};
use crate::geometry::{TileMetrics, Vec3};
use crate::layouts::{Preset, BOARD_SIZE};
use crate::mask::{flatten_masks, validate_positions, Diagnostic};
use crate::pool::{build_balanced_pool, DEFAULT_QUOTA};
use crate::rng::{sub_seed, Mulberry32, Purpose};
use crate::transform::{self, TransformConfig};

/// Pile gap as a multiple of `spacing_x`.
const PILE_GAP_FACTOR: f64 = 1.3;
/// Hand tile distance in front of the piles, as a multiple of tile depth.
const HAND_Z_FACTOR: f64 = 2.2;
/// Lateral tolerance for pile membership, as a multiple of spacing.
const PILE_CAPTURE_FACTOR: f64 = 0.6;
/// Code used for the sentinel slot when a build produces nothing.
const SENTINEL_CODE: &str = "un";

/// Everything a board build depends on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub seed: u32,
    /// Forced preset; `None` auto-picks from the seed.
    pub preset: Option<Preset>,
    pub transform: TransformConfig,
    pub metrics: TileMetrics,
    /// Expected mahjong tile count; deviations are diagnosed, not rejected.
    pub expected_count: usize,
    pub pile_count: usize,
    pub pile_levels: usize,
    /// Countries drawn per continent for the pile pool.
    pub continent_quota: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            seed: 98597,
            preset: None,
            transform: TransformConfig::default(),
            metrics: TileMetrics::default(),
            expected_count: BOARD_SIZE,
            pile_count: Continent::ALL.len(),
            pile_levels: 10,
            continent_quota: DEFAULT_QUOTA,
        }
    }
}

impl BoardConfig {
    /// Panics on parameter combinations no caller should ever produce.
    fn validate(&self) {
        assert!(self.pile_count > 0, "pile_count must be positive");
        assert!(self.pile_levels > 0, "pile_levels must be positive");
        assert!(self.continent_quota > 0, "continent_quota must be positive");
    }
}

/// One placed tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileSlot {
    pub position: Vec3,
    /// ISO 3166-1 alpha-2 country code.
    pub code: &'static str,
}

impl TileSlot {
    pub fn continent(&self) -> Continent {
        continent_of(self.code)
    }
}

/// A fully built board.
#[derive(Debug, Clone)]
pub struct Board {
    pub seed: u32,
    pub preset: Option<Preset>,
    pub slots: Vec<TileSlot>,
    /// The tile in front of the piles; `None` on mahjong boards.
    pub hand: Option<TileSlot>,
    /// Pile center x coordinates; empty on mahjong boards.
    pub anchors: Vec<f64>,
    /// Pair removal order witnessing solvability, when one was found.
    pub removal_order: Option<Vec<(usize, usize)>>,
    pub diagnostics: Vec<Diagnostic>,
    pub metrics: TileMetrics,
}

/// Builds a mahjong board: preset masks, transform pipeline, solvable pairs.
pub fn build_board(config: &BoardConfig) -> Board {
    config.validate();
    let mut diagnostics = Vec::new();
    let preset = config.preset.unwrap_or_else(|| Preset::pick(config.seed));
    let masks = preset.masks(config.seed);
    let positions = flatten_masks(&masks, &config.metrics);

    if positions.is_empty() {
        diagnostics.push(Diagnostic::EmptyLayout);
        return Board {
            seed: config.seed,
            preset: Some(preset),
            slots: vec![sentinel_slot(&config.metrics)],
            hand: None,
            anchors: Vec::new(),
            removal_order: None,
            diagnostics,
            metrics: config.metrics,
        };
    }

    validate_positions(&positions, config.expected_count, &mut diagnostics);
    let mut positions = transform::apply(positions, &config.transform, config.seed, &config.metrics);
    if positions.len() % 2 == 1 {
        // pairing needs an even count; the count mismatch is already diagnosed
        positions.pop();
    }

    let assignment = build_solvable_assignment(
        &positions,
        &all_codes(),
        config.seed,
        &config.metrics,
        &mut diagnostics,
    );
    let slots = positions
        .iter()
        .zip(assignment.values)
        .map(|(&position, code)| TileSlot { position, code })
        .collect();

    Board {
        seed: config.seed,
        preset: Some(preset),
        slots,
        hand: None,
        anchors: Vec::new(),
        removal_order: assignment.removal_order,
        diagnostics,
        metrics: config.metrics,
    }
}

/// Pile center x coordinates, centered around the origin.
pub fn pile_anchors(config: &BoardConfig) -> Vec<f64> {
    let gap = config.metrics.spacing_x * PILE_GAP_FACTOR;
    let half = (config.pile_count as f64 - 1.0) / 2.0;
    (0..config.pile_count)
        .map(|i| (i as f64 - half) * gap)
        .collect()
}

/// Builds a piles board: stacked columns from a balanced pool plus a hand.
///
/// Slot order is shuffled so the pool lands scattered rather than filling one
/// pile at a time. The hand is drawn from the codes the pool did not use, so
/// it never duplicates a pile tile.
pub fn build_piles(config: &BoardConfig) -> Board {
    config.validate();
    let mut diagnostics = Vec::new();
    let metrics = &config.metrics;
    let anchors = pile_anchors(config);

    let pool = build_balanced_pool(config.seed, config.continent_quota);
    if pool.is_empty() {
        diagnostics.push(Diagnostic::EmptyLayout);
        return Board {
            seed: config.seed,
            preset: None,
            slots: vec![sentinel_slot(metrics)],
            hand: None,
            anchors,
            removal_order: None,
            diagnostics,
            metrics: config.metrics,
        };
    }

    let mut slots: Vec<TileSlot> = Vec::with_capacity(config.pile_count * config.pile_levels);
    for &x in &anchors {
        for level in 0..config.pile_levels {
            slots.push(TileSlot {
                position: Vec3::new(x, metrics.layer_y(level as i32), 0.0),
                code: SENTINEL_CODE,
            });
        }
    }
    let mut order: Vec<usize> = (0..slots.len()).collect();
    Mulberry32::for_purpose(config.seed, Purpose::SlotOrder).shuffle(&mut order);
    for (k, &slot_idx) in order.iter().enumerate() {
        slots[slot_idx].code = pool[k % pool.len()];
    }

    let hand = TileSlot {
        position: Vec3::new(0.0, metrics.base_center_y(), metrics.depth * HAND_Z_FACTOR),
        code: pick_hand_code(config.seed, &pool),
    };

    Board {
        seed: config.seed,
        preset: None,
        slots,
        hand: Some(hand),
        anchors,
        removal_order: None,
        diagnostics,
        metrics: config.metrics,
    }
}

/// Rebuilds the piles for the next level under a derived seed, so advancing
/// never replays the layout just cleared.
pub fn repopulate_piles(config: &BoardConfig) -> Board {
    let mut next = config.clone();
    next.seed = sub_seed(config.seed, Purpose::Repopulate);
    build_piles(&next)
}

fn sentinel_slot(metrics: &TileMetrics) -> TileSlot {
    TileSlot {
        position: Vec3::new(0.0, metrics.base_center_y(), 0.0),
        code: SENTINEL_CODE,
    }
}

/// Seeded pick from the codes absent from the pool. Falls back to the full
/// alphabet if the pool consumed everything.
fn pick_hand_code(seed: u32, pool: &[&'static str]) -> &'static str {
    let mut rng = Mulberry32::for_purpose(seed, Purpose::HandPick);
    let remaining: Vec<&'static str> = all_codes()
        .into_iter()
        .filter(|c| !pool.contains(c))
        .collect();
    if remaining.is_empty() {
        let codes = all_codes();
        codes[rng.next_index(codes.len())]
    } else {
        remaining[rng.next_index(remaining.len())]
    }
}

impl Board {
    fn positions(&self) -> Vec<Vec3> {
        self.slots.iter().map(|s| s.position).collect()
    }

    /// Whether the slot at `index` is pickable under Mahjong rules.
    pub fn is_free(&self, index: usize) -> bool {
        let positions = self.positions();
        let alive = vec![true; positions.len()];
        assign::is_free(index, &positions, &alive, &self.metrics)
    }

    /// Slot indices belonging to the given pile, bottom to top.
    pub fn pile_members(&self, pile: usize) -> Vec<usize> {
        let Some(&anchor) = self.anchors.get(pile) else {
            return Vec::new();
        };
        let dx = self.metrics.spacing_x * PILE_CAPTURE_FACTOR;
        let dz = self.metrics.spacing_z * PILE_CAPTURE_FACTOR;
        let mut members: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, s)| {
                (s.position.x - anchor).abs() <= dx && s.position.z.abs() <= dz
            })
            .map(|(i, _)| i)
            .collect();
        members.sort_by(|&a, &b| self.slots[a].position.y.total_cmp(&self.slots[b].position.y));
        members
    }

    /// Dominant continent of a pile and its share in whole percent.
    ///
    /// Unknown codes are ignored for the majority but still count toward the
    /// total, so a pile of unclassifiable tiles scores zero. Empty piles
    /// return `None`.
    pub fn pile_purity(&self, pile: usize) -> Option<(Continent, u8)> {
        let members = self.pile_members(pile);
        if members.is_empty() {
            return None;
        }
        let total = members.len();
        let mut best = (Continent::Unknown, 0usize);
        for continent in Continent::ALL {
            let n = members
                .iter()
                .filter(|&&i| self.slots[i].continent() == continent)
                .count();
            if n > best.1 {
                best = (continent, n);
            }
        }
        let percent = if best.1 > 0 {
            ((best.1 as f64 / total as f64) * 100.0).round() as u8
        } else {
            0
        };
        Some((best.0, percent))
    }

    /// Whether every pile is single-continent. The level-advance condition.
    pub fn all_piles_pure(&self) -> bool {
        if self.anchors.is_empty() {
            return false;
        }
        (0..self.anchors.len()).all(|pile| {
            matches!(self.pile_purity(pile), Some((c, 100)) if c != Continent::Unknown)
        })
    }

    /// The pile interaction as a pure state transition.
    ///
    /// The hand tile slides under the pile, every pile tile rises one level,
    /// and the previous top tile becomes the new hand. Returns `None` when
    /// there is no hand or the pile is empty.
    pub fn swap_hand(&self, pile: usize) -> Option<Board> {
        let hand = self.hand?;
        let members = self.pile_members(pile);
        let &top = members.last()?;
        let anchor = self.anchors[pile];

        let mut next = self.clone();
        for &i in &members {
            if i != top {
                next.slots[i].position.y += self.metrics.layer_step;
            }
        }
        next.hand = Some(TileSlot {
            position: hand.position,
            code: self.slots[top].code,
        });
        next.slots[top] = TileSlot {
            position: Vec3::new(anchor, self.metrics.layer_y(0), 0.0),
            code: hand.code,
        };
        Some(next)
    }
}
