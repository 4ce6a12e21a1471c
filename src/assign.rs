//! Solvable pairing of values onto legalized positions.
//!
//! A position is *free* under Mahjong solitaire rules when nothing rests on
//! its footprint column at a higher layer and at least one of its two lateral
//! long-side neighbors is gone. The assignment is built greedily in removal
//! order: at each step two currently-free positions receive the next paired
//! value and are removed from consideration, so a successful construction is,
//! by itself, a witness that the whole board can be cleared.

use crate::geometry::{TileMetrics, Vec3, EPS};
use crate::mask::Diagnostic;
use crate::rng::{sub_seed_indexed, Mulberry32, Purpose};

/// Attempt cap before giving up on a solvable construction.
const MAX_ATTEMPTS: usize = 30;

/// Result of pairing values onto positions.
#[derive(Debug, Clone)]
pub struct Assignment {
    /// One value per position, equal values forming pairs.
    pub values: Vec<&'static str>,
    /// Pair removal order witnessing solvability, or `None` when the
    /// unconstrained fallback was used.
    pub removal_order: Option<Vec<(usize, usize)>>,
}

/// Mahjong accessibility predicate over an explicit alive-set.
///
/// `alive[i]` marks positions still on the board; `index` itself must be
/// alive. Exposed for pick/hover logic so geometry rules live in one place.
pub fn is_free(index: usize, positions: &[Vec3], alive: &[bool], metrics: &TileMetrics) -> bool {
    let p = positions[index];

    // blocked from above?
    for (j, &q) in positions.iter().enumerate() {
        if j == index || !alive[j] {
            continue;
        }
        if q.y + EPS >= p.y + metrics.layer_step - EPS && metrics.columns_overlap(p, q) {
            return false;
        }
    }

    // both long sides occupied?
    let same_layer_tol = metrics.layer_step * 0.25;
    let half_z = metrics.spacing_z * 0.5;
    let mut has_left = false;
    let mut has_right = false;
    for (j, &q) in positions.iter().enumerate() {
        if j == index || !alive[j] {
            continue;
        }
        if (q.y - p.y).abs() > same_layer_tol || (p.z - q.z).abs() > half_z {
            continue;
        }
        let dx = (p.x - q.x).abs();
        if dx <= metrics.spacing_x + EPS {
            if q.x < p.x {
                has_left = true;
            } else if q.x > p.x {
                has_right = true;
            }
        }
        if has_left && has_right {
            break;
        }
    }
    !(has_left && has_right)
}

/// Assigns paired values to positions so the board is clearable.
///
/// Greedy with bounded retries; every attempt derives a fresh sub-seed so
/// attempts are independent and individually reproducible. On exhaustion the
/// unconstrained fallback pairing is used and a diagnostic is recorded; the
/// degraded board may be unsolvable, by design.
///
/// The position count must be even; an odd count is caller misuse.
pub fn build_solvable_assignment(
    positions: &[Vec3],
    alphabet: &[&'static str],
    seed: u32,
    metrics: &TileMetrics,
    diagnostics: &mut Vec<Diagnostic>,
) -> Assignment {
    let n = positions.len();
    assert!(n % 2 == 0, "pair assignment requires an even position count");
    assert!(!alphabet.is_empty(), "pair assignment requires a value alphabet");
    let pair_count = n / 2;

    // Pool of pair values: shuffled alphabet, repeated if the board has more
    // pairs than the alphabet has values.
    let mut pool: Vec<&'static str> = alphabet.to_vec();
    Mulberry32::for_purpose(seed, Purpose::PairPool).shuffle(&mut pool);
    let pair_values: Vec<&'static str> =
        (0..pair_count).map(|i| pool[i % pool.len()]).collect();

    for attempt in 0..MAX_ATTEMPTS {
        let mut rng = Mulberry32::new(sub_seed_indexed(seed, Purpose::PairAssignment, attempt as u32));
        if let Some(assignment) = try_assignment(positions, &pair_values, &mut rng, metrics) {
            return assignment;
        }
    }

    diagnostics.push(Diagnostic::AssignmentFallback {
        attempts: MAX_ATTEMPTS,
    });
    fallback_assignment(n, &pair_values, seed)
}

/// One greedy construction pass. Fails when fewer than two positions are
/// simultaneously free.
fn try_assignment(
    positions: &[Vec3],
    pair_values: &[&'static str],
    rng: &mut Mulberry32,
    metrics: &TileMetrics,
) -> Option<Assignment> {
    let n = positions.len();
    let mut values: Vec<Option<&'static str>> = vec![None; n];
    let mut alive = vec![true; n];
    let mut order = Vec::with_capacity(pair_values.len());

    for &value in pair_values {
        let free: Vec<usize> = (0..n)
            .filter(|&i| alive[i] && is_free(i, positions, &alive, metrics))
            .collect();
        if free.len() < 2 {
            return None;
        }
        let a = free[rng.next_index(free.len())];
        let mut b = a;
        for _ in 0..10 {
            b = free[rng.next_index(free.len())];
            if b != a {
                break;
            }
        }
        if b == a {
            return None;
        }
        values[a] = Some(value);
        values[b] = Some(value);
        alive[a] = false;
        alive[b] = false;
        order.push((a, b));
    }

    Some(Assignment {
        values: values.into_iter().map(|v| v.expect("all positions paired")).collect(),
        removal_order: Some(order),
    })
}

/// Unconstrained random pairing: correct multiset of values, no solvability
/// promise. Deterministic, unlike a wall-clock reseed, so degraded boards can
/// still be reproduced from their seed.
fn fallback_assignment(n: usize, pair_values: &[&'static str], seed: u32) -> Assignment {
    let mut doubled: Vec<&'static str> = Vec::with_capacity(n);
    for &value in pair_values {
        doubled.push(value);
        doubled.push(value);
    }
    let mut rng = Mulberry32::new(sub_seed_indexed(
        seed,
        Purpose::PairAssignment,
        MAX_ATTEMPTS as u32,
    ));
    rng.shuffle(&mut doubled);
    Assignment {
        values: doubled,
        removal_order: None,
    }
}

/// Replays a removal order against the accessibility predicate.
///
/// Valid iff every pair is simultaneously free at its removal step and every
/// position is removed exactly once.
pub fn verify_removal_order(
    positions: &[Vec3],
    order: &[(usize, usize)],
    metrics: &TileMetrics,
) -> bool {
    let mut alive = vec![true; positions.len()];
    for &(a, b) in order {
        if a == b || !alive[a] || !alive[b] {
            return false;
        }
        if !is_free(a, positions, &alive, metrics) || !is_free(b, positions, &alive, metrics) {
            return false;
        }
        alive[a] = false;
        alive[b] = false;
    }
    alive.iter().all(|&x| !x)
}
