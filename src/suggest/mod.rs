//! Gap-fill suggestion: one extra food to close micronutrient shortfalls.
//!
//! A meal that already scores well on macros and carries more than four
//! foods is left alone. Otherwise we collect the micronutrients running
//! more than 5% short of target, build a gap-fraction vector over the
//! micro axis, and rank every unused catalog food by cosine similarity
//! between its per-100 g micro profile and that gap vector. Direction
//! beats magnitude on purpose: the winner is the food whose nutrient mix
//! points at the unmet needs, not the one with the biggest numbers.
//!
//! Candidates are scored in parallel; the final pick is deterministic
//! (ties resolve to the earliest candidate in catalog iteration order,
//! which is lexicographic — an implementation detail, not a contract).

use rayon::prelude::*;
use tracing::debug;

use crate::data::FoodCatalog;
use crate::domain::{MealRequest, MicroAmounts, MicroKey};
use crate::math::cosine_similarity;

/// Macro score above which a sufficiently varied meal needs no help.
const WELL_BALANCED_MACRO_SCORE: f64 = 90.0;
/// Food-occurrence count above which the meal counts as varied.
const VARIED_FOOD_COUNT: usize = 4;
/// Shortfall fraction a micronutrient must exceed to count as a gap.
const GAP_THRESHOLD: f64 = 0.05;

/// Suggest up to one catalog food to fill the meal's micronutrient gaps.
///
/// Targets and results must be full-precision values (not the rounded
/// payload copies).
pub fn suggest_gap_fillers(
    request: &MealRequest,
    micro_targets: &MicroAmounts,
    micro_results: &MicroAmounts,
    macro_score: f64,
    catalog: &FoodCatalog,
) -> Vec<String> {
    if macro_score > WELL_BALANCED_MACRO_SCORE && request.food_count() > VARIED_FOOD_COUNT {
        return Vec::new();
    }

    let gap = gap_fractions(micro_targets, micro_results);
    if gap.iter().all(|&g| g == 0.0) {
        return Vec::new();
    }

    // Unused catalog foods, in deterministic (lexicographic) order.
    let candidates: Vec<(&String, [f64; 13])> = catalog
        .iter()
        .filter(|(id, _)| !request.foods.iter().any(|f| f == *id))
        .map(|(id, food)| {
            let mut micros = [0.0; 13];
            for (i, key) in MicroKey::ALL.into_iter().enumerate() {
                micros[i] = food.per_100g.micro(key);
            }
            (id, micros)
        })
        .collect();

    let scored: Vec<f64> = candidates
        .par_iter()
        .map(|(_, micros)| cosine_similarity(micros, &gap))
        .collect();

    let mut best: Option<(usize, f64)> = None;
    for (idx, &sim) in scored.iter().enumerate() {
        if !sim.is_finite() {
            continue;
        }
        if best.is_none_or(|(_, top)| sim > top) {
            best = Some((idx, sim));
        }
    }

    match best {
        Some((idx, sim)) => {
            debug!(
                candidate = %candidates[idx].0,
                similarity = sim,
                "gap-fill suggestion selected"
            );
            vec![candidates[idx].0.clone()]
        }
        None => Vec::new(),
    }
}

/// Gap fraction per micro key: `(target − result) / target` where positive
/// targets fall more than the threshold short, zero elsewhere.
fn gap_fractions(targets: &MicroAmounts, results: &MicroAmounts) -> [f64; 13] {
    let mut gap = [0.0; 13];
    for (i, key) in MicroKey::ALL.into_iter().enumerate() {
        let target = targets.get(key);
        if target > 0.0 {
            let fraction = (target - results.get(key)) / target;
            if fraction > GAP_THRESHOLD {
                gap[i] = fraction;
            }
        }
    }
    gap
}
