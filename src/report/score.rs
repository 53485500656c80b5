//! Fit scores.
//!
//! Both scores live in `[0, 100]`:
//!
//! - macro: linear penalty on the summed macro percentage deviation,
//!   floored at zero. The 2/3 constant zeroes the score once the combined
//!   deviation reaches 150 percentage points.
//! - micro: mean per-key attainment, capped at 100 so over-delivery on one
//!   micronutrient cannot mask a shortfall on another. A key with no
//!   positive target contributes a full 100.

use crate::domain::{MicroAmounts, MicroKey, NutritionResults, NutritionTargets};

/// Macro-fit score from reconstructed vs requested macro percentages.
pub fn macro_score(targets: &NutritionTargets, results: &NutritionResults) -> f64 {
    let deviation = (results.carbs_percent - targets.carbs_percent).abs()
        + (results.protein_percent - targets.protein_percent).abs()
        + (results.fat_percent - targets.fat_percent).abs();
    (100.0 - (2.0 / 3.0) * deviation).max(0.0)
}

/// Micro-fit score: mean attainment across all micronutrient keys.
pub fn micro_score(targets: &MicroAmounts, results: &MicroAmounts) -> f64 {
    let total: f64 = MicroKey::ALL
        .iter()
        .map(|&key| {
            let target = targets.get(key);
            if target > 0.0 {
                (results.get(key) / target * 100.0).min(100.0)
            } else {
                100.0
            }
        })
        .sum();
    total / MicroKey::ALL.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(carbs: f64, protein: f64, fat: f64) -> NutritionTargets {
        NutritionTargets {
            kcalories: 700.0,
            carbs_percent: carbs,
            protein_percent: protein,
            fat_percent: fat,
            vegetable_g_calorie_ratio: 0.2,
            micronutrients: MicroAmounts::default(),
        }
    }

    fn results(carbs: f64, protein: f64, fat: f64) -> NutritionResults {
        NutritionResults {
            kcalories: 700.0,
            carbs_g: 0.0,
            protein_g: 0.0,
            fat_g: 0.0,
            vegetable_g: 0.0,
            vegetable_weight_percent: 0.0,
            carbs_percent: carbs,
            protein_percent: protein,
            fat_percent: fat,
            vegetable_calorie_ratio: 0.0,
            micronutrients: MicroAmounts::default(),
        }
    }

    #[test]
    fn exact_macro_match_scores_100() {
        let score = macro_score(&targets(40.0, 30.0, 30.0), &results(40.0, 30.0, 30.0));
        assert_eq!(score, 100.0);
    }

    #[test]
    fn macro_score_penalizes_total_deviation_linearly() {
        // 15 points of total deviation costs 10 points of score.
        let score = macro_score(&targets(40.0, 30.0, 30.0), &results(45.0, 25.0, 25.0));
        assert!((score - 90.0).abs() < 1e-9);
    }

    #[test]
    fn macro_score_floors_at_zero() {
        let score = macro_score(&targets(40.0, 30.0, 30.0), &results(100.0, 100.0, 100.0));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn zero_target_micro_contributes_full_marks() {
        let targets = MicroAmounts::default();
        let mut results = MicroAmounts::default();
        results.set(MicroKey::VitaminCMg, 500.0);
        assert_eq!(micro_score(&targets, &results), 100.0);
    }

    #[test]
    fn over_delivery_is_capped_at_100() {
        let mut targets = MicroAmounts::default();
        targets.set(MicroKey::VitaminCMg, 10.0);
        let mut results = MicroAmounts::default();
        results.set(MicroKey::VitaminCMg, 1000.0);
        // One capped key at 100, twelve zero-target keys at 100.
        assert_eq!(micro_score(&targets, &results), 100.0);
    }

    #[test]
    fn half_attainment_averages_in() {
        let mut targets = MicroAmounts::default();
        targets.set(MicroKey::FiberG, 10.0);
        let mut results = MicroAmounts::default();
        results.set(MicroKey::FiberG, 5.0);
        // 12 keys at 100, one at 50.
        let expected = (12.0 * 100.0 + 50.0) / 13.0;
        assert!((micro_score(&targets, &results) - expected).abs() < 1e-9);
    }

    #[test]
    fn scores_stay_in_range_for_arbitrary_inputs() {
        let t = targets(40.0, 30.0, 30.0);
        for (c, p, f) in [(0.0, 0.0, 0.0), (400.0, 0.0, 0.0), (33.0, 33.0, 34.0)] {
            let s = macro_score(&t, &results(c, p, f));
            assert!((0.0..=100.0).contains(&s));
        }
    }
}
