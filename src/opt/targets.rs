//! Target vector construction.
//!
//! Given a request (energy budget + macro split) and the presets, produce:
//!
//! - the target vector `b` over the full nutrient axis
//! - the matching weight vector, normalized per target magnitude
//! - the target echo reported back to the caller
//!
//! Macro gram targets use the fixed 4/4/9 kcal-per-gram conversions; each
//! micronutrient target is its daily value scaled by the meal's share of the
//! reference daily energy. Everything is recomputed per invocation — the
//! weight vector depends on the request's energy target, so it is never
//! cached.

use nalgebra::DVector;

use crate::data::Presets;
use crate::domain::{
    KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN, MealRequest, MicroAmounts, MicroKey,
    NutrientKey, NutritionTargets,
};
use crate::report::round2;

/// Targets and weights over the axis, plus the reporting echo.
#[derive(Debug, Clone)]
pub struct TargetSpec {
    /// Target vector aligned with [`NutrientKey::AXIS`].
    pub b: DVector<f64>,
    /// Normalized weight vector aligned with [`NutrientKey::AXIS`].
    pub weights: DVector<f64>,
    /// Full-precision micronutrient targets (for scoring and gap analysis).
    pub micro_targets: MicroAmounts,
    /// Rounded echo for the result payload.
    pub echo: NutritionTargets,
}

/// Build the target and weight vectors for one request.
pub fn build_targets(request: &MealRequest, presets: &Presets) -> TargetSpec {
    let energy = request.kcalories;
    let carbs_g = energy * (request.carbs_percent / 100.0) / KCAL_PER_G_CARBS;
    let protein_g = energy * (request.protein_percent / 100.0) / KCAL_PER_G_PROTEIN;
    let fat_g = energy * (request.fat_percent / 100.0) / KCAL_PER_G_FAT;
    let vegetable_g = energy * presets.vegetable_g_calorie_ratio;
    let dv_scale = energy / presets.daily_values.kcalories;

    let mut micro_targets = MicroAmounts::default();
    for key in MicroKey::ALL {
        micro_targets.set(key, presets.daily_values.micronutrients.get(key) * dv_scale);
    }

    let target_for = |key: NutrientKey| -> f64 {
        match key {
            NutrientKey::Kcalories => energy,
            NutrientKey::CarbsG => carbs_g,
            NutrientKey::ProteinG => protein_g,
            NutrientKey::FatG => fat_g,
            NutrientKey::VegetableG => vegetable_g,
            NutrientKey::Micro(m) => micro_targets.get(m),
        }
    };

    let b = DVector::from_iterator(
        NutrientKey::AXIS.len(),
        NutrientKey::AXIS.iter().map(|&key| target_for(key)),
    );
    let weights = DVector::from_iterator(
        NutrientKey::AXIS.len(),
        NutrientKey::AXIS
            .iter()
            .map(|&key| normalize_weight(presets.weights.get(key), target_for(key))),
    );

    let echo = NutritionTargets {
        kcalories: energy,
        carbs_percent: round2(request.carbs_percent),
        protein_percent: round2(request.protein_percent),
        fat_percent: round2(request.fat_percent),
        vegetable_g_calorie_ratio: round2(presets.vegetable_g_calorie_ratio),
        micronutrients: micro_targets.map(round2),
    };

    TargetSpec {
        b,
        weights,
        micro_targets,
        echo,
    }
}

/// Rescale a raw importance weight by the target magnitude.
///
/// Raw squared residuals grow with the square of the target, so axes with
/// large absolute targets (carbohydrate grams) would drown out axes with
/// small ones (a few grams of a vitamin). Dividing by `√target` lands
/// between absolute-error and percentage-error weighting. Targets at or
/// below 1 keep their raw weight.
fn normalize_weight(raw: f64, target: f64) -> f64 {
    if target > 1.0 { raw / target.sqrt() } else { raw }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> MealRequest {
        MealRequest {
            foods: vec!["rice".into()],
            kcalories: 700.0,
            carbs_percent: 40.0,
            protein_percent: 30.0,
            fat_percent: 30.0,
        }
    }

    fn axis_index(key: NutrientKey) -> usize {
        NutrientKey::AXIS.iter().position(|&k| k == key).unwrap()
    }

    #[test]
    fn macro_targets_use_4_4_9_conversions() {
        let spec = build_targets(&request(), &Presets::builtin());
        assert!((spec.b[axis_index(NutrientKey::Kcalories)] - 700.0).abs() < 1e-12);
        assert!((spec.b[axis_index(NutrientKey::CarbsG)] - 70.0).abs() < 1e-12);
        assert!((spec.b[axis_index(NutrientKey::ProteinG)] - 52.5).abs() < 1e-12);
        assert!((spec.b[axis_index(NutrientKey::FatG)] - 700.0 * 0.30 / 9.0).abs() < 1e-12);
        assert!((spec.b[axis_index(NutrientKey::VegetableG)] - 140.0).abs() < 1e-12);
    }

    #[test]
    fn micro_targets_scale_with_energy_share() {
        let presets = Presets::builtin();
        let spec = build_targets(&request(), &presets);
        // 700 / 2000 of the daily value.
        let idx = axis_index(NutrientKey::Micro(MicroKey::MagnesiumMg));
        assert!((spec.b[idx] - 350.0 * 0.35).abs() < 1e-12);
        assert!((spec.micro_targets.magnesium_mg - 122.5).abs() < 1e-12);
    }

    #[test]
    fn weights_divide_by_sqrt_of_large_targets_only() {
        let presets = Presets::builtin();
        let spec = build_targets(&request(), &presets);

        let carbs = axis_index(NutrientKey::CarbsG);
        assert!((spec.weights[carbs] - 150.0 / 70.0_f64.sqrt()).abs() < 1e-12);

        // B12 target is 2.4 * 0.35 = 0.84 <= 1: weight stays raw.
        let b12 = axis_index(NutrientKey::Micro(MicroKey::VitaminB12Ug));
        assert_eq!(spec.weights[b12], 3.0);
    }

    #[test]
    fn echo_reports_percentages_and_rounded_micros() {
        let mut req = request();
        req.kcalories = 500.0;
        req.carbs_percent = 33.333;
        let spec = build_targets(&req, &Presets::builtin());
        assert_eq!(spec.echo.carbs_percent, 33.33);
        assert_eq!(spec.echo.kcalories, 500.0);
        // 1.5 * (500/2000) = 0.375 rounds to 0.38 in the echo only.
        assert_eq!(spec.echo.micronutrients.omega3_epa_dha_g, 0.38);
        assert!((spec.micro_targets.omega3_epa_dha_g - 0.375).abs() < 1e-12);
    }

    #[test]
    fn inconsistent_percent_sum_is_used_as_given() {
        let mut req = request();
        req.carbs_percent = 90.0;
        req.protein_percent = 90.0;
        req.fat_percent = 90.0;
        let spec = build_targets(&req, &Presets::builtin());
        assert!((spec.b[axis_index(NutrientKey::CarbsG)] - 700.0 * 0.9 / 4.0).abs() < 1e-12);
    }
}
