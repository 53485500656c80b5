//! Meal synthesis: turn a solved mass vector back into nutrient totals.
//!
//! Totals are accumulated directly from the food profiles rather than
//! through the design matrix, and the vegetable total is the summed mass of
//! vegetable-category occurrences — the indicator column would only
//! re-derive the same number with extra rounding steps in between.

use nalgebra::DVector;

use crate::data::FoodCatalog;
use crate::domain::{
    KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN, MicroAmounts, MicroKey, NutritionResults,
};
use crate::error::CoreError;

/// Reconstruct full-precision nutrition totals for the solved meal.
///
/// Fails with [`CoreError::DegenerateMeal`] when the total mass or the
/// reconstructed energy is zero, since the derived percentages would be
/// undefined.
pub fn synthesize(
    foods: &[String],
    masses_g: &DVector<f64>,
    catalog: &FoodCatalog,
) -> Result<NutritionResults, CoreError> {
    debug_assert_eq!(foods.len(), masses_g.len());

    let mut kcalories = 0.0;
    let mut carbs_g = 0.0;
    let mut protein_g = 0.0;
    let mut fat_g = 0.0;
    let mut vegetable_g = 0.0;
    let mut micronutrients = MicroAmounts::default();
    let mut total_mass_g = 0.0;

    for (i, id) in foods.iter().enumerate() {
        let food = catalog.lookup(id)?;
        let grams = masses_g[i];
        total_mass_g += grams;

        kcalories += food.per_100g.kcalories * grams / 100.0;
        carbs_g += food.per_100g.carbs_g * grams / 100.0;
        protein_g += food.per_100g.protein_g * grams / 100.0;
        fat_g += food.per_100g.fat_g * grams / 100.0;
        if food.category.is_vegetable() {
            vegetable_g += grams;
        }
        for key in MicroKey::ALL {
            let v = micronutrients.get(key) + food.per_100g.micro(key) * grams / 100.0;
            micronutrients.set(key, v);
        }
    }

    if total_mass_g <= 0.0 {
        return Err(CoreError::DegenerateMeal(
            "total meal mass is zero".into(),
        ));
    }
    if kcalories <= 0.0 {
        return Err(CoreError::DegenerateMeal(
            "reconstructed energy is zero".into(),
        ));
    }

    Ok(NutritionResults {
        kcalories,
        carbs_g,
        protein_g,
        fat_g,
        vegetable_g,
        vegetable_weight_percent: vegetable_g / total_mass_g * 100.0,
        carbs_percent: carbs_g * KCAL_PER_G_CARBS / kcalories * 100.0,
        protein_percent: protein_g * KCAL_PER_G_PROTEIN / kcalories * 100.0,
        fat_percent: fat_g * KCAL_PER_G_FAT / kcalories * 100.0,
        vegetable_calorie_ratio: vegetable_g / kcalories,
        micronutrients,
    })
}

/// Round every numeric field to payload precision (2 decimals).
pub fn round_results(full: &NutritionResults) -> NutritionResults {
    use super::round2;
    NutritionResults {
        kcalories: round2(full.kcalories),
        carbs_g: round2(full.carbs_g),
        protein_g: round2(full.protein_g),
        fat_g: round2(full.fat_g),
        vegetable_g: round2(full.vegetable_g),
        vegetable_weight_percent: round2(full.vegetable_weight_percent),
        carbs_percent: round2(full.carbs_percent),
        protein_percent: round2(full.protein_percent),
        fat_percent: round2(full.fat_percent),
        vegetable_calorie_ratio: round2(full.vegetable_calorie_ratio),
        micronutrients: full.micronutrients.map(round2),
    }
}
