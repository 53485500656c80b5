//! Optimization presets: daily-value references, per-axis importance
//! weights, and meal-shape defaults.
//!
//! The built-in table targets a single main meal. Weights express relative
//! importance before target-magnitude normalization (see `opt::targets`):
//! macros anchor the meal structure, the vegetable mass is a soft shape
//! constraint, and micronutrients are nice-to-have with the hardest-to-source
//! ones weighted highest.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{
    DEFAULT_CARBS_PERCENT, DEFAULT_FAT_PERCENT, DEFAULT_KCALORIES, DEFAULT_PROTEIN_PERCENT,
    MicroAmounts, MicroKey, NutrientKey,
};
use crate::error::AppError;

/// Macro-ratio and energy defaults applied when a request omits them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MealDefaults {
    pub kcalories: f64,
    pub carbs_percent: f64,
    pub protein_percent: f64,
    pub fat_percent: f64,
}

/// Reference daily intake: the energy the micronutrient daily values are
/// quoted against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyValues {
    pub kcalories: f64,
    pub micronutrients: MicroAmounts,
}

/// Raw per-axis importance weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisWeights {
    pub kcalories: f64,
    pub carbs_g: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub vegetable_g: f64,
    pub micronutrients: MicroAmounts,
}

impl AxisWeights {
    /// Raw weight for one axis key.
    pub fn get(&self, key: NutrientKey) -> f64 {
        match key {
            NutrientKey::Kcalories => self.kcalories,
            NutrientKey::CarbsG => self.carbs_g,
            NutrientKey::ProteinG => self.protein_g,
            NutrientKey::FatG => self.fat_g,
            NutrientKey::VegetableG => self.vegetable_g,
            NutrientKey::Micro(m) => self.micronutrients.get(m),
        }
    }
}

/// Read-only preset bundle injected into the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presets {
    pub defaults: MealDefaults,
    /// Grams of vegetables targeted per kcal of the meal.
    pub vegetable_g_calorie_ratio: f64,
    pub daily_values: DailyValues,
    pub weights: AxisWeights,
}

impl Presets {
    /// Built-in presets for a single main meal.
    pub fn builtin() -> Self {
        let mut daily = MicroAmounts::default();
        daily.set(MicroKey::FiberG, 25.0);
        daily.set(MicroKey::MagnesiumMg, 350.0);
        daily.set(MicroKey::PotassiumMg, 4700.0);
        daily.set(MicroKey::SeleniumUg, 55.0);
        daily.set(MicroKey::ZincMg, 10.0);
        daily.set(MicroKey::VitaminDUg, 25.0);
        daily.set(MicroKey::VitaminK2Ug, 100.0);
        daily.set(MicroKey::FolateUg, 400.0);
        daily.set(MicroKey::VitaminB12Ug, 2.4);
        daily.set(MicroKey::Omega3EpaDhaG, 1.5);
        daily.set(MicroKey::VitaminCMg, 90.0);
        daily.set(MicroKey::VitaminEMg, 15.0);
        daily.set(MicroKey::CholineMg, 400.0);

        let mut micro_weights = MicroAmounts::default();
        // Hard to source from typical foods.
        micro_weights.set(MicroKey::Omega3EpaDhaG, 5.0);
        micro_weights.set(MicroKey::VitaminDUg, 5.0);
        micro_weights.set(MicroKey::MagnesiumMg, 4.0);
        micro_weights.set(MicroKey::PotassiumMg, 4.0);
        // Usually adequate in a varied meal.
        micro_weights.set(MicroKey::FiberG, 3.0);
        micro_weights.set(MicroKey::SeleniumUg, 3.0);
        micro_weights.set(MicroKey::ZincMg, 3.0);
        micro_weights.set(MicroKey::FolateUg, 3.0);
        micro_weights.set(MicroKey::VitaminB12Ug, 3.0);
        micro_weights.set(MicroKey::VitaminCMg, 3.0);
        // Rarely the deciding factor.
        micro_weights.set(MicroKey::VitaminK2Ug, 1.0);
        micro_weights.set(MicroKey::VitaminEMg, 2.0);
        micro_weights.set(MicroKey::CholineMg, 2.0);

        Self {
            defaults: MealDefaults {
                kcalories: DEFAULT_KCALORIES,
                carbs_percent: DEFAULT_CARBS_PERCENT,
                protein_percent: DEFAULT_PROTEIN_PERCENT,
                fat_percent: DEFAULT_FAT_PERCENT,
            },
            // 140 g of vegetables for a 700 kcal meal.
            vegetable_g_calorie_ratio: 0.20,
            daily_values: DailyValues {
                kcalories: 2000.0,
                micronutrients: daily,
            },
            weights: AxisWeights {
                kcalories: 150.0,
                carbs_g: 150.0,
                protein_g: 150.0,
                fat_g: 150.0,
                vegetable_g: 20.0,
                micronutrients: micro_weights,
            },
        }
    }

    /// Read a presets JSON file (same schema as the built-in table).
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path).map_err(|e| {
            AppError::new(2, format!("Failed to open presets JSON '{}': {e}", path.display()))
        })?;
        let presets: Presets = serde_json::from_reader(file)
            .map_err(|e| AppError::new(2, format!("Invalid presets JSON: {e}")))?;
        Ok(presets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_weights_cover_every_axis_key() {
        let presets = Presets::builtin();
        for key in NutrientKey::AXIS {
            assert!(
                presets.weights.get(key) > 0.0,
                "axis key {} has no weight",
                key.as_str()
            );
        }
    }

    #[test]
    fn builtin_daily_values_are_positive() {
        let presets = Presets::builtin();
        for key in MicroKey::ALL {
            assert!(presets.daily_values.micronutrients.get(key) > 0.0);
        }
        assert_eq!(presets.daily_values.kcalories, 2000.0);
    }

    #[test]
    fn presets_round_trip_through_json() {
        let presets = Presets::builtin();
        let json = serde_json::to_string(&presets).unwrap();
        let back: Presets = serde_json::from_str(&json).unwrap();
        assert_eq!(back, presets);
    }
}
