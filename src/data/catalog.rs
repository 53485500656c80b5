//! Food nutrient catalog.
//!
//! Maps a food identifier to its category tag and per-100 g nutrient
//! profile. The built-in table covers common whole-food staples; a custom
//! catalog can be loaded from JSON (`{"food_id": {"category": ...,
//! "kcalories": ..., ...}}`, omitted nutrients default to zero).
//!
//! Foods are stored in a `BTreeMap`, so iteration order — and therefore the
//! gap-fill tie-break — is lexicographic by identifier.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{FoodCategory, FoodProfile, NutrientProfile};
use crate::error::{AppError, CoreError};

/// Read-only lookup from food identifier to [`FoodProfile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodCatalog {
    foods: BTreeMap<String, FoodProfile>,
}

impl FoodCatalog {
    /// Build a catalog from explicit entries (used by tests and `builtin`).
    pub fn from_entries(entries: impl IntoIterator<Item = (String, FoodProfile)>) -> Self {
        Self {
            foods: entries.into_iter().collect(),
        }
    }

    /// Read a catalog JSON file (same schema as the built-in table).
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path).map_err(|e| {
            AppError::new(2, format!("Failed to open catalog JSON '{}': {e}", path.display()))
        })?;
        let catalog: FoodCatalog = serde_json::from_reader(file)
            .map_err(|e| AppError::new(2, format!("Invalid catalog JSON: {e}")))?;
        Ok(catalog)
    }

    /// Look up a food, failing with [`CoreError::UnknownFood`] if absent.
    pub fn lookup(&self, id: &str) -> Result<&FoodProfile, CoreError> {
        self.foods
            .get(id)
            .ok_or_else(|| CoreError::UnknownFood(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.foods.contains_key(id)
    }

    /// Iterate foods in lexicographic id order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FoodProfile)> {
        self.foods.iter()
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    /// Built-in catalog of common staples, amounts per 100 g.
    pub fn builtin() -> Self {
        let mut foods = BTreeMap::new();

        let mut add = |id: &str, category: FoodCategory, per_100g: NutrientProfile| {
            foods.insert(id.to_string(), FoodProfile { category, per_100g });
        };

        add(
            "chicken_breast",
            FoodCategory::Protein,
            NutrientProfile {
                kcalories: 165.0,
                protein_g: 31.0,
                fat_g: 3.6,
                magnesium_mg: 29.0,
                potassium_mg: 256.0,
                selenium_ug: 27.6,
                zinc_mg: 1.0,
                vitamin_d_ug: 0.1,
                vitamin_k2_ug: 3.6,
                folate_ug: 4.0,
                vitamin_b12_ug: 0.3,
                omega3_epa_dha_g: 0.03,
                vitamin_e_mg: 0.6,
                choline_mg: 85.0,
                ..NutrientProfile::default()
            },
        );
        add(
            "broccoli",
            FoodCategory::Vegetable,
            NutrientProfile {
                kcalories: 34.0,
                carbs_g: 6.6,
                protein_g: 2.8,
                fat_g: 0.4,
                fiber_g: 2.6,
                magnesium_mg: 21.0,
                potassium_mg: 316.0,
                selenium_ug: 2.5,
                zinc_mg: 0.4,
                folate_ug: 63.0,
                omega3_epa_dha_g: 0.02,
                vitamin_c_mg: 89.2,
                vitamin_e_mg: 0.8,
                choline_mg: 18.7,
                ..NutrientProfile::default()
            },
        );
        add(
            "rice",
            FoodCategory::Grain,
            NutrientProfile {
                kcalories: 130.0,
                carbs_g: 28.2,
                protein_g: 2.7,
                fat_g: 0.3,
                fiber_g: 0.4,
                magnesium_mg: 12.0,
                potassium_mg: 35.0,
                selenium_ug: 7.5,
                zinc_mg: 0.5,
                folate_ug: 58.0,
                choline_mg: 2.1,
                ..NutrientProfile::default()
            },
        );
        add(
            "olive_oil",
            FoodCategory::Fat,
            NutrientProfile {
                kcalories: 884.0,
                fat_g: 100.0,
                potassium_mg: 1.0,
                vitamin_e_mg: 14.4,
                choline_mg: 0.3,
                ..NutrientProfile::default()
            },
        );
        add(
            "salmon",
            FoodCategory::Protein,
            NutrientProfile {
                kcalories: 208.0,
                protein_g: 20.4,
                fat_g: 13.4,
                magnesium_mg: 27.0,
                potassium_mg: 363.0,
                selenium_ug: 36.5,
                zinc_mg: 0.4,
                vitamin_d_ug: 11.0,
                vitamin_k2_ug: 0.5,
                folate_ug: 26.0,
                vitamin_b12_ug: 3.2,
                omega3_epa_dha_g: 2.2,
                vitamin_c_mg: 3.9,
                vitamin_e_mg: 3.6,
                choline_mg: 78.5,
                ..NutrientProfile::default()
            },
        );
        add(
            "sardines",
            FoodCategory::Protein,
            NutrientProfile {
                kcalories: 208.0,
                protein_g: 24.6,
                fat_g: 11.5,
                magnesium_mg: 39.0,
                potassium_mg: 397.0,
                selenium_ug: 52.7,
                zinc_mg: 1.3,
                vitamin_d_ug: 4.8,
                vitamin_k2_ug: 0.1,
                folate_ug: 10.0,
                vitamin_b12_ug: 8.9,
                omega3_epa_dha_g: 1.48,
                vitamin_e_mg: 2.0,
                choline_mg: 75.0,
                ..NutrientProfile::default()
            },
        );
        add(
            "eggs",
            FoodCategory::Protein,
            NutrientProfile {
                kcalories: 155.0,
                carbs_g: 1.1,
                protein_g: 12.6,
                fat_g: 10.6,
                magnesium_mg: 12.0,
                potassium_mg: 126.0,
                selenium_ug: 30.7,
                zinc_mg: 1.3,
                vitamin_d_ug: 2.2,
                vitamin_k2_ug: 8.9,
                folate_ug: 47.0,
                vitamin_b12_ug: 0.9,
                omega3_epa_dha_g: 0.08,
                vitamin_e_mg: 1.0,
                choline_mg: 294.0,
                ..NutrientProfile::default()
            },
        );
        add(
            "spinach",
            FoodCategory::Vegetable,
            NutrientProfile {
                kcalories: 23.0,
                carbs_g: 3.6,
                protein_g: 2.9,
                fat_g: 0.4,
                fiber_g: 2.2,
                magnesium_mg: 79.0,
                potassium_mg: 558.0,
                selenium_ug: 1.0,
                zinc_mg: 0.5,
                folate_ug: 194.0,
                omega3_epa_dha_g: 0.14,
                vitamin_c_mg: 28.1,
                vitamin_e_mg: 2.0,
                choline_mg: 19.3,
                ..NutrientProfile::default()
            },
        );
        add(
            "kale",
            FoodCategory::Vegetable,
            NutrientProfile {
                kcalories: 49.0,
                carbs_g: 8.8,
                protein_g: 4.3,
                fat_g: 0.9,
                fiber_g: 3.6,
                magnesium_mg: 47.0,
                potassium_mg: 491.0,
                selenium_ug: 0.9,
                zinc_mg: 0.6,
                folate_ug: 141.0,
                omega3_epa_dha_g: 0.18,
                vitamin_c_mg: 120.0,
                vitamin_e_mg: 1.5,
                choline_mg: 0.8,
                ..NutrientProfile::default()
            },
        );
        add(
            "sweet_potato",
            FoodCategory::Vegetable,
            NutrientProfile {
                kcalories: 86.0,
                carbs_g: 20.1,
                protein_g: 1.6,
                fat_g: 0.1,
                fiber_g: 3.0,
                magnesium_mg: 25.0,
                potassium_mg: 337.0,
                selenium_ug: 0.6,
                zinc_mg: 0.3,
                folate_ug: 11.0,
                vitamin_c_mg: 2.4,
                vitamin_e_mg: 0.3,
                choline_mg: 12.3,
                ..NutrientProfile::default()
            },
        );
        add(
            "mushrooms",
            FoodCategory::Vegetable,
            NutrientProfile {
                kcalories: 22.0,
                carbs_g: 3.3,
                protein_g: 3.1,
                fat_g: 0.3,
                fiber_g: 1.0,
                magnesium_mg: 9.0,
                potassium_mg: 318.0,
                selenium_ug: 9.3,
                zinc_mg: 0.5,
                vitamin_d_ug: 0.2,
                folate_ug: 17.0,
                vitamin_b12_ug: 0.04,
                vitamin_c_mg: 2.1,
                choline_mg: 17.3,
                ..NutrientProfile::default()
            },
        );
        add(
            "lentils",
            FoodCategory::Legume,
            NutrientProfile {
                kcalories: 116.0,
                carbs_g: 20.1,
                protein_g: 9.0,
                fat_g: 0.4,
                fiber_g: 7.9,
                magnesium_mg: 36.0,
                potassium_mg: 369.0,
                selenium_ug: 2.8,
                zinc_mg: 1.3,
                folate_ug: 181.0,
                omega3_epa_dha_g: 0.04,
                vitamin_c_mg: 1.5,
                vitamin_e_mg: 0.1,
                choline_mg: 32.7,
                ..NutrientProfile::default()
            },
        );
        add(
            "tofu",
            FoodCategory::Legume,
            NutrientProfile {
                kcalories: 76.0,
                carbs_g: 1.9,
                protein_g: 8.1,
                fat_g: 4.8,
                fiber_g: 0.3,
                magnesium_mg: 30.0,
                potassium_mg: 121.0,
                selenium_ug: 8.9,
                zinc_mg: 0.8,
                folate_ug: 15.0,
                vitamin_c_mg: 0.1,
                choline_mg: 28.8,
                ..NutrientProfile::default()
            },
        );
        add(
            "natto",
            FoodCategory::Legume,
            NutrientProfile {
                kcalories: 212.0,
                carbs_g: 14.4,
                protein_g: 19.4,
                fat_g: 11.0,
                fiber_g: 5.4,
                magnesium_mg: 115.0,
                potassium_mg: 729.0,
                selenium_ug: 8.8,
                zinc_mg: 3.0,
                vitamin_k2_ug: 1000.0,
                folate_ug: 8.0,
                vitamin_c_mg: 13.0,
                vitamin_e_mg: 0.5,
                choline_mg: 56.0,
                ..NutrientProfile::default()
            },
        );
        add(
            "greek_yogurt",
            FoodCategory::Dairy,
            NutrientProfile {
                kcalories: 59.0,
                carbs_g: 3.6,
                protein_g: 10.2,
                fat_g: 0.4,
                magnesium_mg: 11.0,
                potassium_mg: 141.0,
                selenium_ug: 9.7,
                zinc_mg: 0.5,
                vitamin_k2_ug: 0.8,
                folate_ug: 7.0,
                vitamin_b12_ug: 0.8,
                choline_mg: 15.2,
                ..NutrientProfile::default()
            },
        );
        add(
            "oats",
            FoodCategory::Grain,
            NutrientProfile {
                kcalories: 389.0,
                carbs_g: 66.3,
                protein_g: 16.9,
                fat_g: 6.9,
                fiber_g: 10.6,
                magnesium_mg: 177.0,
                potassium_mg: 429.0,
                selenium_ug: 28.9,
                zinc_mg: 4.0,
                folate_ug: 56.0,
                vitamin_e_mg: 0.7,
                choline_mg: 40.4,
                ..NutrientProfile::default()
            },
        );
        add(
            "almonds",
            FoodCategory::Nut,
            NutrientProfile {
                kcalories: 579.0,
                carbs_g: 21.6,
                protein_g: 21.2,
                fat_g: 49.9,
                fiber_g: 12.5,
                magnesium_mg: 270.0,
                potassium_mg: 733.0,
                selenium_ug: 4.1,
                zinc_mg: 3.1,
                folate_ug: 44.0,
                vitamin_e_mg: 25.6,
                choline_mg: 52.1,
                ..NutrientProfile::default()
            },
        );
        add(
            "avocado",
            FoodCategory::Fruit,
            NutrientProfile {
                kcalories: 160.0,
                carbs_g: 8.5,
                protein_g: 2.0,
                fat_g: 14.7,
                fiber_g: 6.7,
                magnesium_mg: 29.0,
                potassium_mg: 485.0,
                selenium_ug: 0.4,
                zinc_mg: 0.6,
                folate_ug: 81.0,
                omega3_epa_dha_g: 0.11,
                vitamin_c_mg: 10.0,
                vitamin_e_mg: 2.1,
                choline_mg: 14.2,
                ..NutrientProfile::default()
            },
        );

        Self { foods }
    }
}
