//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during optimization
//! - decoded from request JSON and encoded to result JSON
//! - substituted wholesale in tests (synthetic catalogs, fixed presets)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// kcal released per gram of carbohydrate.
pub const KCAL_PER_G_CARBS: f64 = 4.0;
/// kcal released per gram of protein.
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// kcal released per gram of fat.
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Request defaults mirroring the original service schema.
pub const DEFAULT_KCALORIES: f64 = 700.0;
pub const DEFAULT_CARBS_PERCENT: f64 = 40.0;
pub const DEFAULT_PROTEIN_PERCENT: f64 = 30.0;
pub const DEFAULT_FAT_PERCENT: f64 = 30.0;

/// One tracked micronutrient on the optimization axis.
///
/// The set is fixed: daily values, importance weights and gap-fill vectors
/// all align on these 13 keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MicroKey {
    FiberG,
    MagnesiumMg,
    PotassiumMg,
    SeleniumUg,
    ZincMg,
    VitaminDUg,
    VitaminK2Ug,
    FolateUg,
    VitaminB12Ug,
    Omega3EpaDhaG,
    VitaminCMg,
    VitaminEMg,
    CholineMg,
}

impl MicroKey {
    /// All micronutrient keys, in canonical axis order.
    pub const ALL: [MicroKey; 13] = [
        MicroKey::FiberG,
        MicroKey::MagnesiumMg,
        MicroKey::PotassiumMg,
        MicroKey::SeleniumUg,
        MicroKey::ZincMg,
        MicroKey::VitaminDUg,
        MicroKey::VitaminK2Ug,
        MicroKey::FolateUg,
        MicroKey::VitaminB12Ug,
        MicroKey::Omega3EpaDhaG,
        MicroKey::VitaminCMg,
        MicroKey::VitaminEMg,
        MicroKey::CholineMg,
    ];

    /// Key name as it appears in request/result JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            MicroKey::FiberG => "fiber_g",
            MicroKey::MagnesiumMg => "magnesium_mg",
            MicroKey::PotassiumMg => "potassium_mg",
            MicroKey::SeleniumUg => "selenium_ug",
            MicroKey::ZincMg => "zinc_mg",
            MicroKey::VitaminDUg => "vitamin_d_ug",
            MicroKey::VitaminK2Ug => "vitamin_k2_ug",
            MicroKey::FolateUg => "folate_ug",
            MicroKey::VitaminB12Ug => "vitamin_b12_ug",
            MicroKey::Omega3EpaDhaG => "omega3_epa_dha_g",
            MicroKey::VitaminCMg => "vitamin_c_mg",
            MicroKey::VitaminEMg => "vitamin_e_mg",
            MicroKey::CholineMg => "choline_mg",
        }
    }
}

/// One tracked nutrient or derived quantity on the optimization axis.
///
/// Matrix rows, target entries and weight entries align by key. The order of
/// [`NutrientKey::AXIS`] is otherwise arbitrary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NutrientKey {
    Kcalories,
    CarbsG,
    ProteinG,
    FatG,
    /// Derived key: grams of vegetable-category mass in the meal. Foods
    /// contribute through a 0/1 category indicator, not a nutrient amount.
    VegetableG,
    Micro(MicroKey),
}

impl NutrientKey {
    /// The full fixed axis: four macros, the vegetable indicator, then the
    /// 13 micronutrients.
    pub const AXIS: [NutrientKey; 18] = [
        NutrientKey::Kcalories,
        NutrientKey::CarbsG,
        NutrientKey::ProteinG,
        NutrientKey::FatG,
        NutrientKey::VegetableG,
        NutrientKey::Micro(MicroKey::FiberG),
        NutrientKey::Micro(MicroKey::MagnesiumMg),
        NutrientKey::Micro(MicroKey::PotassiumMg),
        NutrientKey::Micro(MicroKey::SeleniumUg),
        NutrientKey::Micro(MicroKey::ZincMg),
        NutrientKey::Micro(MicroKey::VitaminDUg),
        NutrientKey::Micro(MicroKey::VitaminK2Ug),
        NutrientKey::Micro(MicroKey::FolateUg),
        NutrientKey::Micro(MicroKey::VitaminB12Ug),
        NutrientKey::Micro(MicroKey::Omega3EpaDhaG),
        NutrientKey::Micro(MicroKey::VitaminCMg),
        NutrientKey::Micro(MicroKey::VitaminEMg),
        NutrientKey::Micro(MicroKey::CholineMg),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NutrientKey::Kcalories => "kcalories",
            NutrientKey::CarbsG => "carbs_g",
            NutrientKey::ProteinG => "protein_g",
            NutrientKey::FatG => "fat_g",
            NutrientKey::VegetableG => "vegetable_g",
            NutrientKey::Micro(m) => m.as_str(),
        }
    }
}

/// Food category tag.
///
/// Only `vegetable` is semantically distinguished (it drives the 0/1
/// indicator row and the vegetable-mass synthesis); the remaining tags are
/// catalog bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Vegetable,
    Fruit,
    Grain,
    Legume,
    Protein,
    Dairy,
    Fat,
    Nut,
}

impl FoodCategory {
    pub fn is_vegetable(self) -> bool {
        self == FoodCategory::Vegetable
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FoodCategory::Vegetable => "vegetable",
            FoodCategory::Fruit => "fruit",
            FoodCategory::Grain => "grain",
            FoodCategory::Legume => "legume",
            FoodCategory::Protein => "protein",
            FoodCategory::Dairy => "dairy",
            FoodCategory::Fat => "fat",
            FoodCategory::Nut => "nut",
        }
    }
}

/// Amounts per 100 g of an edible food.
///
/// Missing fields deserialize as zero, so sparse catalog JSON stays terse
/// (olive oil has no folate entry, and none is required).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutrientProfile {
    pub kcalories: f64,
    pub carbs_g: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
    pub magnesium_mg: f64,
    pub potassium_mg: f64,
    pub selenium_ug: f64,
    pub zinc_mg: f64,
    pub vitamin_d_ug: f64,
    pub vitamin_k2_ug: f64,
    pub folate_ug: f64,
    pub vitamin_b12_ug: f64,
    pub omega3_epa_dha_g: f64,
    pub vitamin_c_mg: f64,
    pub vitamin_e_mg: f64,
    pub choline_mg: f64,
}

impl NutrientProfile {
    /// Per-100 g amount for a micronutrient key.
    pub fn micro(&self, key: MicroKey) -> f64 {
        match key {
            MicroKey::FiberG => self.fiber_g,
            MicroKey::MagnesiumMg => self.magnesium_mg,
            MicroKey::PotassiumMg => self.potassium_mg,
            MicroKey::SeleniumUg => self.selenium_ug,
            MicroKey::ZincMg => self.zinc_mg,
            MicroKey::VitaminDUg => self.vitamin_d_ug,
            MicroKey::VitaminK2Ug => self.vitamin_k2_ug,
            MicroKey::FolateUg => self.folate_ug,
            MicroKey::VitaminB12Ug => self.vitamin_b12_ug,
            MicroKey::Omega3EpaDhaG => self.omega3_epa_dha_g,
            MicroKey::VitaminCMg => self.vitamin_c_mg,
            MicroKey::VitaminEMg => self.vitamin_e_mg,
            MicroKey::CholineMg => self.choline_mg,
        }
    }
}

/// A catalog food: category tag plus per-100 g nutrient amounts.
///
/// Owned by the catalog and immutable for the duration of an optimization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodProfile {
    pub category: FoodCategory,
    #[serde(flatten)]
    pub per_100g: NutrientProfile,
}

/// Inbound meal request.
///
/// Preconditions (checked by [`MealRequest::validate`]):
/// - `foods` is non-empty; duplicates are allowed and each occurrence
///   becomes an independent optimization variable
/// - `kcalories` is finite and positive
/// - the macro percentages are finite
///
/// The percentages are deliberately NOT required to sum to 100: each macro
/// target is derived independently from its own share of the energy budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealRequest {
    pub foods: Vec<String>,
    #[serde(default = "default_kcalories")]
    pub kcalories: f64,
    #[serde(default = "default_carbs_percent")]
    pub carbs_percent: f64,
    #[serde(default = "default_protein_percent")]
    pub protein_percent: f64,
    #[serde(default = "default_fat_percent")]
    pub fat_percent: f64,
}

fn default_kcalories() -> f64 {
    DEFAULT_KCALORIES
}

fn default_carbs_percent() -> f64 {
    DEFAULT_CARBS_PERCENT
}

fn default_protein_percent() -> f64 {
    DEFAULT_PROTEIN_PERCENT
}

fn default_fat_percent() -> f64 {
    DEFAULT_FAT_PERCENT
}

impl MealRequest {
    /// Check the documented preconditions.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.foods.is_empty() {
            return Err(CoreError::InvalidRequest(
                "the food list must contain at least one item".into(),
            ));
        }
        if !(self.kcalories.is_finite() && self.kcalories > 0.0) {
            return Err(CoreError::InvalidRequest(format!(
                "kcalories must be finite and positive, got {}",
                self.kcalories
            )));
        }
        for (name, value) in [
            ("carbs_percent", self.carbs_percent),
            ("protein_percent", self.protein_percent),
            ("fat_percent", self.fat_percent),
        ] {
            if !value.is_finite() {
                return Err(CoreError::InvalidRequest(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Number of food occurrences, i.e. optimization variables.
    pub fn food_count(&self) -> usize {
        self.foods.len()
    }
}

/// Per-food-occurrence mass bounds, in grams.
///
/// The lower bound keeps trace portions out of the recipe; the upper bound
/// keeps a single food from dominating the meal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassBounds {
    pub min_g: f64,
    pub max_g: f64,
}

impl Default for MassBounds {
    fn default() -> Self {
        Self {
            min_g: 10.0,
            max_g: 400.0,
        }
    }
}

/// Micronutrient amounts keyed by [`MicroKey`], stored as named fields so
/// that serde flattening produces the original service's flat JSON maps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MicroAmounts {
    pub fiber_g: f64,
    pub magnesium_mg: f64,
    pub potassium_mg: f64,
    pub selenium_ug: f64,
    pub zinc_mg: f64,
    pub vitamin_d_ug: f64,
    pub vitamin_k2_ug: f64,
    pub folate_ug: f64,
    pub vitamin_b12_ug: f64,
    pub omega3_epa_dha_g: f64,
    pub vitamin_c_mg: f64,
    pub vitamin_e_mg: f64,
    pub choline_mg: f64,
}

impl MicroAmounts {
    pub fn get(&self, key: MicroKey) -> f64 {
        match key {
            MicroKey::FiberG => self.fiber_g,
            MicroKey::MagnesiumMg => self.magnesium_mg,
            MicroKey::PotassiumMg => self.potassium_mg,
            MicroKey::SeleniumUg => self.selenium_ug,
            MicroKey::ZincMg => self.zinc_mg,
            MicroKey::VitaminDUg => self.vitamin_d_ug,
            MicroKey::VitaminK2Ug => self.vitamin_k2_ug,
            MicroKey::FolateUg => self.folate_ug,
            MicroKey::VitaminB12Ug => self.vitamin_b12_ug,
            MicroKey::Omega3EpaDhaG => self.omega3_epa_dha_g,
            MicroKey::VitaminCMg => self.vitamin_c_mg,
            MicroKey::VitaminEMg => self.vitamin_e_mg,
            MicroKey::CholineMg => self.choline_mg,
        }
    }

    pub fn set(&mut self, key: MicroKey, value: f64) {
        match key {
            MicroKey::FiberG => self.fiber_g = value,
            MicroKey::MagnesiumMg => self.magnesium_mg = value,
            MicroKey::PotassiumMg => self.potassium_mg = value,
            MicroKey::SeleniumUg => self.selenium_ug = value,
            MicroKey::ZincMg => self.zinc_mg = value,
            MicroKey::VitaminDUg => self.vitamin_d_ug = value,
            MicroKey::VitaminK2Ug => self.vitamin_k2_ug = value,
            MicroKey::FolateUg => self.folate_ug = value,
            MicroKey::VitaminB12Ug => self.vitamin_b12_ug = value,
            MicroKey::Omega3EpaDhaG => self.omega3_epa_dha_g = value,
            MicroKey::VitaminCMg => self.vitamin_c_mg = value,
            MicroKey::VitaminEMg => self.vitamin_e_mg = value,
            MicroKey::CholineMg => self.choline_mg = value,
        }
    }

    /// Apply `f` to every entry, returning the transformed amounts.
    pub fn map(mut self, f: impl Fn(f64) -> f64) -> Self {
        for key in MicroKey::ALL {
            let v = self.get(key);
            self.set(key, f(v));
        }
        self
    }
}

/// The target echo reported alongside results.
///
/// Macro targets are echoed as the requested percentages (not gram totals);
/// micronutrient targets are absolute amounts scaled to the energy budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionTargets {
    pub kcalories: f64,
    pub carbs_percent: f64,
    pub protein_percent: f64,
    pub fat_percent: f64,
    pub vegetable_g_calorie_ratio: f64,
    #[serde(flatten)]
    pub micronutrients: MicroAmounts,
}

/// Reconstructed nutrition of the optimized meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionResults {
    pub kcalories: f64,
    pub carbs_g: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub vegetable_g: f64,
    pub vegetable_weight_percent: f64,
    pub carbs_percent: f64,
    pub protein_percent: f64,
    pub fat_percent: f64,
    pub vegetable_calorie_ratio: f64,
    #[serde(flatten)]
    pub micronutrients: MicroAmounts,
}

/// Macro-fit and micro-fit scores, both in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    #[serde(rename = "macro")]
    pub macro_fit: f64,
    #[serde(rename = "micro")]
    pub micro_fit: f64,
}

/// Full result of one optimization run.
///
/// Immutable after construction; all numeric leaves are rounded for
/// presentation (recipe masses to 1 decimal, everything else to 2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Total grams per distinct food id. Duplicate request occurrences are
    /// summed into one entry.
    pub recipe: BTreeMap<String, f64>,
    pub nutrition_targets: NutritionTargets,
    pub nutrition_results: NutritionResults,
    pub scores: Scores,
    pub suggested_ingredients: Vec<String>,
}
