//! Formatted terminal output for an optimization run.
//!
//! Formatting is kept separate from the math so output tweaks stay
//! localized (important for future snapshot tests).

use crate::domain::{MicroKey, OptimizationResult};

/// Format the full run summary: recipe, macro fit, micro coverage, scores
/// and the gap-fill suggestion.
pub fn format_result(result: &OptimizationResult) -> String {
    let mut out = String::new();

    out.push_str("=== mealfit - optimized meal ===\n\n");

    out.push_str("Recipe (grams):\n");
    for (food, grams) in &result.recipe {
        out.push_str(&format!("  {:<20} {:>7.1} g\n", food, grams));
    }

    let targets = &result.nutrition_targets;
    let results = &result.nutrition_results;

    out.push_str("\nMacros (result vs target):\n");
    out.push_str(&format!(
        "  {:<12} {:>9.2} kcal  (target {:.2})\n",
        "energy", results.kcalories, targets.kcalories
    ));
    for (label, result_pct, target_pct) in [
        ("carbs", results.carbs_percent, targets.carbs_percent),
        ("protein", results.protein_percent, targets.protein_percent),
        ("fat", results.fat_percent, targets.fat_percent),
    ] {
        out.push_str(&format!(
            "  {:<12} {:>8.2} %     (target {:.2} %)\n",
            label, result_pct, target_pct
        ));
    }
    out.push_str(&format!(
        "  {:<12} {:>9.2} g     ({:.2} % of meal weight)\n",
        "vegetables", results.vegetable_g, results.vegetable_weight_percent
    ));

    out.push_str("\nMicronutrients (result / target):\n");
    for key in MicroKey::ALL {
        let target = targets.micronutrients.get(key);
        let result_v = results.micronutrients.get(key);
        let attained = if target > 0.0 {
            (result_v / target * 100.0).min(999.0)
        } else {
            100.0
        };
        out.push_str(&format!(
            "  {:<18} {:>9.2} / {:<9.2} ({:>5.1} %)\n",
            key.as_str(),
            result_v,
            target,
            attained
        ));
    }

    out.push_str(&format!(
        "\nScores: macro={:.2} micro={:.2}\n",
        result.scores.macro_fit, result.scores.micro_fit
    ));

    if result.suggested_ingredients.is_empty() {
        out.push_str("Suggestion: none (meal is balanced or no gap to close)\n");
    } else {
        out.push_str(&format!(
            "Suggestion: add {}\n",
            result.suggested_ingredients.join(", ")
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MicroAmounts, NutritionResults, NutritionTargets, Scores};
    use std::collections::BTreeMap;

    fn sample_result() -> OptimizationResult {
        let mut recipe = BTreeMap::new();
        recipe.insert("rice".to_string(), 180.5);
        recipe.insert("broccoli".to_string(), 140.0);
        OptimizationResult {
            recipe,
            nutrition_targets: NutritionTargets {
                kcalories: 700.0,
                carbs_percent: 40.0,
                protein_percent: 30.0,
                fat_percent: 30.0,
                vegetable_g_calorie_ratio: 0.2,
                micronutrients: MicroAmounts::default(),
            },
            nutrition_results: NutritionResults {
                kcalories: 698.5,
                carbs_g: 69.0,
                protein_g: 51.0,
                fat_g: 24.0,
                vegetable_g: 140.0,
                vegetable_weight_percent: 43.68,
                carbs_percent: 39.5,
                protein_percent: 29.2,
                fat_percent: 30.9,
                vegetable_calorie_ratio: 0.2,
                micronutrients: MicroAmounts::default(),
            },
            scores: Scores {
                macro_fit: 98.2,
                micro_fit: 61.3,
            },
            suggested_ingredients: vec!["salmon".to_string()],
        }
    }

    #[test]
    fn summary_mentions_recipe_scores_and_suggestion() {
        let text = format_result(&sample_result());
        assert!(text.contains("rice"));
        assert!(text.contains("180.5"));
        assert!(text.contains("macro=98.20"));
        assert!(text.contains("add salmon"));
    }

    #[test]
    fn empty_suggestion_renders_a_none_line() {
        let mut result = sample_result();
        result.suggested_ingredients.clear();
        let text = format_result(&result);
        assert!(text.contains("Suggestion: none"));
    }
}
