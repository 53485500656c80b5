//! Export an optimization result as JSON.
//!
//! The payload is the wire format of the original service: a flat
//! `nutrition_targets` / `nutrition_results` pair, 2-dp scores, 1-dp
//! recipe masses and the suggestion list.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::OptimizationResult;
use crate::error::AppError;

/// Write the result JSON to a file; `-` writes to stdout.
pub fn write_result_json(path: &Path, result: &OptimizationResult) -> Result<(), AppError> {
    if path.as_os_str() == "-" {
        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, result)
            .map_err(|e| AppError::new(2, format!("Failed to write result JSON: {e}")))?;
        writeln!(stdout).map_err(|e| AppError::new(2, format!("Failed to write result JSON: {e}")))?;
        return Ok(());
    }

    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create result JSON '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(file, result)
        .map_err(|e| AppError::new(2, format!("Failed to write result JSON: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::domain::{
        MicroAmounts, NutritionResults, NutritionTargets, OptimizationResult, Scores,
    };
    use std::collections::BTreeMap;

    #[test]
    fn result_serializes_to_the_wire_schema() {
        let result = OptimizationResult {
            recipe: BTreeMap::from([("rice".to_string(), 180.5)]),
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
            suggested_ingredients: vec![],
        };

        let value = serde_json::to_value(&result).unwrap();
        // Flat maps with the original key names, scores under short names.
        assert_eq!(value["nutrition_targets"]["kcalories"], 700.0);
        assert_eq!(value["nutrition_targets"]["fiber_g"], 0.0);
        assert_eq!(value["nutrition_results"]["vegetable_weight_percent"], 43.68);
        assert_eq!(value["scores"]["macro"], 98.2);
        assert_eq!(value["scores"]["micro"], 61.3);
        assert_eq!(value["recipe"]["rice"], 180.5);
        assert!(value["suggested_ingredients"].as_array().unwrap().is_empty());
    }
}
