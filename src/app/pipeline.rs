//! Shared optimize pipeline used by the CLI front-end and tests.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! validate -> targets -> design matrix -> bounded solve -> synthesis ->
//! scores -> gap-fill suggestion.
//!
//! The pipeline is pure and synchronous: catalog and presets come in as
//! read-only references, no state survives between calls, and the same
//! inputs always produce the same output.

use std::collections::BTreeMap;

use tracing::debug;

use crate::data::{FoodCatalog, Presets};
use crate::domain::{MassBounds, MealRequest, OptimizationResult, Scores};
use crate::error::CoreError;
use crate::opt::{BoundedLeastSquares, build_design_matrix, build_targets};
use crate::report::{macro_score, micro_score, round1, round2, round_results, synthesize};
use crate::suggest::suggest_gap_fillers;

/// All computed outputs of a single optimization run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub result: OptimizationResult,
    /// Full-precision solved mass per food occurrence, in request order.
    pub masses_g: Vec<f64>,
}

/// Execute the full optimization pipeline.
pub fn run_optimize(
    request: &MealRequest,
    catalog: &FoodCatalog,
    presets: &Presets,
    solver: &dyn BoundedLeastSquares,
) -> Result<RunOutput, CoreError> {
    request.validate()?;

    let targets = build_targets(request, presets);
    let a = build_design_matrix(&request.foods, catalog)?;
    debug!(
        foods = request.food_count(),
        axes = a.nrows(),
        kcalories = request.kcalories,
        "assembled optimization system"
    );

    let bounds = MassBounds::default();
    let x = solver.solve(&a, &targets.b, &targets.weights, &bounds);

    let full = synthesize(&request.foods, &x, catalog)?;
    let macro_fit = macro_score(&targets.echo, &full);
    let micro_fit = micro_score(&targets.micro_targets, &full.micronutrients);
    debug!(macro_fit, micro_fit, "scored synthesized meal");

    let suggested_ingredients = suggest_gap_fillers(
        request,
        &targets.micro_targets,
        &full.micronutrients,
        macro_fit,
        catalog,
    );

    // Duplicate occurrences collapse into one recipe entry holding the
    // total grams to cook.
    let mut recipe: BTreeMap<String, f64> = BTreeMap::new();
    for (i, food) in request.foods.iter().enumerate() {
        *recipe.entry(food.clone()).or_insert(0.0) += x[i];
    }
    for grams in recipe.values_mut() {
        *grams = round1(*grams);
    }

    let result = OptimizationResult {
        recipe,
        nutrition_targets: targets.echo,
        nutrition_results: round_results(&full),
        scores: Scores {
            macro_fit: round2(macro_fit),
            micro_fit: round2(micro_fit),
        },
        suggested_ingredients,
    };

    Ok(RunOutput {
        result,
        masses_g: x.iter().copied().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opt::ActiveSetSolver;

    fn request(foods: &[&str]) -> MealRequest {
        MealRequest {
            foods: foods.iter().map(|f| f.to_string()).collect(),
            kcalories: 700.0,
            carbs_percent: 40.0,
            protein_percent: 30.0,
            fat_percent: 30.0,
        }
    }

    #[test]
    fn empty_request_is_rejected_before_any_math() {
        let out = run_optimize(
            &request(&[]),
            &FoodCatalog::builtin(),
            &Presets::builtin(),
            &ActiveSetSolver::default(),
        );
        assert!(matches!(out, Err(CoreError::InvalidRequest(_))));
    }

    #[test]
    fn unknown_food_propagates() {
        let out = run_optimize(
            &request(&["rice", "unobtainium"]),
            &FoodCatalog::builtin(),
            &Presets::builtin(),
            &ActiveSetSolver::default(),
        );
        assert_eq!(out.unwrap_err(), CoreError::UnknownFood("unobtainium".into()));
    }

    #[test]
    fn duplicate_foods_sum_into_one_recipe_entry() {
        let out = run_optimize(
            &request(&["rice", "rice", "broccoli"]),
            &FoodCatalog::builtin(),
            &Presets::builtin(),
            &ActiveSetSolver::default(),
        )
        .unwrap();

        assert_eq!(out.masses_g.len(), 3);
        assert_eq!(out.result.recipe.len(), 2);
        let rice_total: f64 = out.masses_g[0] + out.masses_g[1];
        let entry = out.result.recipe.get("rice").copied().unwrap();
        assert!((entry - round1(rice_total)).abs() < 1e-9);
    }
}
