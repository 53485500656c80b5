//! Design matrix construction.
//!
//! One column per food occurrence (duplicates get their own column), one
//! row per axis key. Entries are per-gram nutrient contributions
//! (`per_100g / 100`), except the vegetable row, which is a 0/1 category
//! indicator: a gram of a vegetable food contributes a gram of vegetable
//! mass.

use nalgebra::DMatrix;

use crate::data::FoodCatalog;
use crate::domain::NutrientKey;
use crate::error::CoreError;

/// Build the design matrix for the requested food occurrences.
///
/// Fails with [`CoreError::UnknownFood`] if any identifier is absent from
/// the catalog.
pub fn build_design_matrix(
    foods: &[String],
    catalog: &FoodCatalog,
) -> Result<DMatrix<f64>, CoreError> {
    let mut a = DMatrix::<f64>::zeros(NutrientKey::AXIS.len(), foods.len());

    for (col, id) in foods.iter().enumerate() {
        let food = catalog.lookup(id)?;
        for (row, &key) in NutrientKey::AXIS.iter().enumerate() {
            a[(row, col)] = match key {
                NutrientKey::Kcalories => food.per_100g.kcalories / 100.0,
                NutrientKey::CarbsG => food.per_100g.carbs_g / 100.0,
                NutrientKey::ProteinG => food.per_100g.protein_g / 100.0,
                NutrientKey::FatG => food.per_100g.fat_g / 100.0,
                NutrientKey::VegetableG => {
                    if food.category.is_vegetable() {
                        1.0
                    } else {
                        0.0
                    }
                }
                NutrientKey::Micro(m) => food.per_100g.micro(m) / 100.0,
            };
        }
    }

    Ok(a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis_index(key: NutrientKey) -> usize {
        NutrientKey::AXIS.iter().position(|&k| k == key).unwrap()
    }

    #[test]
    fn matrix_shape_matches_occurrences_and_axis() {
        let catalog = FoodCatalog::builtin();
        let foods = vec!["rice".to_string(), "broccoli".to_string(), "rice".to_string()];
        let a = build_design_matrix(&foods, &catalog).unwrap();
        assert_eq!(a.nrows(), NutrientKey::AXIS.len());
        assert_eq!(a.ncols(), 3);
        // Duplicate occurrences get identical independent columns.
        assert_eq!(a.column(0), a.column(2));
    }

    #[test]
    fn vegetable_row_is_a_category_indicator() {
        let catalog = FoodCatalog::builtin();
        let foods = vec!["broccoli".to_string(), "chicken_breast".to_string()];
        let a = build_design_matrix(&foods, &catalog).unwrap();
        let row = axis_index(NutrientKey::VegetableG);
        assert_eq!(a[(row, 0)], 1.0);
        assert_eq!(a[(row, 1)], 0.0);
    }

    #[test]
    fn entries_are_per_gram_amounts() {
        let catalog = FoodCatalog::builtin();
        let foods = vec!["chicken_breast".to_string()];
        let a = build_design_matrix(&foods, &catalog).unwrap();
        let kcal = axis_index(NutrientKey::Kcalories);
        let protein = axis_index(NutrientKey::ProteinG);
        assert!((a[(kcal, 0)] - 1.65).abs() < 1e-12);
        assert!((a[(protein, 0)] - 0.31).abs() < 1e-12);
    }

    #[test]
    fn unknown_food_fails() {
        let catalog = FoodCatalog::builtin();
        let foods = vec!["unobtainium".to_string()];
        assert_eq!(
            build_design_matrix(&foods, &catalog),
            Err(CoreError::UnknownFood("unobtainium".into()))
        );
    }
}
