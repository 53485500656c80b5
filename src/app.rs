//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the catalog and presets (built-in or JSON overrides)
//! - runs the optimize pipeline
//! - prints the report or writes JSON exports

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, FoodsArgs, OptimizeArgs};
use crate::data::{FoodCatalog, Presets};
use crate::domain::MealRequest;
use crate::error::AppError;
use crate::opt::ActiveSetSolver;

pub mod pipeline;

/// Entry point for the `mealfit` binary.
pub fn run() -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = crate::cli::Cli::parse();
    match cli.command {
        Command::Optimize(args) => handle_optimize(args),
        Command::Foods(args) => handle_foods(args),
    }
}

fn handle_optimize(args: OptimizeArgs) -> Result<(), AppError> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let presets = match &args.presets {
        Some(path) => Presets::from_json_file(path)?,
        None => Presets::builtin(),
    };

    let request = match &args.request {
        Some(path) => crate::io::read_request(path)?,
        None => MealRequest {
            foods: args.foods.clone(),
            kcalories: args.kcal.unwrap_or(presets.defaults.kcalories),
            carbs_percent: args.carbs.unwrap_or(presets.defaults.carbs_percent),
            protein_percent: args.protein.unwrap_or(presets.defaults.protein_percent),
            fat_percent: args.fat.unwrap_or(presets.defaults.fat_percent),
        },
    };
    info!(
        foods = request.food_count(),
        kcalories = request.kcalories,
        "starting optimization"
    );

    let solver = ActiveSetSolver {
        max_iter: args.max_iter,
    };
    let run = pipeline::run_optimize(&request, &catalog, &presets, &solver)?;

    match &args.json {
        Some(path) => crate::io::write_result_json(path, &run.result)?,
        None => println!("{}", crate::report::format_result(&run.result)),
    }

    Ok(())
}

fn handle_foods(args: FoodsArgs) -> Result<(), AppError> {
    let catalog = load_catalog(args.catalog.as_deref())?;

    println!(
        "{:<20} {:<10} {:>8} {:>8} {:>8} {:>8}",
        "id", "category", "kcal", "carbs", "protein", "fat"
    );
    for (id, food) in catalog.iter() {
        println!(
            "{:<20} {:<10} {:>8.0} {:>8.1} {:>8.1} {:>8.1}",
            id,
            food.category.as_str(),
            food.per_100g.kcalories,
            food.per_100g.carbs_g,
            food.per_100g.protein_g,
            food.per_100g.fat_g
        );
    }
    println!("\n{} foods (amounts per 100 g)", catalog.len());
    Ok(())
}

fn load_catalog(path: Option<&std::path::Path>) -> Result<FoodCatalog, AppError> {
    match path {
        Some(path) => FoodCatalog::from_json_file(path),
        None => Ok(FoodCatalog::builtin()),
    }
}
