//! Command-line parsing for the meal optimizer.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "mealfit", version, about = "Meal portion optimizer (bounded weighted least squares)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Optimize per-food portions against a nutrition target and report
    /// the result.
    Optimize(OptimizeArgs),
    /// List the foods available in the catalog.
    Foods(FoodsArgs),
}

/// Options for an optimization run.
#[derive(Debug, Parser, Clone)]
pub struct OptimizeArgs {
    /// Food to include (repeat for multiple; repeating the same id gives
    /// it an independent portion per occurrence).
    #[arg(short = 'f', long = "food", value_name = "ID")]
    pub foods: Vec<String>,

    /// Read the meal request from a JSON file instead of flags ("-" for
    /// stdin). Mutually exclusive with --food.
    #[arg(long, value_name = "JSON", conflicts_with = "foods")]
    pub request: Option<PathBuf>,

    /// Target energy (kcal). Defaults to the preset meal energy.
    #[arg(long)]
    pub kcal: Option<f64>,

    /// Carbohydrate share of energy (percent). Defaults to the preset split.
    #[arg(long)]
    pub carbs: Option<f64>,

    /// Protein share of energy (percent). Defaults to the preset split.
    #[arg(long)]
    pub protein: Option<f64>,

    /// Fat share of energy (percent). Defaults to the preset split.
    #[arg(long)]
    pub fat: Option<f64>,

    /// Catalog JSON override (built-in catalog otherwise).
    #[arg(long, value_name = "JSON")]
    pub catalog: Option<PathBuf>,

    /// Presets JSON override (built-in presets otherwise).
    #[arg(long, value_name = "JSON")]
    pub presets: Option<PathBuf>,

    /// Write the result as JSON to a file, or "-" for stdout (suppresses
    /// the terminal report).
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Maximum solver iterations.
    #[arg(long, default_value_t = 100)]
    pub max_iter: usize,
}

/// Options for listing the catalog.
#[derive(Debug, Parser)]
pub struct FoodsArgs {
    /// Catalog JSON override (built-in catalog otherwise).
    #[arg(long, value_name = "JSON")]
    pub catalog: Option<PathBuf>,
}
