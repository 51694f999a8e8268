//! CLI definition using clap

use std::fmt;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use takeoff_core::calculations::{BeamInput, ColumnInput, FootingInput, SlabInput};
use takeoff_core::CalculatorKind;

/// Output format for results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Parser)]
#[command(name = "takeoff")]
#[command(version)]
#[command(about = "Concrete volume and reinforcing steel estimates for beams, columns, footings and slabs")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Config file (defaults to <config dir>/takeoff/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Hide the per-category steel breakdown in table output
    #[arg(long, global = true)]
    pub no_breakdown: bool,

    /// Verbose logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Beam: main bars and stirrups
    Beam(BeamArgs),

    /// Column: main bars and ties
    Column(ColumnArgs),

    /// Pad footing: two-way bottom mesh
    Footing(FootingArgs),

    /// Slab: main and distribution bars
    Slab(SlabArgs),

    /// Calculate every item in a JSON file
    Batch {
        /// JSON array of items tagged with "type": Beam, Column, Footing or Slab
        file: PathBuf,
    },

    /// Prompt for each field of one calculator
    Interactive {
        /// Calculator to run (beam, column, footing, slab)
        kind: CalculatorKind,
    },
}

/// All lengths in millimeters.
#[derive(Args, Debug, Clone)]
pub struct BeamArgs {
    #[arg(long)]
    pub length: f64,
    #[arg(long)]
    pub width: f64,
    #[arg(long)]
    pub depth: f64,
    #[arg(long)]
    pub main_bar_diameter: f64,
    #[arg(long)]
    pub main_bar_count: u32,
    #[arg(long)]
    pub stirrup_diameter: f64,
    #[arg(long)]
    pub stirrup_spacing: f64,
    #[arg(long)]
    pub stirrup_cover: f64,
    /// Label shown in the report
    #[arg(long, default_value = "")]
    pub label: String,
}

impl From<BeamArgs> for BeamInput {
    fn from(a: BeamArgs) -> Self {
        BeamInput {
            label: a.label,
            length_mm: a.length,
            width_mm: a.width,
            depth_mm: a.depth,
            main_bar_diameter_mm: a.main_bar_diameter,
            main_bar_count: a.main_bar_count,
            stirrup_diameter_mm: a.stirrup_diameter,
            stirrup_spacing_mm: a.stirrup_spacing,
            stirrup_cover_mm: a.stirrup_cover,
        }
    }
}

/// All lengths in millimeters.
#[derive(Args, Debug, Clone)]
pub struct ColumnArgs {
    #[arg(long)]
    pub length: f64,
    #[arg(long)]
    pub width: f64,
    #[arg(long)]
    pub height: f64,
    #[arg(long)]
    pub main_bar_diameter: f64,
    #[arg(long)]
    pub main_bar_count: u32,
    #[arg(long)]
    pub tie_diameter: f64,
    #[arg(long)]
    pub tie_spacing: f64,
    #[arg(long)]
    pub tie_cover: f64,
    /// Label shown in the report
    #[arg(long, default_value = "")]
    pub label: String,
}

impl From<ColumnArgs> for ColumnInput {
    fn from(a: ColumnArgs) -> Self {
        ColumnInput {
            label: a.label,
            length_mm: a.length,
            width_mm: a.width,
            height_mm: a.height,
            main_bar_diameter_mm: a.main_bar_diameter,
            main_bar_count: a.main_bar_count,
            tie_diameter_mm: a.tie_diameter,
            tie_spacing_mm: a.tie_spacing,
            tie_cover_mm: a.tie_cover,
        }
    }
}

/// All lengths in millimeters.
#[derive(Args, Debug, Clone)]
pub struct FootingArgs {
    #[arg(long)]
    pub length: f64,
    #[arg(long)]
    pub width: f64,
    #[arg(long)]
    pub depth: f64,
    #[arg(long)]
    pub bar_diameter: f64,
    #[arg(long)]
    pub bar_spacing: f64,
    /// Label shown in the report
    #[arg(long, default_value = "")]
    pub label: String,
}

impl From<FootingArgs> for FootingInput {
    fn from(a: FootingArgs) -> Self {
        FootingInput {
            label: a.label,
            length_mm: a.length,
            width_mm: a.width,
            depth_mm: a.depth,
            bar_diameter_mm: a.bar_diameter,
            bar_spacing_mm: a.bar_spacing,
        }
    }
}

/// All lengths in millimeters.
#[derive(Args, Debug, Clone)]
pub struct SlabArgs {
    #[arg(long)]
    pub length: f64,
    #[arg(long)]
    pub width: f64,
    #[arg(long)]
    pub depth: f64,
    #[arg(long)]
    pub main_bar_diameter: f64,
    #[arg(long)]
    pub main_bar_spacing: f64,
    #[arg(long)]
    pub dist_bar_diameter: f64,
    #[arg(long)]
    pub dist_bar_spacing: f64,
    /// Label shown in the report
    #[arg(long, default_value = "")]
    pub label: String,
}

impl From<SlabArgs> for SlabInput {
    fn from(a: SlabArgs) -> Self {
        SlabInput {
            label: a.label,
            length_mm: a.length,
            width_mm: a.width,
            depth_mm: a.depth,
            main_bar_diameter_mm: a.main_bar_diameter,
            main_bar_spacing_mm: a.main_bar_spacing,
            dist_bar_diameter_mm: a.dist_bar_diameter,
            dist_bar_spacing_mm: a.dist_bar_spacing,
        }
    }
}
