use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_WASM_MODULE: &str = "pkg/geocmp_wasm.js";

#[derive(Debug, Parser)]
#[command(name = "geocmp", version)]
#[command(about = "Build an interactive HTML map for switching between GeoJSON files")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    #[command(flatten)]
    pub render: RenderArgs,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Remove temporary pages created with --open-browser.
    Clean {
        #[arg(short, long)]
        verbose: bool,
        /// Show what would be deleted without deleting.
        #[arg(short = 'n', long)]
        dry_run: bool,
    },
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Glob pattern(s) or GeoJSON file(s), e.g. 'data/*.geojson' a.geojson.
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,
    /// Output file path (default: stdout).
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    #[arg(short, long)]
    pub verbose: bool,
    /// Page title (default: layer names joined with " vs ").
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short = 'b', long)]
    pub open_browser: bool,
    /// Extra CSS appended to the page styles.
    #[arg(long, value_name = "FILE")]
    pub ext_css: Option<PathBuf>,
    /// Extra JS run after the viewer starts.
    #[arg(long, value_name = "FILE")]
    pub ext_js: Option<PathBuf>,
    /// Viewer configuration (JSON).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// URL of the viewer's wasm-bindgen JS module.
    #[arg(long, value_name = "URL", default_value = DEFAULT_WASM_MODULE)]
    pub wasm_module: String,
}
