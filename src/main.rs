//! Cohort Charts CLI
//!
//! Turns a semicolon-delimited student dataset into treemap and sunburst
//! SVGs plus a JSON summary of the cohort.

use anyhow::Result;
use clap::{Parser, Subcommand};
use cohort_charts::chart::ChartConfig;
use cohort_charts::commands::{execute_render, validate_args, RenderArgs};
use cohort_charts::utils::config::{
    DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, DEFAULT_ROOT_NAME, SCHEMA_VERSION,
};
use env_logger::Env;
use std::path::PathBuf;

/// Cohort Charts - treemap and sunburst views of a student dataset
#[derive(Parser, Debug)]
#[command(name = "cohort-charts")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate a dataset and render the charts
    Render {
        /// Path to the semicolon-delimited input file
        #[arg(short, long, default_value = "student.csv")]
        input: PathBuf,

        /// Output path for the JSON summary
        #[arg(short, long, default_value = "summary.json")]
        output: PathBuf,

        /// Output path for the treemap SVG (optional)
        #[arg(short, long)]
        treemap: Option<PathBuf>,

        /// Output path for the sunburst SVG (optional)
        #[arg(short = 'b', long)]
        sunburst: Option<PathBuf>,

        /// Output path for the hierarchy JSON (optional)
        #[arg(long)]
        hierarchy: Option<PathBuf>,

        /// Number of top segments to include
        #[arg(long, default_value = "20")]
        top_segments: usize,

        /// Chart title
        #[arg(long)]
        title: Option<String>,

        /// Chart width in pixels
        #[arg(long, default_value_t = DEFAULT_CHART_WIDTH)]
        width: usize,

        /// Chart height in pixels
        #[arg(long, default_value_t = DEFAULT_CHART_HEIGHT)]
        height: usize,

        /// Name of the hierarchy root node
        #[arg(long, default_value = DEFAULT_ROOT_NAME)]
        root_name: String,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Reject records with an unexpected outcome value
        #[arg(long)]
        strict: bool,
    },

    /// Validate a summary JSON file
    Validate {
        /// Path to summary JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Render {
            input,
            output,
            treemap,
            sunburst,
            hierarchy,
            top_segments,
            title,
            width,
            height,
            root_name,
            summary,
            strict,
        } => {
            let mut config = ChartConfig::new().with_size(width, height);
            if let Some(title_str) = title {
                config = config.with_title(title_str);
            }

            let args = RenderArgs {
                input,
                output_json: output,
                output_treemap: treemap,
                output_sunburst: sunburst,
                output_hierarchy: hierarchy,
                top_segments,
                chart_config: Some(config),
                root_name,
                print_summary: summary,
                strict,
            };

            // Validate args first
            validate_args(&args)?;

            // Execute render
            execute_render(args)?;
        }

        Commands::Validate { file } => {
            validate_summary_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Validate a summary JSON file
///
/// **Private** - internal command implementation
fn validate_summary_file(file_path: PathBuf) -> Result<()> {
    use cohort_charts::output::read_summary;

    println!("Validating summary: {}", file_path.display());

    let summary = read_summary(&file_path)?;

    println!("✓ Valid summary JSON");
    println!("  Version: {}", summary.version);
    println!("  Source: {}", summary.source);
    println!("  Total Students: {}", summary.total_students);
    println!("  Outcome Labels: {}", summary.breakdown.by_outcome.len());
    println!("  Top Segments: {}", summary.top_segments.len());

    Ok(())
}

/// Display schema information
///
/// **Private** - internal command implementation
fn display_schema(show_details: bool) {
    println!("Cohort Charts Summary Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string          - Schema version (e.g., '1.0.0')");
        println!("  source: string           - Input file the summary was built from");
        println!("  total_students: number   - Total record count");
        println!("  breakdown: object        - Marginal counts per dimension");
        println!("    by_debt: object        - Counts by debt status label");
        println!("    by_tuition: object     - Counts by tuition status label");
        println!("    by_scholarship: object - Counts by scholarship status label");
        println!("    by_outcome: object     - Counts by outcome label");
        println!("  top_segments: array      - Largest fully-specified segments");
        println!("    path: string           - Semicolon-separated label path");
        println!("    count: number          - Records in the segment");
        println!("    percentage: number     - Share of the total cohort");
        println!("  generated_at: string     - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Cohort Charts v{}", env!("CARGO_PKG_VERSION"));
    println!("Summary Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Treemap and sunburst views of student cohort datasets.");
}
