//! Render command implementation.
//!
//! The render command:
//! 1. Reads the student dataset
//! 2. Derives the categorical labels
//! 3. Builds the nested frequency count
//! 4. Calculates segment metrics
//! 5. Converts to a hierarchy and generates the charts
//! 6. Writes output files

use crate::aggregator::{
    build_frequency_tree, calculate_segment_distribution, calculate_top_segments,
    default_dimensions, label_records, label_records_strict, CohortStats,
};
use crate::chart::{generate_sunburst, generate_text_summary, generate_treemap, ChartConfig};
use crate::hierarchy::HierarchyNode;
use crate::output::{write_hierarchy, write_summary, write_svg};
use crate::parser::{read_students, to_summary};
use crate::utils::config::{DEFAULT_ROOT_NAME, MAX_TOP_SEGMENTS};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the render command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RenderArgs {
    /// Path to the semicolon-delimited input file
    pub input: PathBuf,

    /// Output path for the JSON summary
    pub output_json: PathBuf,

    /// Output path for the treemap SVG (optional)
    pub output_treemap: Option<PathBuf>,

    /// Output path for the sunburst SVG (optional)
    pub output_sunburst: Option<PathBuf>,

    /// Output path for the hierarchy JSON (optional)
    pub output_hierarchy: Option<PathBuf>,

    /// Number of top segments to include in the summary
    pub top_segments: usize,

    /// Chart configuration
    pub chart_config: Option<ChartConfig>,

    /// Name of the hierarchy root node
    pub root_name: String,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Reject records with an unexpected outcome value
    pub strict: bool,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("student.csv"),
            output_json: PathBuf::from("summary.json"),
            output_treemap: Some(PathBuf::from("treemap.svg")),
            output_sunburst: Some(PathBuf::from("sunburst.svg")),
            output_hierarchy: None,
            top_segments: 20,
            chart_config: None,
            root_name: DEFAULT_ROOT_NAME.to_string(),
            print_summary: false,
            strict: false,
        }
    }
}

/// Execute the render command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Dataset read/parse errors
/// * Chart generation errors (e.g. empty dataset with a chart requested)
/// * File write errors
pub fn execute_render(args: RenderArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Starting render for dataset: {}", args.input.display());

    // Step 1: Read the dataset
    info!("Step 1/6: Reading student dataset...");
    let records = read_students(&args.input)
        .with_context(|| format!("Failed to read dataset {}", args.input.display()))?;

    debug!("Read {} raw records", records.len());

    // Step 2: Derive labels
    info!("Step 2/6: Deriving categorical labels...");
    let students = if args.strict {
        label_records_strict(&records).context("Dataset rejected under --strict")?
    } else {
        label_records(&records)
    };

    // Step 3: Aggregate
    info!("Step 3/6: Building nested frequency counts...");
    let tree = build_frequency_tree(&students, &default_dimensions());
    let stats = CohortStats::collect(&students);
    let total = tree.total();

    // Step 4: Segment metrics
    info!("Step 4/6: Calculating top {} segments...", args.top_segments);
    let segments = calculate_top_segments(&tree, total, args.top_segments);

    let distribution = calculate_segment_distribution(&segments);
    info!("Segment distribution: {}", distribution.summary());

    debug!("Top 3 segments:");
    for (i, segment) in segments.iter().take(3).enumerate() {
        debug!(
            "  {}. {} records ({:.1}%): {}",
            i + 1,
            segment.count,
            segment.percentage,
            segment.path
        );
    }

    // Step 5: Hierarchy + charts
    let root = HierarchyNode::from_frequency(&tree, &args.root_name);

    let treemap_svg = if args.output_treemap.is_some() {
        info!("Step 5/6: Generating treemap...");
        Some(
            generate_treemap(&root, args.chart_config.as_ref())
                .context("Failed to generate treemap")?,
        )
    } else {
        info!("Step 5/6: Skipping treemap generation (not requested)");
        None
    };

    let sunburst_svg = if args.output_sunburst.is_some() {
        Some(
            generate_sunburst(&root, args.chart_config.as_ref())
                .context("Failed to generate sunburst")?,
        )
    } else {
        None
    };

    // Step 6: Write outputs
    info!("Step 6/6: Writing output files...");

    let source = args.input.display().to_string();
    let summary = to_summary(&source, total, stats.to_breakdown(), segments.clone());

    write_summary(&summary, &args.output_json).context("Failed to write summary JSON")?;
    info!("✓ Summary written to: {}", args.output_json.display());

    if let (Some(svg), Some(path)) = (treemap_svg, &args.output_treemap) {
        write_svg(&svg, path).context("Failed to write treemap SVG")?;
        info!("✓ Treemap written to: {}", path.display());
    }

    if let (Some(svg), Some(path)) = (sunburst_svg, &args.output_sunburst) {
        write_svg(&svg, path).context("Failed to write sunburst SVG")?;
        info!("✓ Sunburst written to: {}", path.display());
    }

    if let Some(path) = &args.output_hierarchy {
        write_hierarchy(&root, path).context("Failed to write hierarchy JSON")?;
        info!("✓ Hierarchy written to: {}", path.display());
    }

    // Print text summary (if requested)
    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("COHORT SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Dataset:       {}", args.input.display());
        println!("Total Records: {}", total);
        println!("Graduates:     {}", stats.count_for_outcome("Graduate"));
        println!("Dropouts:      {}", stats.count_for_outcome("Dropout"));
        println!("Enrolled:      {}", stats.count_for_outcome("Enrolled"));
        println!("\n{}", generate_text_summary(&segments, 10, total));
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Render completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Validate render arguments
///
/// **Public** - called before execute_render for early validation
pub fn validate_args(args: &RenderArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.output_json.as_os_str().is_empty() {
        anyhow::bail!("Summary output path cannot be empty");
    }

    if args.root_name.trim().is_empty() {
        anyhow::bail!("Root name cannot be empty");
    }

    if args.top_segments == 0 {
        anyhow::bail!("top_segments must be greater than 0");
    }

    if args.top_segments > MAX_TOP_SEGMENTS {
        anyhow::bail!("top_segments is too large (max {})", MAX_TOP_SEGMENTS);
    }

    if let Some(config) = &args.chart_config {
        if config.width < 400 || config.height < 300 {
            anyhow::bail!("Chart dimensions are too small (min 400x300)");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_args_valid() {
        let args = RenderArgs::default();
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_empty_input() {
        let args = RenderArgs {
            input: PathBuf::new(),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_empty_root_name() {
        let args = RenderArgs {
            root_name: "  ".to_string(),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_top_segments_zero() {
        let args = RenderArgs {
            top_segments: 0,
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_top_segments_too_large() {
        let args = RenderArgs {
            top_segments: 2000,
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_tiny_chart() {
        let args = RenderArgs {
            chart_config: Some(ChartConfig::new().with_size(100, 100)),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }
}
