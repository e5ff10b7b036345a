//! Configuration and constants for the CLI.

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Default name for the hierarchy root node
pub const DEFAULT_ROOT_NAME: &str = "Students";

// Required columns in the input file, addressed by exact header name.
// The dataset uses a semicolon delimiter.
pub const INPUT_DELIMITER: u8 = b';';
pub const COLUMN_DEBTOR: &str = "Debtor";
pub const COLUMN_TUITION: &str = "Tuition fees up to date";
pub const COLUMN_SCHOLARSHIP: &str = "Scholarship holder";
pub const COLUMN_TARGET: &str = "Target";
pub const REQUIRED_COLUMNS: &[&str] = &[
    COLUMN_DEBTOR,
    COLUMN_TUITION,
    COLUMN_SCHOLARSHIP,
    COLUMN_TARGET,
];

// Chart geometry defaults
pub const DEFAULT_CHART_WIDTH: usize = 1100;
pub const DEFAULT_CHART_HEIGHT: usize = 700;

// Treemap padding: gap between sibling cells and around a node's children
pub const TREEMAP_PADDING_INNER: f64 = 2.0;
pub const TREEMAP_PADDING_OUTER: f64 = 4.0;

/// Width reserved on the right of the treemap for the legend panel
pub const LEGEND_PANEL_WIDTH: usize = 250;

/// Upper bound for --top-segments
pub const MAX_TOP_SEGMENTS: usize = 1000;
