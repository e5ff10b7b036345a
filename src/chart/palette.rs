//! Per-dimension color configuration.
//!
//! Each grouping dimension owns a label-to-color table; depth in the
//! hierarchy selects the table (depth 1 is the first dimension). Anything
//! not covered, including the root, falls back to a neutral gray, so
//! adding or removing a dimension only touches this list.

/// Color table for one grouping dimension
#[derive(Debug, Clone, Copy)]
pub struct DimensionPalette {
    pub dimension: &'static str,
    pub colors: &'static [(&'static str, &'static str)],
}

pub const FALLBACK_COLOR: &str = "#ccc";

/// Palettes in grouping order: debt, tuition, scholarship, outcome
pub const DIMENSION_PALETTES: &[DimensionPalette] = &[
    DimensionPalette {
        dimension: "Debt",
        colors: &[("Has Debt", "#ff6f61"), ("No Debt", "#6b5b95")],
    },
    DimensionPalette {
        dimension: "Tuition",
        colors: &[
            ("Tuition Up to Date", "#88b04b"),
            ("Tuition Not Up to Date", "#7f8c8d"),
        ],
    },
    DimensionPalette {
        dimension: "Scholarship",
        colors: &[
            ("Holds Scholarship", "#92a8d1"),
            ("No Scholarship", "#955251"),
        ],
    },
    DimensionPalette {
        dimension: "Outcome",
        colors: &[
            ("Graduate", "#2ca02c"),
            ("Dropout", "#d62728"),
            ("Enrolled", "#ff7f0e"),
        ],
    },
];

/// Fill color for a node at the given hierarchy depth (root = 0)
pub fn color_for(depth: usize, label: &str) -> &'static str {
    depth
        .checked_sub(1)
        .and_then(|index| DIMENSION_PALETTES.get(index))
        .and_then(|palette| {
            palette
                .colors
                .iter()
                .find(|(name, _)| *name == label)
                .map(|(_, color)| *color)
        })
        .unwrap_or(FALLBACK_COLOR)
}

/// Legend entries: the outcome palette, under its dimension header
pub fn legend_entries() -> (&'static str, &'static [(&'static str, &'static str)]) {
    let outcome = &DIMENSION_PALETTES[DIMENSION_PALETTES.len() - 1];
    (outcome.dimension, outcome.colors)
}
