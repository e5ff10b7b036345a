//! SVG treemap generation.
//!
//! Nested rectangle packing: each node's area is proportional to its
//! aggregate value, children sit inside their parent with an outer gap
//! around the group and an inner gap between siblings. Layout uses the
//! squarified algorithm so cells stay close to square.

use super::{escape, render_legend, tooltip, ChartConfig};
use crate::chart::palette::color_for;
use crate::hierarchy::HierarchyNode;
use crate::utils::config::{
    LEGEND_PANEL_WIDTH, TREEMAP_PADDING_INNER, TREEMAP_PADDING_OUTER,
};
use crate::utils::error::ChartError;
use log::info;

/// Vertical space reserved above the plot for the title
const TITLE_MARGIN: f64 = 30.0;

/// Minimum cell width before leaf labels are attempted
const LABEL_MIN_WIDTH: f64 = 60.0;
const LABEL_MIN_HEIGHT: f64 = 16.0;
const LABEL_CHAR_WIDTH: f64 = 7.0;

/// A positioned treemap cell
#[derive(Debug, Clone)]
pub struct TreemapCell {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub depth: usize,
    pub name: String,
    pub value: u64,
    /// Labels from the first dimension down to this node (root excluded)
    pub path: Vec<String>,
    pub is_leaf: bool,
}

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl Rect {
    const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        w: 0.0,
        h: 0.0,
    };

    fn inset(&self, margin: f64) -> Rect {
        Rect {
            x: self.x + margin,
            y: self.y + margin,
            w: (self.w - 2.0 * margin).max(0.0),
            h: (self.h - 2.0 * margin).max(0.0),
        }
    }
}

/// Compute cell positions for the whole hierarchy
///
/// **Public** - exposed for testing; generate_treemap drives it
pub fn layout_treemap(root: &HierarchyNode, width: f64, height: f64) -> Vec<TreemapCell> {
    let mut cells = Vec::new();
    let rect = Rect {
        x: 0.0,
        y: 0.0,
        w: width,
        h: height,
    };
    place(root, 0, rect, &mut Vec::new(), &mut cells);
    cells
}

fn place(
    node: &HierarchyNode,
    depth: usize,
    rect: Rect,
    path: &mut Vec<String>,
    out: &mut Vec<TreemapCell>,
) {
    // Invisible cells are not worth emitting
    if rect.w < 0.5 || rect.h < 0.5 {
        return;
    }

    let cell_path = if depth == 0 {
        vec![node.name.clone()]
    } else {
        path.clone()
    };
    out.push(TreemapCell {
        x: rect.x,
        y: rect.y,
        width: rect.w,
        height: rect.h,
        depth,
        name: node.name.clone(),
        value: node.value(),
        path: cell_path,
        is_leaf: node.is_leaf(),
    });

    let children = node.children();
    if children.is_empty() {
        return;
    }

    let inner = rect.inset(TREEMAP_PADDING_OUTER);
    if inner.w <= 0.0 || inner.h <= 0.0 {
        return;
    }

    let values: Vec<u64> = children.iter().map(HierarchyNode::value).collect();
    let rects = squarify(&values, inner);

    for (child, child_rect) in children.iter().zip(rects) {
        path.push(child.name.clone());
        place(
            child,
            depth + 1,
            child_rect.inset(TREEMAP_PADDING_INNER / 2.0),
            path,
            out,
        );
        path.pop();
    }
}

/// Squarified packing: greedily grow rows along the shorter side while the
/// worst aspect ratio keeps improving, then lay the row and recurse on the
/// remaining area.
fn squarify(values: &[u64], rect: Rect) -> Vec<Rect> {
    let n = values.len();
    let mut out = vec![Rect::ZERO; n];
    let total: u64 = values.iter().sum();
    if total == 0 {
        return out;
    }

    let scale = (rect.w * rect.h) / total as f64;
    let areas: Vec<f64> = values.iter().map(|v| *v as f64 * scale).collect();

    let mut rest = rect;
    let mut start = 0;
    while start < n {
        if areas[start] <= 0.0 || rest.w <= 0.0 || rest.h <= 0.0 {
            out[start] = Rect {
                x: rest.x,
                y: rest.y,
                w: 0.0,
                h: 0.0,
            };
            start += 1;
            continue;
        }

        let side = rest.w.min(rest.h);
        let mut end = start + 1;
        let mut best = worst_ratio(&areas[start..end], side);
        while end < n && areas[end] > 0.0 {
            let candidate = worst_ratio(&areas[start..=end], side);
            if candidate > best {
                break;
            }
            best = candidate;
            end += 1;
        }

        lay_row(&areas[start..end], &mut rest, &mut out[start..end]);
        start = end;
    }

    out
}

/// Worst (largest) aspect ratio a row would have at the given side length
fn worst_ratio(areas: &[f64], side: f64) -> f64 {
    let sum: f64 = areas.iter().sum();
    let thickness = sum / side;
    areas
        .iter()
        .map(|area| {
            let length = area / thickness;
            (length / thickness).max(thickness / length)
        })
        .fold(0.0, f64::max)
}

/// Carve one row off the remaining area, along its shorter side
fn lay_row(areas: &[f64], rest: &mut Rect, out: &mut [Rect]) {
    let sum: f64 = areas.iter().sum();

    if rest.w >= rest.h {
        // vertical strip on the left
        let strip = sum / rest.h;
        let mut y = rest.y;
        for (area, slot) in areas.iter().zip(out.iter_mut()) {
            let h = area / strip;
            *slot = Rect {
                x: rest.x,
                y,
                w: strip,
                h,
            };
            y += h;
        }
        rest.x += strip;
        rest.w -= strip;
    } else {
        // horizontal strip on top
        let strip = sum / rest.w;
        let mut x = rest.x;
        for (area, slot) in areas.iter().zip(out.iter_mut()) {
            let w = area / strip;
            *slot = Rect {
                x,
                y: rest.y,
                w,
                h: strip,
            };
            x += w;
        }
        rest.y += strip;
        rest.h -= strip;
    }
}

/// Generate an SVG treemap from a hierarchy
///
/// **Public** - main entry point for treemap generation
///
/// # Errors
/// * `ChartError::EmptyHierarchy` - the hierarchy has an aggregate value of 0
pub fn generate_treemap(
    root: &HierarchyNode,
    config: Option<&ChartConfig>,
) -> Result<String, ChartError> {
    let total = root.value();
    if total == 0 {
        return Err(ChartError::EmptyHierarchy);
    }

    let config = config.cloned().unwrap_or_default();
    info!(
        "Generating treemap for {} records ({}x{})",
        total, config.width, config.height
    );

    let mut sorted = root.clone();
    sorted.sort_by_value();

    let plot_width = (config.width.saturating_sub(LEGEND_PANEL_WIDTH)) as f64;
    let plot_height = config.height as f64 - TITLE_MARGIN;
    let cells = layout_treemap(&sorted, plot_width, plot_height);

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        config.width, config.height, config.width, config.height
    ));

    svg.push_str(
        r#"<style>.cell { stroke: #fff; } .cell:hover { stroke: black; stroke-width: 1; cursor: pointer; opacity: 0.9; }</style>"#,
    );

    svg.push_str(&format!(
        r#"<text x="{}" y="20" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
        config.width / 2,
        escape(&config.title)
    ));

    for cell in &cells {
        render_cell(cell, total, &mut svg);
    }

    render_legend(&mut svg, config.width.saturating_sub(LEGEND_PANEL_WIDTH) + 20, 40);

    svg.push_str("</svg>");

    info!("Treemap generated successfully ({} bytes)", svg.len());
    Ok(svg)
}

fn render_cell(cell: &TreemapCell, total: u64, out: &mut String) {
    let color = color_for(cell.depth, &cell.name);
    let opacity = if cell.is_leaf { 1.0 } else { 0.55 };

    out.push_str(&format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" opacity="{}" class="cell"><title>{}</title></rect>"#,
        cell.x.round(),
        (cell.y + TITLE_MARGIN).round(),
        cell.width.round().max(0.0),
        cell.height.round().max(0.0),
        color,
        opacity,
        tooltip(&cell.path, cell.value, total)
    ));

    // Leaf labels, only when the cell has room
    if cell.is_leaf && cell.width > LABEL_MIN_WIDTH && cell.height > LABEL_MIN_HEIGHT {
        let max_chars = (cell.width / LABEL_CHAR_WIDTH) as usize;
        if cell.name.len() <= max_chars {
            out.push_str(&format!(
                r##"<text x="{}" y="{}" dx="4" dy="11" font-size="11" fill="#000" pointer-events="none">{}</text>"##,
                cell.x.round(),
                (cell.y + TITLE_MARGIN).round(),
                escape(&cell.name)
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::frequency::{build_frequency_tree, default_dimensions};
    use crate::aggregator::labels::{
        DebtStatus, LabeledStudent, Outcome, ScholarshipStatus, TuitionStatus,
    };
    use crate::hierarchy::HierarchyNode;

    fn sample_hierarchy() -> HierarchyNode {
        let grad = LabeledStudent {
            debt: DebtStatus::HasDebt,
            tuition: TuitionStatus::NotUpToDate,
            scholarship: ScholarshipStatus::Holder,
            outcome: Outcome::Graduate,
        };
        let dropout = LabeledStudent {
            debt: DebtStatus::NoDebt,
            tuition: TuitionStatus::UpToDate,
            scholarship: ScholarshipStatus::NonHolder,
            outcome: Outcome::Dropout,
        };
        let students = vec![grad, grad, grad, dropout];
        let tree = build_frequency_tree(&students, &default_dimensions());
        HierarchyNode::from_frequency(&tree, "Students")
    }

    #[test]
    fn test_cells_stay_inside_bounds() {
        let root = sample_hierarchy();
        let cells = layout_treemap(&root, 800.0, 600.0);

        assert!(!cells.is_empty());
        for cell in &cells {
            assert!(cell.x >= -0.01, "x out of bounds: {:?}", cell);
            assert!(cell.y >= -0.01, "y out of bounds: {:?}", cell);
            assert!(cell.x + cell.width <= 800.01, "right edge: {:?}", cell);
            assert!(cell.y + cell.height <= 600.01, "bottom edge: {:?}", cell);
        }
    }

    #[test]
    fn test_depth_one_areas_are_proportional() {
        let mut root = sample_hierarchy();
        root.sort_by_value();
        let cells = layout_treemap(&root, 800.0, 600.0);

        let level_one: Vec<&TreemapCell> = cells.iter().filter(|c| c.depth == 1).collect();
        assert_eq!(level_one.len(), 2);

        let area_big = level_one[0].width * level_one[0].height;
        let area_small = level_one[1].width * level_one[1].height;
        // 3:1 split, padding absorbs a little
        let ratio = area_big / area_small;
        assert!(
            (2.0..4.5).contains(&ratio),
            "expected roughly 3:1, got {}",
            ratio
        );
    }

    #[test]
    fn test_squarify_fills_area() {
        let rect = Rect {
            x: 0.0,
            y: 0.0,
            w: 100.0,
            h: 100.0,
        };
        let rects = squarify(&[6, 3, 1], rect);

        let area: f64 = rects.iter().map(|r| r.w * r.h).sum();
        assert!((area - 10_000.0).abs() < 1.0);
        assert!((rects[0].w * rects[0].h - 6_000.0).abs() < 1.0);
    }

    #[test]
    fn test_generate_treemap_svg() {
        let root = sample_hierarchy();
        let svg = generate_treemap(&root, None).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("<rect"));
        assert!(svg.contains("<title>"));
        assert!(svg.contains("Has Debt"));
        assert!(svg.contains("Outcome")); // legend header
        assert!(svg.contains("75.0%")); // tooltip percentage for the big segment
    }

    #[test]
    fn test_generate_treemap_empty_hierarchy() {
        let root = HierarchyNode::from_frequency(&crate::aggregator::FrequencyNode::empty(), "Students");
        let err = generate_treemap(&root, None).unwrap_err();
        assert!(matches!(err, ChartError::EmptyHierarchy));
    }

    #[test]
    fn test_custom_title_is_escaped() {
        let root = sample_hierarchy();
        let config = ChartConfig::new().with_title("Cohort <2024>");
        let svg = generate_treemap(&root, Some(&config)).unwrap();
        assert!(svg.contains("Cohort &lt;2024&gt;"));
    }
}
