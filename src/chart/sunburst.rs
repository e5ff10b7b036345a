//! SVG sunburst (radial partition) generation.
//!
//! Each node's angular span is proportional to its aggregate value within
//! its parent's span; radius grows with depth in fixed rings. The root is
//! the center disc. Angles are measured from 12 o'clock, clockwise.

use super::{escape, render_legend, tooltip, ChartConfig};
use crate::chart::palette::{color_for, FALLBACK_COLOR};
use crate::hierarchy::HierarchyNode;
use crate::utils::error::ChartError;
use log::info;
use std::f64::consts::{PI, TAU};

/// Vertical space reserved above the plot for the title
const TITLE_MARGIN: f64 = 30.0;

/// Vertical space reserved below the plot for the legend
const LEGEND_HEIGHT: f64 = 80.0;

/// Spans below this are invisible and not worth emitting
const MIN_SPAN: f64 = 1e-4;

const LABEL_CHAR_WIDTH: f64 = 7.0;

/// A positioned sunburst arc
#[derive(Debug, Clone)]
pub struct SunburstArc {
    /// Start angle in radians from 12 o'clock
    pub start: f64,
    /// End angle in radians
    pub end: f64,
    pub depth: usize,
    pub name: String,
    pub value: u64,
    /// Labels from the first dimension down to this node (root excluded)
    pub path: Vec<String>,
    pub is_leaf: bool,
}

impl SunburstArc {
    pub fn span(&self) -> f64 {
        self.end - self.start
    }
}

/// Compute angular spans for the whole hierarchy
///
/// **Public** - exposed for testing; generate_sunburst drives it
pub fn layout_sunburst(root: &HierarchyNode) -> Vec<SunburstArc> {
    let mut arcs = Vec::new();
    partition(root, 0.0, TAU, 0, &mut Vec::new(), &mut arcs);
    arcs
}

fn partition(
    node: &HierarchyNode,
    start: f64,
    end: f64,
    depth: usize,
    path: &mut Vec<String>,
    out: &mut Vec<SunburstArc>,
) {
    let arc_path = if depth == 0 {
        vec![node.name.clone()]
    } else {
        path.clone()
    };
    out.push(SunburstArc {
        start,
        end,
        depth,
        name: node.name.clone(),
        value: node.value(),
        path: arc_path,
        is_leaf: node.is_leaf(),
    });

    let total = node.value();
    if total == 0 {
        return;
    }

    let span = end - start;
    let mut cursor = start;
    for child in node.children() {
        let child_span = span * (child.value() as f64 / total as f64);
        path.push(child.name.clone());
        partition(child, cursor, cursor + child_span, depth + 1, path, out);
        path.pop();
        cursor += child_span;
    }
}

/// Generate an SVG sunburst from a hierarchy
///
/// **Public** - main entry point for sunburst generation
///
/// # Errors
/// * `ChartError::EmptyHierarchy` - the hierarchy has an aggregate value of 0
pub fn generate_sunburst(
    root: &HierarchyNode,
    config: Option<&ChartConfig>,
) -> Result<String, ChartError> {
    let total = root.value();
    if total == 0 {
        return Err(ChartError::EmptyHierarchy);
    }

    let config = config.cloned().unwrap_or_default();
    info!(
        "Generating sunburst for {} records ({}x{})",
        total, config.width, config.height
    );

    let mut sorted = root.clone();
    sorted.sort_by_value();

    let arcs = layout_sunburst(&sorted);
    let rings = sorted.max_depth() + 1;

    let plot_height = (config.height as f64 - TITLE_MARGIN - LEGEND_HEIGHT).max(0.0);
    let cx = config.width as f64 / 2.0;
    let cy = TITLE_MARGIN + plot_height / 2.0;
    let radius = ((config.width as f64).min(plot_height) / 2.0 - 10.0).max(0.0);
    let ring = radius / rings as f64;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        config.width, config.height, config.width, config.height
    ));

    svg.push_str(
        r#"<style>.arc { stroke: #fff; } .arc:hover { stroke: black; stroke-width: 1; cursor: pointer; opacity: 0.9; }</style>"#,
    );

    svg.push_str(&format!(
        r#"<text x="{}" y="20" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
        config.width / 2,
        escape(&config.title)
    ));

    for arc in &arcs {
        render_arc(arc, total, cx, cy, ring, &mut svg);
    }

    render_legend(&mut svg, 20, (TITLE_MARGIN + plot_height + 30.0) as usize);

    svg.push_str("</svg>");

    info!("Sunburst generated successfully ({} bytes)", svg.len());
    Ok(svg)
}

fn render_arc(arc: &SunburstArc, total: u64, cx: f64, cy: f64, ring: f64, out: &mut String) {
    // Root is the center disc
    if arc.depth == 0 {
        out.push_str(&format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" opacity="0.55" class="arc"><title>{}</title></circle>"#,
            cx,
            cy,
            ring,
            FALLBACK_COLOR,
            tooltip(&arc.path, arc.value, total)
        ));
        return;
    }

    if arc.span() < MIN_SPAN {
        return;
    }

    let r0 = arc.depth as f64 * ring;
    let r1 = (arc.depth as f64 + 1.0) * ring;
    let color = color_for(arc.depth, &arc.name);

    out.push_str(&format!(
        r#"<path d="{}" fill="{}" class="arc"><title>{}</title></path>"#,
        annular_sector(cx, cy, r0, r1, arc.start, arc.end),
        color,
        tooltip(&arc.path, arc.value, total)
    ));

    // Label at the arc centroid when the span has room for it
    let mid_radius = (r0 + r1) / 2.0;
    let arc_length = arc.span() * mid_radius;
    if arc_length > arc.name.len() as f64 * LABEL_CHAR_WIDTH {
        let mid = (arc.start + arc.end) / 2.0;
        let (x, y) = polar(cx, cy, mid_radius, mid);
        out.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-size="11" fill="white" text-anchor="middle" pointer-events="none">{}</text>"#,
            x,
            y,
            escape(&arc.name)
        ));
    }
}

/// Path data for an annular sector between two radii and two angles
fn annular_sector(cx: f64, cy: f64, r0: f64, r1: f64, a0: f64, a1: f64) -> String {
    // A full-circle arc has coincident endpoints and renders as nothing;
    // pull the end angle in slightly
    let a1 = if a1 - a0 >= TAU { a0 + TAU - MIN_SPAN } else { a1 };
    let large = if a1 - a0 > PI { 1 } else { 0 };

    let (x0_outer, y0_outer) = polar(cx, cy, r1, a0);
    let (x1_outer, y1_outer) = polar(cx, cy, r1, a1);
    let (x1_inner, y1_inner) = polar(cx, cy, r0, a1);
    let (x0_inner, y0_inner) = polar(cx, cy, r0, a0);

    format!(
        "M{:.2} {:.2}A{:.2} {:.2} 0 {} 1 {:.2} {:.2}L{:.2} {:.2}A{:.2} {:.2} 0 {} 0 {:.2} {:.2}Z",
        x0_outer, y0_outer, r1, r1, large, x1_outer, y1_outer, x1_inner, y1_inner, r0, r0, large,
        x0_inner, y0_inner
    )
}

/// Cartesian point for an angle measured clockwise from 12 o'clock
fn polar(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    (cx + r * angle.sin(), cy - r * angle.cos())
}
