//! SVG diagram of a print layout.
//!
//! Panels left to right: the stored photo (with the kept region outlined),
//! the upright photo, and the page with the photo placed on it.
//!
//! # Example
//!
//! ```
//! use photoprint::{ImageDescriptor, LayoutOptions, PageSpec, ScaleMode, compute_layout};
//! use photoprint::svg::render_layout_svg;
//!
//! let layout = compute_layout(
//!     &ImageDescriptor::with_exif_tag(3000, 4000, 6),
//!     &PageSpec::PHOTO_4X6,
//!     LayoutOptions::new(ScaleMode::Fill),
//! )
//! .unwrap();
//!
//! let svg = render_layout_svg(&layout);
//! assert!(svg.contains("Page  1800×1200"));
//! ```

use crate::geometry::{Rect, Size};
use crate::layout::{PrintLayout, ScaleMode};

/// Largest panel box in SVG units.
const PANEL: f64 = 220.0;
const GAP: f64 = 60.0;
const MARGIN: f64 = 30.0;
const LABEL_H: f64 = 24.0;
const NOTE_H: f64 = 34.0;

struct Panel {
    label: String,
    outer: Size,
    /// Highlighted region inside `outer`; `None` highlights all of it.
    inner: Option<Rect>,
    note: String,
}

/// Render `layout` as a standalone SVG document.
pub fn render_layout_svg(layout: &PrintLayout) -> String {
    let panels = panels(layout);
    let width = 2.0 * MARGIN + panels.len() as f64 * PANEL + (panels.len() - 1) as f64 * GAP;
    let height = 2.0 * MARGIN + LABEL_H + PANEL + NOTE_H;

    let mut svg = String::with_capacity(2048);
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = width as u32,
        h = height as u32,
    ));
    svg.push_str(
        r##"<style>
  text { font-family: "DejaVu Sans Mono", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .note { font-size: 11px; fill: #666; }
  .outer { fill: #f4f4f4; stroke: #999; }
  .inner { fill: #6ba3d6; stroke: #2c6faa; stroke-width: 1.5; }
  .arrow { stroke: #666; stroke-width: 1.5; }
</style>
"##,
    );

    for (i, panel) in panels.iter().enumerate() {
        let left = MARGIN + i as f64 * (PANEL + GAP);
        let top = MARGIN + LABEL_H;
        let (pw, ph, scale) = fit_panel(panel.outer);
        // center each box in its slot
        let x0 = left + (PANEL - pw) / 2.0;
        let y0 = top + (PANEL - ph) / 2.0;
        let mid = left + PANEL / 2.0;

        svg.push_str(&format!(
            "<text x=\"{mid:.1}\" y=\"{:.1}\" class=\"label\" text-anchor=\"middle\">{}</text>\n",
            MARGIN + 14.0,
            escape_xml(&panel.label),
        ));
        svg.push_str(&format!(
            "<rect x=\"{x0:.1}\" y=\"{y0:.1}\" width=\"{pw:.1}\" height=\"{ph:.1}\" class=\"outer\"/>\n"
        ));
        let inner = panel.inner.unwrap_or(Rect::from_size(panel.outer));
        svg.push_str(&format!(
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" class=\"inner\"/>\n",
            x0 + inner.x as f64 * scale,
            y0 + inner.y as f64 * scale,
            inner.width as f64 * scale,
            inner.height as f64 * scale,
        ));
        if !panel.note.is_empty() {
            svg.push_str(&format!(
                "<text x=\"{mid:.1}\" y=\"{:.1}\" class=\"note\" text-anchor=\"middle\">{}</text>\n",
                top + PANEL + 18.0,
                escape_xml(&panel.note),
            ));
        }
        if i + 1 < panels.len() {
            let ay = top + PANEL / 2.0;
            svg.push_str(&format!(
                "<line x1=\"{:.1}\" y1=\"{ay:.1}\" x2=\"{:.1}\" y2=\"{ay:.1}\" class=\"arrow\"/>\n",
                left + PANEL + 10.0,
                left + PANEL + GAP - 10.0,
            ));
        }
    }

    svg.push_str("</svg>\n");
    svg
}

fn panels(layout: &PrintLayout) -> Vec<Panel> {
    let mut panels = Vec::with_capacity(3);
    let source = layout.source;

    panels.push(Panel {
        label: format!("Source  {}×{}", source.width, source.height),
        outer: source,
        inner: layout.source_crop,
        note: match layout.source_crop {
            Some(c) => format!("keep {}×{} at ({}, {})", c.width, c.height, c.x, c.y),
            None => String::from("whole photo"),
        },
    });

    if !layout.orientation.is_identity() {
        let mut note = String::new();
        if layout.is_mirrored() {
            note.push_str("mirror, ");
        }
        note.push_str(&format!("rotate {}°", layout.rotation_degrees()));
        if layout.rotated_for_portrait {
            note.push_str(", turned for portrait feed");
        }
        panels.push(Panel {
            label: format!("Upright  {}×{}", layout.content.width, layout.content.height),
            outer: layout.content,
            inner: None,
            note,
        });
    }

    let note = match layout.mode {
        ScaleMode::Fill if !layout.overhang.is_zero() => {
            let o = layout.overhang;
            format!("fill, trim {}/{}/{}/{} px", o.top, o.right, o.bottom, o.left)
        }
        ScaleMode::Fit if layout.needs_padding() => {
            let p = layout.padding;
            format!("fit, border {}/{}/{}/{} px", p.top, p.right, p.bottom, p.left)
        }
        mode => format!("{mode}, edge to edge"),
    };
    panels.push(Panel {
        label: format!("Page  {}×{}", layout.page.width, layout.page.height),
        outer: layout.page,
        inner: Some(layout.placement),
        note,
    });

    panels
}

/// Box size and scale factor for drawing `size` inside one panel.
fn fit_panel(size: Size) -> (f64, f64, f64) {
    let w = size.width.max(1) as f64;
    let h = size.height.max(1) as f64;
    let scale = (PANEL / w).min(PANEL / h);
    (w * scale, h * scale, scale)
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
