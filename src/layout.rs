//! Image-to-page layout for a single photo print.
//!
//! Computes rotation, scale, crop and placement of a photo on a fixed page
//! raster. Pure geometry: no pixel operations, no allocations, and the same
//! inputs always produce a bit-identical [`PrintLayout`].
//!
//! # Example
//!
//! ```
//! use photoprint::{ImageDescriptor, LayoutOptions, PageSpec, Rect, ScaleMode, Size, compute_layout};
//!
//! let photo = ImageDescriptor::with_exif_tag(4000, 3000, 1);
//! let layout = compute_layout(&photo, &PageSpec::PHOTO_4X6, LayoutOptions::new(ScaleMode::Fill)).unwrap();
//!
//! // landscape photo, landscape page, top and bottom trimmed
//! assert_eq!(layout.page, Size::new(1800, 1200));
//! assert_eq!(layout.draw_height, 1350.0);
//! assert_eq!(layout.source_crop, Some(Rect::new(0, 166, 4000, 2667)));
//! ```

use core::fmt;
use core::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::descriptor::ImageDescriptor;
use crate::error::LayoutError;
use crate::geometry::{Insets, Rect, Size};
use crate::orientation::Orientation;
use crate::page::{PageOrientation, PageSpec};

/// How the photo is scaled onto the page.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScaleMode {
    /// Cover the whole page, cropping the overhanging axis. No borders.
    #[default]
    Fill,
    /// Show the whole photo, leaving blank margins on one axis.
    Fit,
}

impl ScaleMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Fit => "fit",
        }
    }
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a scale mode name is neither `fill` nor `fit`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("scale mode must be `fill` or `fit`")]
pub struct ParseScaleModeError;

impl FromStr for ScaleMode {
    type Err = ParseScaleModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("fill") || s.eq_ignore_ascii_case("crop") {
            Ok(Self::Fill)
        } else if s.eq_ignore_ascii_case("fit") || s.eq_ignore_ascii_case("border") {
            Ok(Self::Fit)
        } else {
            Err(ParseScaleModeError)
        }
    }
}

/// User choices that shape the layout.
///
/// Passed explicitly on every call; the engine keeps no state between calls.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayoutOptions {
    pub mode: ScaleMode,
    /// Keep the sheet portrait even for landscape photos, turning the photo
    /// a quarter turn instead. For printers whose tray only feeds portrait.
    pub forced_portrait: bool,
}

impl LayoutOptions {
    pub const fn new(mode: ScaleMode) -> Self {
        Self {
            mode,
            forced_portrait: false,
        }
    }

    pub const fn forced_portrait(mut self, forced: bool) -> Self {
        self.forced_portrait = forced;
        self
    }
}

/// Where and how a photo lands on the page raster.
///
/// Float fields are the exact geometry; the integer fields are what a
/// renderer needs to produce pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PrintLayout {
    pub mode: ScaleMode,
    pub page_orientation: PageOrientation,
    /// Page raster size in pixels.
    pub page: Size,
    /// Density the page raster was computed at.
    pub dpi: u32,
    /// Stored (un-oriented) photo size.
    pub source: Size,
    /// Net orientation: EXIF correction, then the forced-portrait turn.
    pub orientation: Orientation,
    /// Whether a quarter turn was added to keep the sheet portrait.
    pub rotated_for_portrait: bool,
    /// Photo size after orientation, before scaling.
    pub content: Size,
    /// Page pixels per content pixel.
    pub scale: f64,
    /// Scaled photo width. At least the page width for [`ScaleMode::Fill`].
    pub draw_width: f64,
    /// Scaled photo height. At least the page height for [`ScaleMode::Fill`].
    pub draw_height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Visible region in stored pixel coordinates. `None` = whole photo.
    pub source_crop: Option<Rect>,
    /// Scaled pixels trimmed off each page edge (fill).
    pub overhang: Insets,
    /// Blank page pixels around the photo (fit).
    pub padding: Insets,
    /// Size the visible region is resampled to.
    pub resize_to: Size,
    /// Where the resampled region is drawn on the page.
    pub placement: Rect,
}

impl PrintLayout {
    /// Clockwise rotation applied to the stored pixels: 0, 90, 180 or 270.
    /// When [`is_mirrored`](Self::is_mirrored), the mirror comes first.
    pub fn rotation_degrees(&self) -> u16 {
        self.orientation.rotation_degrees()
    }

    /// Mirror the stored pixels left to right before rotating.
    pub fn is_mirrored(&self) -> bool {
        self.orientation.is_mirrored()
    }

    pub fn needs_crop(&self) -> bool {
        self.source_crop.is_some()
    }

    pub fn needs_padding(&self) -> bool {
        !self.padding.is_zero()
    }

    /// Stored-pixel region the renderer reads.
    pub fn visible_source(&self) -> Rect {
        self.source_crop.unwrap_or(Rect::from_size(self.source))
    }
}

/// Page orientation for an upright image, and whether the image needs an
/// extra clockwise quarter turn to fit it.
pub fn select_page_orientation(effective: Size, forced_portrait: bool) -> (PageOrientation, bool) {
    if !effective.is_landscape() {
        (PageOrientation::Portrait, false)
    } else if forced_portrait {
        (PageOrientation::Portrait, true)
    } else {
        (PageOrientation::Landscape, false)
    }
}

/// Lay out `image` on `page`.
///
/// Fails before computing anything when the image has zero area or the page
/// spec is unusable.
pub fn compute_layout(
    image: &ImageDescriptor,
    page: &PageSpec,
    options: LayoutOptions,
) -> Result<PrintLayout, LayoutError> {
    image.validate()?;
    page.validate()?;

    let (page_orientation, turn) =
        select_page_orientation(image.effective_size(), options.forced_portrait);
    let orientation = if turn {
        image.orientation.compose(Orientation::ROTATE_90)
    } else {
        image.orientation
    };
    let content = orientation.transform_dimensions(image.width, image.height);
    let page_px = page.raster(page_orientation);

    let placed = match options.mode {
        ScaleMode::Fill => fill(content, page_px),
        ScaleMode::Fit => fit(content, page_px),
    };

    let source_crop = placed
        .content_crop
        .map(|r| orientation.transform_rect_to_source(r, image.width, image.height));

    let layout = PrintLayout {
        mode: options.mode,
        page_orientation,
        page: page_px,
        dpi: page.dpi,
        source: image.size(),
        orientation,
        rotated_for_portrait: turn,
        content,
        scale: placed.scale,
        draw_width: placed.draw_width,
        draw_height: placed.draw_height,
        offset_x: placed.offset_x,
        offset_y: placed.offset_y,
        source_crop,
        overhang: placed.overhang,
        padding: placed.padding,
        resize_to: placed.resize_to,
        placement: placed.placement,
    };

    debug!(
        mode = %layout.mode,
        page_w = layout.page.width,
        page_h = layout.page.height,
        rotation = layout.rotation_degrees(),
        mirrored = layout.is_mirrored(),
        scale = layout.scale,
        crop = ?layout.source_crop,
        "computed print layout"
    );
    Ok(layout)
}

/// Lay out a preview that fits in `viewport`.
///
/// Same engine, same inches; only the DPI is lowered, so the preview is the
/// print layout at a smaller resolution.
pub fn compute_preview(
    image: &ImageDescriptor,
    page: &PageSpec,
    options: LayoutOptions,
    viewport: Size,
) -> Result<PrintLayout, LayoutError> {
    image.validate()?;
    page.validate()?;
    let (page_orientation, _) =
        select_page_orientation(image.effective_size(), options.forced_portrait);
    let preview = page.fit_viewport(page_orientation, viewport);
    compute_layout(image, &preview, options)
}

// ============================================================================
// Internal geometry
// ============================================================================

/// Mode-specific part of a layout, in content (oriented) space.
struct Placed {
    scale: f64,
    draw_width: f64,
    draw_height: f64,
    offset_x: f64,
    offset_y: f64,
    content_crop: Option<Rect>,
    overhang: Insets,
    padding: Insets,
    resize_to: Size,
    placement: Rect,
}

/// Compare aspect ratios exactly: `Greater` means the content is wider
/// than the page.
fn compare_aspect(content: Size, page: Size) -> core::cmp::Ordering {
    let content_cross = content.width as u64 * page.height as u64;
    let page_cross = content.height as u64 * page.width as u64;
    content_cross.cmp(&page_cross)
}

/// Scaled size with the constraining axis pinned to the page edge.
fn scaled(content: Size, page: Size, width_bound: bool) -> (f64, f64, f64) {
    let (cw, ch) = (content.width as f64, content.height as f64);
    let (pw, ph) = (page.width as f64, page.height as f64);
    if width_bound {
        (pw / cw, pw, ch * pw / cw)
    } else {
        (ph / ch, cw * ph / ch, ph)
    }
}

fn fill(content: Size, page: Size) -> Placed {
    use core::cmp::Ordering::*;

    // The narrower-than-page axis constrains when covering.
    let width_bound = compare_aspect(content, page) != Greater;
    let (scale, draw_width, draw_height) = scaled(content, page, width_bound);

    let over_w = (round_px(draw_width)).saturating_sub(page.width);
    let over_h = (round_px(draw_height)).saturating_sub(page.height);

    Placed {
        scale,
        draw_width,
        draw_height,
        offset_x: 0.0,
        offset_y: 0.0,
        content_crop: visible_region(content, page),
        overhang: Insets::centered(over_w, over_h),
        padding: Insets::ZERO,
        resize_to: page,
        placement: Rect::from_size(page),
    }
}

fn fit(content: Size, page: Size) -> Placed {
    use core::cmp::Ordering::*;

    // The wider-than-page axis constrains when containing.
    let width_bound = compare_aspect(content, page) != Less;
    let (scale, draw_width, draw_height) = scaled(content, page, width_bound);

    let resize_to = Size::new(
        round_px(draw_width).clamp(1, page.width),
        round_px(draw_height).clamp(1, page.height),
    );
    let padding = Insets::centered(page.width - resize_to.width, page.height - resize_to.height);

    Placed {
        scale,
        draw_width,
        draw_height,
        offset_x: (page.width as f64 - draw_width) / 2.0,
        offset_y: (page.height as f64 - draw_height) / 2.0,
        content_crop: None,
        overhang: Insets::ZERO,
        padding,
        resize_to,
        placement: Rect::new(padding.left, padding.top, resize_to.width, resize_to.height),
    }
}

/// Content-space region that survives a fill: full extent on the axis that
/// matches the page, centered window on the other. `None` when the aspect
/// ratios already agree.
fn visible_region(content: Size, page: Size) -> Option<Rect> {
    use core::cmp::Ordering::*;

    let (cw, ch) = (content.width as u64, content.height as u64);
    let (pw, ph) = (page.width as u64, page.height as u64);

    match compare_aspect(content, page) {
        Equal => None,
        Greater => {
            let keep = div_round(ch * pw, ph).clamp(1, cw) as u32;
            (keep < content.width).then(|| {
                Rect::new((content.width - keep) / 2, 0, keep, content.height)
            })
        }
        Less => {
            let keep = div_round(cw * ph, pw).clamp(1, ch) as u32;
            (keep < content.height).then(|| {
                Rect::new(0, (content.height - keep) / 2, content.width, keep)
            })
        }
    }
}

/// `n / d` rounded half up. `n` can be a product of two `u32` axes.
fn div_round(n: u64, d: u64) -> u64 {
    let (n, d) = (u128::from(n), u128::from(d));
    // the quotient never exceeds n, so it fits back in u64
    ((2 * n + d) / (2 * d)) as u64
}

fn round_px(v: f64) -> u32 {
    // f64 -> u32 `as` saturates; in-range values only need rounding
    (v + 0.5) as u32
}
