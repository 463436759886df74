//! Turning a [`PrintLayout`] into page pixels.
//!
//! One function serves both the on-screen preview and the print raster;
//! they differ only in the layout's DPI.

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};
use thiserror::Error;
use tracing::debug;

use crate::geometry::Size;
use crate::layout::PrintLayout;
use crate::orientation::Orientation;
use crate::ticket::Quality;

#[derive(Debug, Error)]
pub enum RenderError {
    /// The pixels handed in are not the photo the layout was computed for.
    #[error("source pixels are {actual:?}, layout was computed for {expected:?}")]
    SourceMismatch { expected: Size, actual: Size },
}

#[derive(Copy, Clone, Debug)]
pub struct RenderOptions {
    /// Colour of any page area the photo does not cover.
    pub background: Rgb<u8>,
    pub filter: FilterType,
}

impl RenderOptions {
    pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    pub fn for_quality(quality: Quality) -> Self {
        let filter = match quality {
            Quality::Draft => FilterType::Triangle,
            Quality::Normal => FilterType::CatmullRom,
            Quality::High => FilterType::Lanczos3,
        };
        Self {
            background: Self::WHITE,
            filter,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::for_quality(Quality::default())
    }
}

/// Draw the photo onto a fresh page raster following `layout`.
pub fn render_page(
    pixels: &DynamicImage,
    layout: &PrintLayout,
    options: &RenderOptions,
) -> Result<RgbImage, RenderError> {
    let actual = Size::new(pixels.width(), pixels.height());
    if actual != layout.source {
        return Err(RenderError::SourceMismatch {
            expected: layout.source,
            actual,
        });
    }

    let visible = layout.visible_source();
    let cropped = if visible.is_full(actual.width, actual.height) {
        pixels.to_rgb8()
    } else {
        pixels
            .crop_imm(visible.x, visible.y, visible.width, visible.height)
            .to_rgb8()
    };
    let oriented = orient(cropped, layout.orientation);

    let target = layout.resize_to;
    let resized = if oriented.dimensions() == (target.width, target.height) {
        oriented
    } else {
        imageops::resize(&oriented, target.width, target.height, options.filter)
    };

    let mut page = RgbImage::from_pixel(layout.page.width, layout.page.height, options.background);
    imageops::replace(
        &mut page,
        &resized,
        i64::from(layout.placement.x),
        i64::from(layout.placement.y),
    );
    debug!(
        page_w = layout.page.width,
        page_h = layout.page.height,
        filter = ?options.filter,
        "rendered page"
    );
    Ok(page)
}

/// Apply a D4 orientation: mirror horizontally, then rotate clockwise.
pub fn orient(img: RgbImage, orientation: Orientation) -> RgbImage {
    let img = if orientation.mirror {
        imageops::flip_horizontal(&img)
    } else {
        img
    };
    match orientation.rotation & 3 {
        0 => img,
        1 => imageops::rotate90(&img),
        2 => imageops::rotate180(&img),
        _ => imageops::rotate270(&img),
    }
}
