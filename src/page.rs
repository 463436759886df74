//! Physical page description and its pixel rasters.
//!
//! The printable medium is fixed: 4×6 inch photo paper. Print and preview
//! share the same [`PageSpec`] inches and differ only in DPI, which is what
//! keeps the preview geometrically identical to the printed sheet.

#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::Float;

use crate::error::LayoutError;
use crate::geometry::Size;

/// Short edge of the paper in inches.
pub const PAGE_WIDTH_IN: f64 = 4.0;
/// Long edge of the paper in inches.
pub const PAGE_HEIGHT_IN: f64 = 6.0;
/// Print resolution.
pub const PRINT_DPI: u32 = 300;
/// 4×6 inches in millimetres, as print dialogs expect it.
pub const MEDIA_MM: (f64, f64) = (101.6, 152.4);

/// Which way round the page raster is laid out.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PageOrientation {
    /// Short edge horizontal (1200×1800 at 300 DPI).
    #[default]
    Portrait,
    /// Long edge horizontal (1800×1200 at 300 DPI).
    Landscape,
}

/// Physical page size and raster density.
///
/// `width_in`/`height_in` describe the page in portrait form; the landscape
/// raster is the same page turned.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSpec {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

impl PageSpec {
    /// 4×6 inch glossy paper at 300 DPI.
    pub const PHOTO_4X6: Self = Self {
        width_in: PAGE_WIDTH_IN,
        height_in: PAGE_HEIGHT_IN,
        dpi: PRINT_DPI,
    };

    pub const fn new(width_in: f64, height_in: f64, dpi: u32) -> Self {
        Self {
            width_in,
            height_in,
            dpi,
        }
    }

    /// Same paper at another density.
    pub const fn with_dpi(self, dpi: u32) -> Self {
        Self { dpi, ..self }
    }

    /// Rejects zero DPI, non-positive or non-finite inches, and rasters that
    /// round to zero pixels or do not fit in `u32` on either axis.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let bad_inches = |v: f64| !v.is_finite() || v <= 0.0;
        let bad_px = |inches: f64| {
            let px = (inches * self.dpi as f64).round();
            px < 1.0 || px > u32::MAX as f64
        };
        if self.dpi == 0
            || bad_inches(self.width_in)
            || bad_inches(self.height_in)
            || bad_px(self.width_in)
            || bad_px(self.height_in)
        {
            return Err(LayoutError::InvalidPageSpec {
                width_in: self.width_in,
                height_in: self.height_in,
                dpi: self.dpi,
            });
        }
        Ok(())
    }

    /// Raster in portrait form, e.g. 1200×1800.
    pub fn portrait_raster(&self) -> Size {
        Size::new(
            inches_to_px(self.width_in, self.dpi),
            inches_to_px(self.height_in, self.dpi),
        )
    }

    /// Raster in landscape form, e.g. 1800×1200.
    pub fn landscape_raster(&self) -> Size {
        self.portrait_raster().transposed()
    }

    pub fn raster(&self, orientation: PageOrientation) -> Size {
        match orientation {
            PageOrientation::Portrait => self.portrait_raster(),
            PageOrientation::Landscape => self.landscape_raster(),
        }
    }

    /// Scaled-down copy of this page whose raster fits inside `viewport`.
    ///
    /// Picks the largest whole DPI (at least 1) at which the page, laid out
    /// as `orientation`, fits the viewport. Only the DPI changes, so a
    /// layout computed against the result is the print layout at a lower
    /// resolution.
    pub fn fit_viewport(&self, orientation: PageOrientation, viewport: Size) -> Self {
        let (w_in, h_in) = match orientation {
            PageOrientation::Portrait => (self.width_in, self.height_in),
            PageOrientation::Landscape => (self.height_in, self.width_in),
        };
        let by_width = viewport.width as f64 / w_in;
        let by_height = viewport.height as f64 / h_in;
        let mut dpi = by_width.min(by_height).floor().max(1.0) as u32;
        // floor of the ratio can still round up a raster edge past the viewport
        while dpi > 1 {
            let r = self.with_dpi(dpi).raster(orientation);
            if r.width <= viewport.width && r.height <= viewport.height {
                break;
            }
            dpi -= 1;
        }
        self.with_dpi(dpi)
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        Self::PHOTO_4X6
    }
}

fn inches_to_px(inches: f64, dpi: u32) -> u32 {
    (inches * dpi as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_4x6_rasters() {
        let page = PageSpec::PHOTO_4X6;
        assert_eq!(page.portrait_raster(), Size::new(1200, 1800));
        assert_eq!(page.landscape_raster(), Size::new(1800, 1200));
        assert_eq!(page.raster(PageOrientation::Landscape), Size::new(1800, 1200));
        assert!(page.validate().is_ok());
    }

    #[test]
    fn zero_dpi_rejected() {
        let err = PageSpec::PHOTO_4X6.with_dpi(0).validate().unwrap_err();
        assert!(matches!(err, LayoutError::InvalidPageSpec { dpi: 0, .. }));
    }

    #[test]
    fn non_positive_inches_rejected() {
        for (w, h) in [(0.0, 6.0), (4.0, -1.0), (f64::NAN, 6.0), (4.0, f64::INFINITY)] {
            assert!(PageSpec::new(w, h, 300).validate().is_err(), "{w}x{h}");
        }
    }

    #[test]
    fn sub_pixel_page_rejected() {
        assert!(PageSpec::new(0.001, 0.001, 1).validate().is_err());
    }

    #[test]
    fn oversized_raster_rejected() {
        // 6 in at a billion dpi is past u32::MAX pixels
        let err = PageSpec::PHOTO_4X6.with_dpi(1_000_000_000).validate().unwrap_err();
        assert!(matches!(err, LayoutError::InvalidPageSpec { dpi: 1_000_000_000, .. }));

        // largest dpi that still fits both axes
        let max = PageSpec::PHOTO_4X6.with_dpi(u32::MAX / 6);
        assert!(max.validate().is_ok());
        let raster = max.portrait_raster();
        assert_eq!(raster.width as u64 * 3, raster.height as u64 * 2);
        assert!(PageSpec::PHOTO_4X6.with_dpi(u32::MAX / 6 + 1).validate().is_err());
    }

    #[test]
    fn viewport_fit_portrait() {
        // 600×400 widget: height limits a portrait page to 66 dpi (264×396)
        let preview = PageSpec::PHOTO_4X6.fit_viewport(PageOrientation::Portrait, Size::new(600, 400));
        assert_eq!(preview.dpi, 66);
        assert_eq!(preview.portrait_raster(), Size::new(264, 396));
    }

    #[test]
    fn viewport_fit_landscape() {
        let preview =
            PageSpec::PHOTO_4X6.fit_viewport(PageOrientation::Landscape, Size::new(600, 400));
        assert_eq!(preview.dpi, 100);
        assert_eq!(preview.landscape_raster(), Size::new(600, 400));
    }

    #[test]
    fn viewport_fit_never_below_one_dpi() {
        let preview = PageSpec::PHOTO_4X6.fit_viewport(PageOrientation::Portrait, Size::new(1, 1));
        assert_eq!(preview.dpi, 1);
        assert!(preview.validate().is_ok());
    }
}
