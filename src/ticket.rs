//! What a print backend needs to know besides the raster itself.

use alloc::string::String;

use crate::geometry::Size;
use crate::layout::PrintLayout;
use crate::page::{MEDIA_MM, PageOrientation};

/// Which paper feed the driver should pull from.
///
/// Some photo printers only accept 4×6 stock from one specific tray, and
/// their drivers default to another.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PaperSource {
    /// Leave the choice to the driver.
    #[default]
    Auto,
    RearTray,
    Cassette,
}

/// Output quality, which also picks the resampling filter.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Quality {
    Draft,
    Normal,
    #[default]
    High,
}

/// Job description handed to the print collaborator with the page raster.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrintTicket {
    /// Target printer; `None` = system default.
    pub printer: Option<String>,
    /// Paper size in millimetres, short edge first.
    pub media_mm: (f64, f64),
    /// Orientation to request from the driver.
    pub orientation: PageOrientation,
    /// Print to the paper edge (full page, no driver margins).
    pub borderless: bool,
    pub paper_source: PaperSource,
    pub quality: Quality,
    pub dpi: u32,
    /// Raster size in pixels, matching `orientation`.
    pub raster: Size,
    /// The photo was turned a quarter to keep the sheet portrait.
    pub rotated_for_portrait: bool,
}

impl PrintTicket {
    /// Borderless ticket for the system default printer.
    pub fn new(layout: &PrintLayout) -> Self {
        Self {
            printer: None,
            media_mm: MEDIA_MM,
            orientation: layout.page_orientation,
            borderless: true,
            paper_source: PaperSource::Auto,
            quality: Quality::default(),
            dpi: layout.dpi,
            raster: layout.page,
            rotated_for_portrait: layout.rotated_for_portrait,
        }
    }

    /// Target a named printer. Blank names select the system default.
    pub fn printer(mut self, name: &str) -> Self {
        let name = name.trim();
        self.printer = (!name.is_empty()).then(|| String::from(name));
        self
    }

    pub fn borderless(mut self, borderless: bool) -> Self {
        self.borderless = borderless;
        self
    }

    pub fn paper_source(mut self, source: PaperSource) -> Self {
        self.paper_source = source;
        self
    }

    pub fn quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    pub fn is_landscape(&self) -> bool {
        self.orientation == PageOrientation::Landscape
    }
}
