//! Print layout for 4×6 photo paper.
//!
//! Given a photo's stored dimensions and EXIF orientation, decide which way
//! the page runs, how the photo is turned, how it is scaled (fill with a
//! centered crop, or fit with a centered border), and where it lands. The
//! same computation drives both the on-screen preview and the print raster,
//! so what you see is what prints.
//!
//! The geometry core is pure integer/float math, `no_std` compatible.
//! Decoding, rendering, settings, and the CLI sit behind features.
//!
//! # Modules
//!
//! - [`layout`]: Fill/fit placement, page selection, preview
//! - [`orientation`]: EXIF orientation, D4 dihedral group, coordinate transforms
//! - [`page`]: Paper size, DPI, raster dimensions
//! - [`source`]: Reading photos and their EXIF tag (`render` feature)
//! - [`render`]: Drawing a layout into page pixels (`render` feature)
//! - [`settings`]: Persisted preferences (`settings` feature)
//! - [`svg`]: Layout diagrams (`svg` feature)

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod descriptor;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod orientation;
pub mod page;

#[cfg(feature = "render")]
pub mod render;
#[cfg(feature = "settings")]
pub mod settings;
#[cfg(feature = "render")]
pub mod source;
#[cfg(feature = "svg")]
pub mod svg;
#[cfg(feature = "alloc")]
pub mod ticket;

pub use descriptor::ImageDescriptor;
pub use error::LayoutError;
pub use geometry::{Insets, Rect, Size};
pub use layout::{
    LayoutOptions, ParseScaleModeError, PrintLayout, ScaleMode, compute_layout, compute_preview,
    select_page_orientation,
};
pub use orientation::Orientation;
pub use page::{MEDIA_MM, PAGE_HEIGHT_IN, PAGE_WIDTH_IN, PRINT_DPI, PageOrientation, PageSpec};
#[cfg(feature = "alloc")]
pub use ticket::{PaperSource, PrintTicket, Quality};
