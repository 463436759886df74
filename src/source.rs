//! Reading photos from disk: dimensions, EXIF orientation, pixels.
//!
//! Pixels are returned in stored order. Orientation is applied by the
//! renderer from the computed layout, so the layout stays the only place
//! that decides how a photo is turned.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageReader};
use thiserror::Error;
use tracing::debug;

use crate::descriptor::ImageDescriptor;
use crate::error::LayoutError;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("opening {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("decoding {}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// A decoded photo and its descriptor.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub descriptor: ImageDescriptor,
    /// Pixels in stored order, not yet oriented.
    pub pixels: DynamicImage,
}

impl SourceImage {
    /// Wrap already-decoded pixels. `exif_tag` is the raw orientation tag,
    /// if the container had one.
    pub fn from_pixels(pixels: DynamicImage, exif_tag: Option<u16>) -> Result<Self, LayoutError> {
        let descriptor = describe(pixels.width(), pixels.height(), exif_tag)?;
        Ok(Self { descriptor, pixels })
    }
}

/// EXIF orientation tag of the file at `path`, if it has one.
pub fn read_exif_orientation(path: &Path) -> Option<u16> {
    let file = File::open(path).ok()?;
    let mut buf = BufReader::new(file);
    let exif = exif::Reader::new().read_from_container(&mut buf).ok()?;
    let field = exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?;
    let tag = field.value.get_uint(0)?;
    debug!("exif orientation {} for {}", tag, path.display());
    Some(orientation_tag(tag))
}

/// Narrow a raw EXIF value. Out-of-range values stay out of range so they
/// are still reported as rejected.
fn orientation_tag(raw: u32) -> u16 {
    u16::try_from(raw).unwrap_or(u16::MAX)
}

/// Describe the photo at `path` without decoding its pixels.
pub fn read_descriptor(path: &Path) -> Result<ImageDescriptor, SourceError> {
    let (width, height) = open(path)?
        .into_dimensions()
        .map_err(|source| SourceError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(describe(width, height, read_exif_orientation(path))?)
}

/// Decode the photo at `path`.
pub fn load(path: &Path) -> Result<SourceImage, SourceError> {
    let pixels = open(path)?.decode().map_err(|source| SourceError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        width = pixels.width(),
        height = pixels.height(),
        "decoded {}",
        path.display()
    );
    Ok(SourceImage::from_pixels(pixels, read_exif_orientation(path))?)
}

fn open(path: &Path) -> Result<ImageReader<BufReader<File>>, SourceError> {
    let io_err = |source: io::Error| SourceError::Io {
        path: path.to_path_buf(),
        source,
    };
    ImageReader::open(path)
        .map_err(io_err)?
        .with_guessed_format()
        .map_err(io_err)
}

fn describe(width: u32, height: u32, exif_tag: Option<u16>) -> Result<ImageDescriptor, LayoutError> {
    let descriptor = match exif_tag {
        Some(tag) => ImageDescriptor::with_exif_tag(width, height, tag),
        None => ImageDescriptor::new(width, height),
    };
    descriptor.validate()?;
    Ok(descriptor)
}
