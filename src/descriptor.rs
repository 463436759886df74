//! What the layout engine knows about a photo before touching its pixels.

use tracing::warn;

use crate::error::LayoutError;
use crate::geometry::Size;
use crate::orientation::Orientation;

/// Stored pixel dimensions of a photo plus its EXIF orientation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageDescriptor {
    /// Width of the stored (un-oriented) pixels.
    pub width: u32,
    /// Height of the stored (un-oriented) pixels.
    pub height: u32,
    /// Correction that turns the stored pixels upright.
    pub orientation: Orientation,
    /// Raw tag that was ignored because it was outside 1-8.
    pub rejected_tag: Option<u16>,
}

impl ImageDescriptor {
    /// Descriptor for pixels that need no orientation correction.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            orientation: Orientation::IDENTITY,
            rejected_tag: None,
        }
    }

    /// Descriptor from an EXIF orientation tag.
    ///
    /// Tags outside 1-8 are treated as 1 and logged; the raw value is kept
    /// in [`rejected_tag`](Self::rejected_tag) for the caller to report.
    pub fn with_exif_tag(width: u32, height: u32, tag: u16) -> Self {
        match Orientation::try_from_exif_tag(tag) {
            Ok(orientation) => Self {
                orientation,
                ..Self::new(width, height)
            },
            Err(err) => {
                warn!(tag, "{err}; using identity orientation");
                Self {
                    rejected_tag: Some(tag),
                    ..Self::new(width, height)
                }
            }
        }
    }

    /// Stored pixel size.
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Size of the upright image.
    pub fn effective_size(&self) -> Size {
        self.orientation.transform_dimensions(self.width, self.height)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.width == 0 || self.height == 0 {
            return Err(LayoutError::InvalidImageDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
