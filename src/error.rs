use thiserror::Error;

/// Layout computation error.
///
/// Returned before any geometry is computed; a [`PrintLayout`](crate::PrintLayout)
/// is produced whole or not at all.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum LayoutError {
    /// Source image has zero width or height.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidImageDimensions { width: u32, height: u32 },

    /// Page has a zero DPI or a non-positive (or non-finite) physical size.
    #[error("invalid page spec {width_in}x{height_in} in at {dpi} dpi")]
    InvalidPageSpec {
        width_in: f64,
        height_in: f64,
        dpi: u32,
    },

    /// EXIF orientation outside 1-8. Only the strict tag parser reports
    /// this; image descriptors fall back to the identity orientation.
    #[error("unsupported EXIF orientation tag {0}")]
    UnsupportedOrientationTag(u16),
}
