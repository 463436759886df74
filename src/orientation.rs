//! EXIF orientation as a D4 dihedral group element, plus the coordinate
//! transforms the layout engine needs to map page regions back to stored
//! pixels.

use crate::error::LayoutError;
use crate::geometry::{Rect, Size};

/// An optional horizontal mirror followed by a clockwise quarter-turn
/// rotation, the same order the EXIF tag table is written in.
///
/// | tag | mirror | rotation | name       |
/// |-----|--------|----------|------------|
/// | 1   | no     | 0°       | identity   |
/// | 2   | yes    | 0°       | flip H     |
/// | 3   | no     | 180°     | rotate 180 |
/// | 4   | yes    | 180°     | flip V     |
/// | 5   | yes    | 270°     | transpose  |
/// | 6   | no     | 90°      | rotate 90  |
/// | 7   | yes    | 90°      | transverse |
/// | 8   | no     | 270°     | rotate 270 |
///
/// The eight values are closed under [`compose`](Self::compose), so the
/// extra quarter turn used for forced-portrait printing folds into the same
/// value as the EXIF correction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Orientation {
    /// Mirror left to right before rotating.
    pub mirror: bool,
    /// Clockwise quarter turns (0-3), applied after the mirror.
    pub rotation: u8,
}

const fn orient(mirror: bool, rotation: u8) -> Orientation {
    Orientation { mirror, rotation }
}

impl Orientation {
    pub const IDENTITY: Self = orient(false, 0);
    pub const FLIP_H: Self = orient(true, 0);
    pub const ROTATE_180: Self = orient(false, 2);
    pub const FLIP_V: Self = orient(true, 2);
    /// Reflect over the main diagonal.
    pub const TRANSPOSE: Self = orient(true, 3);
    pub const ROTATE_90: Self = orient(false, 1);
    /// Reflect over the anti-diagonal.
    pub const TRANSVERSE: Self = orient(true, 1);
    pub const ROTATE_270: Self = orient(false, 3);

    /// Indexed by EXIF tag - 1.
    pub const BY_EXIF_TAG: [Self; 8] = [
        Self::IDENTITY,
        Self::FLIP_H,
        Self::ROTATE_180,
        Self::FLIP_V,
        Self::TRANSPOSE,
        Self::ROTATE_90,
        Self::TRANSVERSE,
        Self::ROTATE_270,
    ];

    /// Map an EXIF orientation tag (1-8). `None` for anything else.
    pub fn from_exif(tag: u16) -> Option<Self> {
        match tag {
            1..=8 => Some(Self::BY_EXIF_TAG[usize::from(tag - 1)]),
            _ => None,
        }
    }

    /// Strict variant of [`from_exif`](Self::from_exif) for callers that
    /// want to surface bad metadata instead of silently ignoring it.
    pub fn try_from_exif_tag(tag: u16) -> Result<Self, LayoutError> {
        Self::from_exif(tag).ok_or(LayoutError::UnsupportedOrientationTag(tag))
    }

    /// The EXIF tag (1-8) for this orientation.
    pub fn to_exif(self) -> u16 {
        let normalized = orient(self.mirror, self.rotation & 3);
        Self::BY_EXIF_TAG
            .iter()
            .position(|&o| o == normalized)
            .map_or(1, |i| i as u16 + 1)
    }

    pub fn is_identity(self) -> bool {
        !self.mirror && self.rotation & 3 == 0
    }

    /// Clockwise rotation in degrees, applied after any mirror: 0, 90, 180
    /// or 270.
    pub fn rotation_degrees(self) -> u16 {
        u16::from(self.rotation & 3) * 90
    }

    pub fn is_mirrored(self) -> bool {
        self.mirror
    }

    /// Whether width and height trade places.
    pub fn swaps_axes(self) -> bool {
        self.rotation & 1 == 1
    }

    /// Apply `self` first, then `other`.
    ///
    /// A mirror after a turn equals the opposite turn after a mirror, so a
    /// mirrored `other` runs `self`'s rotation backwards.
    pub fn compose(self, other: Self) -> Self {
        let rotation = if other.mirror {
            other.rotation.wrapping_sub(self.rotation)
        } else {
            other.rotation.wrapping_add(self.rotation)
        };
        orient(self.mirror != other.mirror, rotation & 3)
    }

    /// `self.compose(self.inverse()) == IDENTITY`.
    pub fn inverse(self) -> Self {
        if self.mirror {
            // every mirrored element is its own inverse
            self
        } else {
            orient(false, self.rotation.wrapping_neg() & 3)
        }
    }

    /// Stored dimensions to displayed dimensions.
    pub fn transform_dimensions(self, w: u32, h: u32) -> Size {
        let stored = Size::new(w, h);
        if self.swaps_axes() {
            stored.transposed()
        } else {
            stored
        }
    }

    /// Map a rect in displayed space back to stored pixel space.
    ///
    /// `source_w`/`source_h` are the stored (pre-orientation) dimensions.
    pub fn transform_rect_to_source(self, rect: Rect, source_w: u32, source_h: u32) -> Rect {
        // Edge distances of the displayed rect. Each element moves these
        // four gaps onto the stored image's edges.
        let shown = self.transform_dimensions(source_w, source_h);
        let left = rect.x;
        let top = rect.y;
        let right = shown.width - rect.x - rect.width;
        let bottom = shown.height - rect.y - rect.height;

        // stored (x, y) come from the gaps that land on the stored left and top
        let (x, y) = match (self.mirror, self.rotation & 3) {
            (false, 0) => (left, top),
            (true, 0) => (right, top),
            (false, 1) => (top, right),
            (true, 1) => (bottom, right),
            (false, 2) => (right, bottom),
            (true, 2) => (left, bottom),
            (false, 3) => (bottom, left),
            (true, 3) => (top, left),
            _ => unreachable!("rotation is masked to 0..=3"),
        };
        let size = self.inverse().transform_dimensions(rect.width, rect.height);
        Rect::new(x, y, size.width, size.height)
    }
}
