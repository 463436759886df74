//! Integer pixel geometry shared by the layout engine and its collaborators.

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Same size with the axes exchanged.
    pub const fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Strictly wider than tall.
    pub const fn is_landscape(self) -> bool {
        self.width > self.height
    }

    /// Whether either axis is zero.
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect at the origin covering `size`.
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether this rect covers the full area (no actual crop).
    pub fn is_full(&self, w: u32, h: u32) -> bool {
        self.x == 0 && self.y == 0 && self.width == w && self.height == h
    }

    /// Whether this rect lies entirely inside `(0, 0, w, h)`.
    pub fn fits_within(&self, w: u32, h: u32) -> bool {
        self.x as u64 + self.width as u64 <= w as u64
            && self.y as u64 + self.height as u64 <= h as u64
    }
}

/// Per-edge pixel amounts, CSS order.
///
/// Used for both the overhang cropped off a filled page and the blank
/// margins around a fitted image.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Insets {
    pub const ZERO: Self = Self {
        top: 0,
        right: 0,
        bottom: 0,
        left: 0,
    };

    /// Center `horizontal` and `vertical` pixels of slack.
    ///
    /// Odd amounts put the extra pixel on the right/bottom edge.
    pub const fn centered(horizontal: u32, vertical: u32) -> Self {
        let left = horizontal / 2;
        let top = vertical / 2;
        Self {
            top,
            right: horizontal - left,
            bottom: vertical - top,
            left,
        }
    }

    pub const fn horizontal(&self) -> u32 {
        self.left + self.right
    }

    pub const fn vertical(&self) -> u32 {
        self.top + self.bottom
    }

    pub const fn is_zero(&self) -> bool {
        self.top == 0 && self.right == 0 && self.bottom == 0 && self.left == 0
    }
}
