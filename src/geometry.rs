//! Watermark placement.
//!
//! A watermark is always placed at one of five anchors. The top-left corner
//! of its bounding box is fully determined by the anchor, the base image size
//! and the watermark size:
//!
//! | Anchor | x | y |
//! |---|---|---|
//! | top-left | 0 | 0 |
//! | top-right | `img_w - wm_w` | 0 |
//! | center | `(img_w - wm_w) / 2` | `(img_h - wm_h) / 2` |
//! | bottom-left | 0 | `img_h - wm_h` |
//! | bottom-right | `img_w - wm_w` | `img_h - wm_h` |
//!
//! Offsets are not clamped. A watermark larger than the base image yields
//! negative offsets; compositing clips to the overlap.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Placement anchor for a watermark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// Upper-left corner.
    TopLeft,
    /// Upper-right corner.
    TopRight,
    /// Centered on both axes.
    Center,
    /// Lower-left corner.
    BottomLeft,
    /// Lower-right corner.
    #[default]
    BottomRight,
}

impl Anchor {
    /// All anchors, in display order.
    pub const ALL: [Anchor; 5] = [
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::Center,
        Anchor::BottomLeft,
        Anchor::BottomRight,
    ];

    /// Canonical name, as accepted by [`Anchor::from_str`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Anchor::TopLeft => "top-left",
            Anchor::TopRight => "top-right",
            Anchor::Center => "center",
            Anchor::BottomLeft => "bottom-left",
            Anchor::BottomRight => "bottom-right",
        }
    }

    /// Top-left corner of the watermark in base image coordinates.
    ///
    /// `center` rounds toward the top-left when the difference is odd
    /// (floor division), so results are deterministic for negative
    /// differences too.
    #[must_use]
    pub fn offset(self, img_w: u32, img_h: u32, wm_w: u32, wm_h: u32) -> (i64, i64) {
        let dx = i64::from(img_w) - i64::from(wm_w);
        let dy = i64::from(img_h) - i64::from(wm_h);

        match self {
            Anchor::TopLeft => (0, 0),
            Anchor::TopRight => (dx, 0),
            Anchor::Center => (dx.div_euclid(2), dy.div_euclid(2)),
            Anchor::BottomLeft => (0, dy),
            Anchor::BottomRight => (dx, dy),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Anchor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "top-left" => Ok(Anchor::TopLeft),
            "top-right" => Ok(Anchor::TopRight),
            "center" | "centre" => Ok(Anchor::Center),
            "bottom-left" => Ok(Anchor::BottomLeft),
            "bottom-right" => Ok(Anchor::BottomRight),
            _ => Err(Error::InvalidParameter(format!(
                "unknown anchor '{s}' (expected top-left, top-right, center, bottom-left or bottom-right)"
            ))),
        }
    }
}
