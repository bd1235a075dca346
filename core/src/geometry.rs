use serde::{Deserialize, Serialize};

/// Bounding box in viewport pixels, as reported by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn has_area(&self) -> bool {
        self.width != 0.0 && self.height != 0.0
    }
}

/// Origin used for tiles that did not exist before a re-render. Fresh nodes
/// otherwise appear to come from the left border of the window.
pub const FALLBACK_ORIGIN: Rect = Rect::new(0.0, 100.0, 1.0, 1.0);

/// Inverse transform that maps an element's new box back onto its old one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipTransform {
    pub dx: f64,
    pub dy: f64,
    pub sx: f64,
    pub sy: f64,
}

impl FlipTransform {
    /// `current` must have a non-zero size, otherwise the scale is not finite.
    pub fn invert(previous: &Rect, current: &Rect) -> Self {
        Self {
            dx: previous.x - current.x,
            dy: previous.y - current.y,
            sx: previous.width / current.width,
            sy: previous.height / current.height,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite() && self.sx.is_finite() && self.sy.is_finite()
    }

    pub fn to_css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({}, {})",
            self.dx, self.dy, self.sx, self.sy
        )
    }
}
