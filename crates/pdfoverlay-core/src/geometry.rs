//! Coordinate spaces and the conversions between them.
//!
//! Three spaces are involved when overlaying fields on a rendered page:
//!
//! - **page space**: the source document's own units ([`SourceBox`]),
//!   with either a top-left or a bottom-left origin ([`Origin`]);
//! - **normalized space**: percentages (0–100) of the field's own page
//!   width and height ([`NormalizedRect`]);
//! - **pixel space**: on-screen pixels relative to the rendered page box
//!   ([`PixelRect`]).
//!
//! All functions here are pure. Conversions that divide by a page or
//! viewport dimension return [`OverlayError::InvalidMetrics`] instead of
//! producing infinite or NaN coordinates.

use crate::error::OverlayError;

/// Width and height of a page (page space) or a viewport (pixel space).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// US Letter in points, used when the analysis omits a page's metrics.
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns true if both dimensions are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        is_positive(self.width) && is_positive(self.height)
    }

    /// Check that this size can be used as a divisor.
    pub fn validate(&self, page: Option<u32>) -> Result<(), OverlayError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(OverlayError::InvalidMetrics {
                page,
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::LETTER
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Where the y axis of page space starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Origin {
    /// y grows downward from the top edge (PyMuPDF, pdf.js viewport).
    #[default]
    TopLeft,
    /// y grows upward from the bottom edge (native PDF user space).
    BottomLeft,
}

/// A bounding box in page space.
///
/// Corners are kept ordered: `x0 <= x1` and `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl SourceBox {
    /// Create a box, reordering the corners if they were given swapped.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Build a box from a `[x0, y0, x1, y1]` array as emitted by the analysis
    /// service. Returns `None` for short arrays or non-finite values.
    pub fn from_slice(coords: &[f64]) -> Option<Self> {
        match coords {
            [x0, y0, x1, y1, ..] if coords[..4].iter().all(|v| v.is_finite()) => {
                Some(Self::new(*x0, *y0, *x1, *y1))
            }
            _ => None,
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Re-express this box with a top-left origin.
    ///
    /// Boxes that already use a top-left origin are returned unchanged;
    /// bottom-left boxes are flipped against `page_height`.
    pub fn to_top_left(self, origin: Origin, page_height: f64) -> Self {
        match origin {
            Origin::TopLeft => self,
            Origin::BottomLeft => {
                Self::new(self.x0, page_height - self.y1, self.x1, page_height - self.y0)
            }
        }
    }
}

/// A rectangle in normalized space: percentages of the page width/height.
///
/// Values are not clamped to 0–100; detected fields may poke slightly past
/// a page edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A rectangle in viewport pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    /// Returns true if the point lies inside the rectangle (edges included).
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

/// Convert a top-left page-space box into normalized space.
pub fn to_normalized(
    bbox: &SourceBox,
    page_width: f64,
    page_height: f64,
) -> Result<NormalizedRect, OverlayError> {
    PageSize::new(page_width, page_height).validate(None)?;
    Ok(NormalizedRect {
        x: bbox.x0 / page_width * 100.0,
        y: bbox.y0 / page_height * 100.0,
        width: bbox.width() / page_width * 100.0,
        height: bbox.height() / page_height * 100.0,
    })
}

/// Scale a normalized rectangle onto a viewport of the given pixel size.
pub fn to_pixels(rect: &NormalizedRect, viewport_width: f64, viewport_height: f64) -> PixelRect {
    PixelRect {
        x: rect.x / 100.0 * viewport_width,
        y: rect.y / 100.0 * viewport_height,
        width: rect.width / 100.0 * viewport_width,
        height: rect.height / 100.0 * viewport_height,
    }
}

/// Convert a pointer movement in pixels into a normalized-space delta.
pub fn pixel_delta_to_normalized(
    dx: f64,
    dy: f64,
    viewport_width: f64,
    viewport_height: f64,
) -> Result<(f64, f64), OverlayError> {
    PageSize::new(viewport_width, viewport_height).validate(None)?;
    Ok((dx / viewport_width * 100.0, dy / viewport_height * 100.0))
}

/// Convert a pixel position inside the viewport into normalized coordinates.
///
/// This is the inverse of [`to_pixels`] for a single point.
pub fn pixel_point_to_normalized(
    px: f64,
    py: f64,
    viewport_width: f64,
    viewport_height: f64,
) -> Result<(f64, f64), OverlayError> {
    pixel_delta_to_normalized(px, py, viewport_width, viewport_height)
}
