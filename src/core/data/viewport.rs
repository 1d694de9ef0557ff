use crate::core::data::complex::Complex;
use std::error::Error;
use std::fmt;

/// Corner of the canonical `[-2, 2] x [-2, 2]` square that every viewport
/// is measured against.
pub const REFERENCE_CORNER: Complex = Complex { real: 2.0, imag: 2.0 };

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ViewportError {
    InvalidZoom { zoom: f64 },
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidZoom { zoom } => {
                write!(f, "zoom must be a finite number greater than zero, got {}", zoom)
            }
        }
    }
}

impl Error for ViewportError {}

/// Region of the complex plane sampled by one render.
///
/// The region starts at `origin` and extends towards [`REFERENCE_CORNER`],
/// shrunk by `zoom`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    origin: Complex,
    zoom: f64,
}

impl Viewport {
    pub fn new(origin: Complex, zoom: f64) -> Result<Self, ViewportError> {
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(ViewportError::InvalidZoom { zoom });
        }

        Ok(Self { origin, zoom })
    }

    #[must_use]
    pub fn origin(&self) -> Complex {
        self.origin
    }

    /// Plane distance covered by the viewport along each axis.
    #[must_use]
    pub fn extent(&self) -> Complex {
        let span = REFERENCE_CORNER - self.origin;

        Complex {
            real: span.real.abs() / self.zoom,
            imag: span.imag.abs() / self.zoom,
        }
    }
}
