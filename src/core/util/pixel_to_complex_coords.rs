use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::data::viewport::Viewport;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PixelToComplexCoordsError {
    PointOutsideRect { point: Point, pixel_rect: PixelRect },
}

impl fmt::Display for PixelToComplexCoordsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointOutsideRect { point, pixel_rect } => {
                write!(
                    f,
                    "point (x: {}, y: {}) is outside the {}x{} pixel rect",
                    point.x,
                    point.y,
                    pixel_rect.width(),
                    pixel_rect.height()
                )
            }
        }
    }
}

impl Error for PixelToComplexCoordsError {}

/// Plane distance between two horizontally (`real`) or vertically (`imag`)
/// adjacent pixels.
#[must_use]
pub fn pixel_step(pixel_rect: PixelRect, viewport: Viewport) -> Complex {
    let extent = viewport.extent();

    Complex {
        real: extent.real / pixel_rect.width() as f64,
        imag: extent.imag / pixel_rect.height() as f64,
    }
}

pub fn pixel_to_complex_coords(
    pixel_position: Point,
    pixel_rect: PixelRect,
    viewport: Viewport,
) -> Result<Complex, PixelToComplexCoordsError> {
    if !pixel_rect.contains_point(pixel_position) {
        return Err(PixelToComplexCoordsError::PointOutsideRect {
            point: pixel_position,
            pixel_rect,
        });
    }

    let step = pixel_step(pixel_rect, viewport);
    let origin = viewport.origin();

    Ok(Complex {
        real: origin.real + pixel_position.x as f64 * step.real,
        imag: origin.imag + pixel_position.y as f64 * step.imag,
    })
}
