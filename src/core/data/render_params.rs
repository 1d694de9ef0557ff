use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::viewport::{Viewport, ViewportError};
use crate::core::fractals::fractal_kinds::FractalKinds;
use std::error::Error;
use std::fmt;

pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 1000;
pub const DEFAULT_ORIGIN: Complex = Complex { real: -2.0, imag: -2.0 };
pub const DEFAULT_ZOOM: f64 = 1.0;
pub const DEFAULT_FIX_POINT: Complex = Complex { real: -0.7, imag: 0.27 };
pub const DEFAULT_MAX_ITERATIONS: u32 = 51;

pub const MAX_DIMENSION: u32 = 4000;
pub const MAX_ITERATIONS_LIMIT: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderParamsError {
    ZeroWidth,
    ZeroHeight,
    DimensionTooLarge { width: u32, height: u32 },
    InvalidZoom { zoom: f64 },
    NonFiniteCoordinate,
    ZeroMaxIterations,
    TooManyIterations { max_iterations: u32 },
}

impl fmt::Display for RenderParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroWidth => write!(f, "image width must be greater than zero"),
            Self::ZeroHeight => write!(f, "image height must be greater than zero"),
            Self::DimensionTooLarge { width, height } => {
                write!(
                    f,
                    "image size {}x{} exceeds the {}x{} limit",
                    width, height, MAX_DIMENSION, MAX_DIMENSION
                )
            }
            Self::InvalidZoom { zoom } => {
                write!(f, "zoom must be a finite number greater than zero, got {}", zoom)
            }
            Self::NonFiniteCoordinate => {
                write!(f, "origin and fix point coordinates must be finite numbers")
            }
            Self::ZeroMaxIterations => write!(f, "Maximum iterations must be greater than zero"),
            Self::TooManyIterations { max_iterations } => {
                write!(
                    f,
                    "maximum iterations {} exceeds the limit of {}",
                    max_iterations, MAX_ITERATIONS_LIMIT
                )
            }
        }
    }
}

impl Error for RenderParamsError {}

impl From<ViewportError> for RenderParamsError {
    fn from(err: ViewportError) -> Self {
        match err {
            ViewportError::InvalidZoom { zoom } => Self::InvalidZoom { zoom },
        }
    }
}

/// Everything one render needs. Nothing about a render is implicit: the
/// HTTP layer fills this in from its defaults and the query string.
///
/// In Julia mode the origin still positions the viewport; the fix point is
/// the constant `c` shared by every pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    pub width: u32,
    pub height: u32,
    pub origin_x: f64,
    pub origin_y: f64,
    pub zoom: f64,
    pub kind: FractalKinds,
    pub fix_point_x: f64,
    pub fix_point_y: f64,
    pub max_iterations: u32,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            origin_x: DEFAULT_ORIGIN.real,
            origin_y: DEFAULT_ORIGIN.imag,
            zoom: DEFAULT_ZOOM,
            kind: FractalKinds::default(),
            fix_point_x: DEFAULT_FIX_POINT.real,
            fix_point_y: DEFAULT_FIX_POINT.imag,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl RenderParams {
    pub fn validate(&self) -> Result<(), RenderParamsError> {
        if self.width == 0 {
            return Err(RenderParamsError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(RenderParamsError::ZeroHeight);
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(RenderParamsError::DimensionTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_iterations == 0 {
            return Err(RenderParamsError::ZeroMaxIterations);
        }
        if self.max_iterations > MAX_ITERATIONS_LIMIT {
            return Err(RenderParamsError::TooManyIterations {
                max_iterations: self.max_iterations,
            });
        }

        let coordinates = [self.origin_x, self.origin_y, self.fix_point_x, self.fix_point_y];
        if !coordinates.iter().all(|c| c.is_finite()) {
            return Err(RenderParamsError::NonFiniteCoordinate);
        }

        self.viewport()?;
        Ok(())
    }

    pub fn viewport(&self) -> Result<Viewport, ViewportError> {
        Viewport::new(self.origin(), self.zoom)
    }

    pub fn pixel_rect(&self) -> Result<PixelRect, RenderParamsError> {
        PixelRect::new(self.width, self.height).map_err(|_| {
            if self.width == 0 {
                RenderParamsError::ZeroWidth
            } else {
                RenderParamsError::ZeroHeight
            }
        })
    }

    #[must_use]
    pub fn origin(&self) -> Complex {
        Complex::new(self.origin_x, self.origin_y)
    }

    #[must_use]
    pub fn fix_point(&self) -> Complex {
        Complex::new(self.fix_point_x, self.fix_point_y)
    }
}
