use std::error::Error;
use std::fmt;
use std::time::Instant;

use log::{debug, info};

use crate::core::actions::generate_fractal::generate_fractal_parallel_rayon::generate_fractal_parallel_rayon;
use crate::core::actions::generate_pixel_buffer::generate_pixel_buffer::{
    GeneratePixelBufferError, generate_pixel_buffer,
};
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::render_params::{RenderParams, RenderParamsError};
use crate::core::fractals::escape_time::algorithm::EscapeTimeAlgorithm;
use crate::core::fractals::escape_time::palette::RainbowPalette;
use crate::core::util::pixel_to_complex_coords::PixelToComplexCoordsError;

#[derive(Debug)]
pub enum RenderError {
    InvalidParams(RenderParamsError),
    Algorithm(PixelToComplexCoordsError),
    PixelBuffer(GeneratePixelBufferError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams(err) => write!(f, "invalid render parameters: {}", err),
            Self::Algorithm(err) => write!(f, "algorithm error: {}", err),
            Self::PixelBuffer(err) => write!(f, "{}", err),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidParams(err) => Some(err),
            Self::Algorithm(err) => Some(err),
            Self::PixelBuffer(err) => Some(err),
        }
    }
}

impl From<RenderParamsError> for RenderError {
    fn from(err: RenderParamsError) -> Self {
        Self::InvalidParams(err)
    }
}

impl From<PixelToComplexCoordsError> for RenderError {
    fn from(err: PixelToComplexCoordsError) -> Self {
        Self::Algorithm(err)
    }
}

impl From<GeneratePixelBufferError> for RenderError {
    fn from(err: GeneratePixelBufferError) -> Self {
        Self::PixelBuffer(err)
    }
}

/// Renders one image: classify every pixel in parallel, then colour it.
///
/// The algorithm and palette are built up front and only read while rows
/// are being evaluated.
pub fn render_fractal(params: &RenderParams) -> Result<PixelBuffer, RenderError> {
    let algorithm = EscapeTimeAlgorithm::new(params)?;
    let palette = RainbowPalette::new(params.max_iterations);

    info!(
        "Rendering {} set, {}x{}, max iterations {}",
        params.kind, params.width, params.height, params.max_iterations
    );
    debug!(
        "origin ({}, {}), zoom {}, fix point ({}, {})",
        params.origin_x, params.origin_y, params.zoom, params.fix_point_x, params.fix_point_y
    );

    let start = Instant::now();
    let iterations = generate_fractal_parallel_rayon(&algorithm)?;
    debug!("escape times computed in {:?}", start.elapsed());

    let pixel_buffer = generate_pixel_buffer(iterations, &palette, params.pixel_rect()?)?;
    info!("Render finished in {:?}", start.elapsed());

    Ok(pixel_buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::generate_fractal::generate_fractal::generate_fractal;
    use crate::core::data::point::Point;
    use crate::core::fractals::escape_time::palette::SENTINEL_COLOUR;
    use crate::core::fractals::fractal_kinds::FractalKinds;

    fn small_params(kind: FractalKinds, max_iterations: u32) -> RenderParams {
        RenderParams {
            width: 10,
            height: 10,
            origin_x: -2.0,
            origin_y: -2.0,
            zoom: 1.0,
            kind,
            fix_point_x: 0.0,
            fix_point_y: 0.0,
            max_iterations,
        }
    }

    #[test]
    fn test_mandelbrot_corner_uses_first_palette_colour() {
        let params = small_params(FractalKinds::Mandelbrot, 50);
        let palette = RainbowPalette::new(50);

        let buffer = render_fractal(&params).unwrap();

        assert_eq!(
            buffer.colour_at(Point { x: 0, y: 0 }).unwrap(),
            palette.colour(0).unwrap()
        );
    }

    #[test]
    fn test_mandelbrot_origin_pixel_is_sentinel() {
        let params = small_params(FractalKinds::Mandelbrot, 50);

        let buffer = render_fractal(&params).unwrap();

        assert_eq!(buffer.colour_at(Point { x: 5, y: 5 }).unwrap(), SENTINEL_COLOUR);
    }

    #[test]
    fn test_julia_zero_fix_point_colours_plane_origin_with_sentinel() {
        let params = small_params(FractalKinds::Julia, 61);

        let buffer = render_fractal(&params).unwrap();

        assert_eq!(buffer.colour_at(Point { x: 5, y: 5 }).unwrap(), SENTINEL_COLOUR);
    }

    #[test]
    fn test_buffer_matches_requested_size() {
        let params = RenderParams {
            width: 31,
            height: 17,
            ..RenderParams::default()
        };

        let buffer = render_fractal(&params).unwrap();

        assert_eq!(buffer.pixel_rect().width(), 31);
        assert_eq!(buffer.pixel_rect().height(), 17);
        assert_eq!(buffer.buffer_size(), 31 * 17 * 4);
    }

    #[test]
    fn test_every_pixel_gets_its_palette_colour() {
        let params = RenderParams {
            width: 40,
            height: 30,
            origin_x: -1.8,
            origin_y: -1.2,
            zoom: 1.3,
            max_iterations: 40,
            ..RenderParams::default()
        };
        let algorithm = EscapeTimeAlgorithm::new(&params).unwrap();
        let palette = RainbowPalette::new(40);
        let iterations = generate_fractal(&algorithm).unwrap();

        let buffer = render_fractal(&params).unwrap();

        for (i, iteration) in iterations.into_iter().enumerate() {
            let point = Point {
                x: (i % 40) as u32,
                y: (i / 40) as u32,
            };
            assert_eq!(
                buffer.colour_at(point).unwrap(),
                palette.colour(iteration).unwrap()
            );
        }
    }

    #[test]
    fn test_invalid_params_are_rejected_before_rendering() {
        let params = RenderParams {
            zoom: -1.0,
            ..RenderParams::default()
        };

        assert!(matches!(
            render_fractal(&params),
            Err(RenderError::InvalidParams(RenderParamsError::InvalidZoom { .. }))
        ));
    }
}
