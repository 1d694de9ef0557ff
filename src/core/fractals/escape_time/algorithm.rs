use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::data::render_params::{RenderParams, RenderParamsError};
use crate::core::data::viewport::Viewport;
use crate::core::fractals::fractal_kinds::FractalKinds;
use crate::core::util::pixel_to_complex_coords::{
    PixelToComplexCoordsError, pixel_to_complex_coords,
};
use std::ops::ControlFlow;

/// Squared escape radius: `|z| > 2` without the square root.
pub const DIVERGENCE_THRESHOLD: f64 = 4.0;

/// Counts recurrence steps until `z` leaves the radius-2 disc.
///
/// Iteration `n` applies one step of `z = z² + c` and then tests the new
/// `z`, so a point already outside the disc after the first step returns 0.
/// Returns `max_iterations` when no step escapes.
#[must_use]
pub fn escape_time(
    sample: Complex,
    kind: FractalKinds,
    fix_point: Complex,
    max_iterations: u32,
) -> u32 {
    let (z0, c) = match kind {
        FractalKinds::Mandelbrot => (Complex::ZERO, sample),
        FractalKinds::Julia => (sample, fix_point),
    };

    let iterations = (0..max_iterations).try_fold(z0, |z, iteration| {
        let next = z.square() + c;
        if next.magnitude_squared() > DIVERGENCE_THRESHOLD {
            ControlFlow::Break(iteration)
        } else {
            ControlFlow::Continue(next)
        }
    });

    match iterations {
        ControlFlow::Break(iteration) => iteration,
        ControlFlow::Continue(_) => max_iterations,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscapeTimeAlgorithm {
    pixel_rect: PixelRect,
    viewport: Viewport,
    kind: FractalKinds,
    fix_point: Complex,
    max_iterations: u32,
}

impl FractalAlgorithm for EscapeTimeAlgorithm {
    type Success = u32;
    type Failure = PixelToComplexCoordsError;

    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
        let sample = pixel_to_complex_coords(pixel, self.pixel_rect, self.viewport)?;

        Ok(escape_time(sample, self.kind, self.fix_point, self.max_iterations))
    }

    fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }
}

impl EscapeTimeAlgorithm {
    pub fn new(params: &RenderParams) -> Result<Self, RenderParamsError> {
        params.validate()?;

        Ok(Self {
            pixel_rect: params.pixel_rect()?,
            viewport: params.viewport()?,
            kind: params.kind,
            fix_point: params.fix_point(),
            max_iterations: params.max_iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mandelbrot(c: Complex, max_iterations: u32) -> u32 {
        escape_time(c, FractalKinds::Mandelbrot, Complex::ZERO, max_iterations)
    }

    #[test]
    fn point_far_outside_escapes_immediately() {
        assert_eq!(mandelbrot(Complex::new(3.0, 0.0), 50), 0);
        assert_eq!(mandelbrot(Complex::new(-2.0, -2.0), 50), 0);
    }

    #[test]
    fn points_beyond_radius_two_escape_at_first_step() {
        let outside = [
            Complex::new(2.01, 0.0),
            Complex::new(0.0, -2.5),
            Complex::new(-1.5, 1.5),
            Complex::new(10.0, 10.0),
        ];

        for c in outside {
            assert_eq!(mandelbrot(c, 100), 0, "{:?} did not escape at once", c);
        }
    }

    #[test]
    fn origin_never_escapes() {
        for max_iterations in [1, 2, 51, 61, 1000] {
            assert_eq!(mandelbrot(Complex::ZERO, max_iterations), max_iterations);
        }
    }

    #[test]
    fn minus_two_stays_on_the_boundary() {
        // -2 -> 2 -> 2 -> ... never leaves |z| <= 2.
        assert_eq!(mandelbrot(Complex::new(-2.0, 0.0), 100), 100);
    }

    #[test]
    fn escape_count_for_known_point() {
        // c = 1: z = 1, 2, 5 -> escapes on the third step.
        assert_eq!(mandelbrot(Complex::new(1.0, 0.0), 100), 2);
    }

    #[test]
    fn evaluation_is_repeatable() {
        let c = Complex::new(-0.75, 0.1);

        assert_eq!(mandelbrot(c, 500), mandelbrot(c, 500));
        assert_eq!(
            escape_time(c, FractalKinds::Julia, Complex::new(-0.7, 0.27), 500),
            escape_time(c, FractalKinds::Julia, Complex::new(-0.7, 0.27), 500)
        );
    }

    #[test]
    fn julia_with_zero_fix_point_keeps_origin_inside() {
        assert_eq!(escape_time(Complex::ZERO, FractalKinds::Julia, Complex::ZERO, 61), 61);
    }

    #[test]
    fn julia_uses_sample_as_starting_value() {
        // Fix point 0 squares the sample each step: 1.2 -> 1.44 -> 2.07.
        let sample = Complex::new(1.2, 0.0);

        assert_eq!(escape_time(sample, FractalKinds::Julia, Complex::ZERO, 50), 1);
        assert_eq!(mandelbrot(sample, 50), 1);
        assert_eq!(
            escape_time(Complex::new(0.5, 0.0), FractalKinds::Julia, Complex::ZERO, 50),
            50
        );
        assert_eq!(mandelbrot(Complex::new(0.5, 0.0), 50), 4);
    }

    #[test]
    fn doubling_iterations_never_lowers_counts() {
        let samples = (0..40).flat_map(|i| {
            (0..40).map(move |j| Complex::new(-2.0 + i as f64 * 0.1, -2.0 + j as f64 * 0.1))
        });

        for c in samples {
            for kind in [FractalKinds::Mandelbrot, FractalKinds::Julia] {
                let fix_point = Complex::new(-0.4, 0.6);
                let low = escape_time(c, kind, fix_point, 30);
                let high = escape_time(c, kind, fix_point, 60);

                assert!(high >= low);
                if low < 30 {
                    assert_eq!(high, low);
                }
            }
        }
    }

    #[test]
    fn algorithm_rejects_invalid_params() {
        let params = RenderParams { max_iterations: 0, ..RenderParams::default() };

        assert_eq!(
            EscapeTimeAlgorithm::new(&params),
            Err(RenderParamsError::ZeroMaxIterations)
        );
    }

    #[test]
    fn compute_maps_pixel_before_evaluating() {
        let params = RenderParams {
            width: 10,
            height: 10,
            max_iterations: 50,
            ..RenderParams::default()
        };
        let algorithm = EscapeTimeAlgorithm::new(&params).unwrap();

        assert_eq!(algorithm.compute(Point { x: 0, y: 0 }), Ok(0));
        assert_eq!(algorithm.compute(Point { x: 5, y: 5 }), Ok(50));
    }

    #[test]
    fn compute_returns_error_for_pixel_outside_pixel_rect() {
        let params = RenderParams { width: 10, height: 10, ..RenderParams::default() };
        let algorithm = EscapeTimeAlgorithm::new(&params).unwrap();
        let point = Point { x: 11, y: 0 };

        assert_eq!(
            algorithm.compute(point),
            Err(PixelToComplexCoordsError::PointOutsideRect {
                point,
                pixel_rect: algorithm.pixel_rect()
            })
        );
    }
}
