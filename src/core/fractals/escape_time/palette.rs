use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use std::error::Error;
use std::fmt;

/// Colour for points that never escaped.
pub const SENTINEL_COLOUR: Colour = Colour::BLACK;

const SATURATION: f64 = 1.0;
const VALUE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteError {
    IterationsExceedMax {
        iterations: u32,
        max_iterations: u32,
    },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IterationsExceedMax {
                iterations,
                max_iterations,
            } => {
                write!(
                    f,
                    "iterations {} exceeds maximum {}",
                    iterations, max_iterations
                )
            }
        }
    }
}

impl Error for PaletteError {}

/// `hue` is in turns: 0.0 and 1.0 are both red.
#[must_use]
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> Colour {
    let h = hue.rem_euclid(1.0) * 6.0;
    let c = value * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = value - c;

    let (r, g, b) = if h < 1.0 {
        (c, x, 0.0)
    } else if h < 2.0 {
        (x, c, 0.0)
    } else if h < 3.0 {
        (0.0, c, x)
    } else if h < 4.0 {
        (0.0, x, c)
    } else if h < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Colour {
        r: ((r + m) * 255.0).round() as u8,
        g: ((g + m) * 255.0).round() as u8,
        b: ((b + m) * 255.0).round() as u8,
    }
}

/// Iteration count to colour lookup for one render.
///
/// Holds `max_iterations` colours walking once around the hue wheel, then
/// [`SENTINEL_COLOUR`] at index `max_iterations`.
#[derive(Debug, Clone, PartialEq)]
pub struct RainbowPalette {
    colours: Vec<Colour>,
}

impl ColourMap<u32> for RainbowPalette {
    fn map(&self, iterations: u32) -> Result<Colour, Box<dyn Error + Send + Sync>> {
        self.colour(iterations).map_err(Into::into)
    }
}

impl RainbowPalette {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        let steps = max_iterations as f64;
        let colours = (0..max_iterations)
            .map(|i| hsv_to_rgb(i as f64 / steps, SATURATION, VALUE))
            .chain(std::iter::once(SENTINEL_COLOUR))
            .collect();

        Self { colours }
    }

    pub fn colour(&self, iterations: u32) -> Result<Colour, PaletteError> {
        self.colours
            .get(iterations as usize)
            .copied()
            .ok_or(PaletteError::IterationsExceedMax {
                iterations,
                max_iterations: self.max_iterations(),
            })
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        (self.colours.len() - 1) as u32
    }
}
