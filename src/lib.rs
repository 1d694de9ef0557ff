//! Escape-time fractal renderer served as PNG over HTTP.

pub mod controllers;
pub mod core;
pub mod presenters;

pub use crate::controllers::http::router::Router;
pub use crate::controllers::http::server::{HttpError, ServerConfig, serve};
pub use crate::core::actions::render_fractal::{RenderError, render_fractal};
pub use crate::core::data::pixel_buffer::PixelBuffer;
pub use crate::core::data::render_params::RenderParams;
pub use crate::core::fractals::fractal_kinds::FractalKinds;
pub use crate::presenters::file::png::PngPresenter;
