use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageError};

use crate::controllers::ports::image_presenter::ImagePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;

pub const PNG_CONTENT_TYPE: &str = "image/png";

pub struct PngPresenter {}

impl ImagePresenterPort for PngPresenter {
    type Failure = ImageError;

    fn present(&self, buffer: PixelBuffer) -> Result<Vec<u8>, Self::Failure> {
        let width = buffer.pixel_rect().width();
        let height = buffer.pixel_rect().height();
        let mut bytes = Vec::new();

        PngEncoder::new(&mut bytes).write_image(
            &buffer.into_data(),
            width,
            height,
            ExtendedColorType::Rgba8,
        )?;

        Ok(bytes)
    }

    fn content_type(&self) -> &'static str {
        PNG_CONTENT_TYPE
    }
}

impl Default for PngPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl PngPresenter {
    pub fn new() -> Self {
        Self {}
    }
}
