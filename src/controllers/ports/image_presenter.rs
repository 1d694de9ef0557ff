use std::error::Error;

use crate::core::data::pixel_buffer::PixelBuffer;

/// Turns a finished render into the bytes of an image file.
pub trait ImagePresenterPort {
    type Failure: Error + Send + Sync + 'static;

    fn present(&self, buffer: PixelBuffer) -> Result<Vec<u8>, Self::Failure>;

    fn content_type(&self) -> &'static str;
}
