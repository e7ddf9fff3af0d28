//! Writing rendered images out.
//!
//! [`materialize`] hands a successful render to an [`ImageSink`] exactly once.
//! A sink error is reported as [`RenderError::SinkWriteFailure`] and never
//! retried.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::errors::{RenderError, SinkError};
use crate::render::{RasterImage, RenderedLayout};

/// Destination for rendered images.
pub trait ImageSink {
    /// Persist `image` at `destination`.
    fn write(&mut self, image: &RasterImage, destination: &Path) -> Result<(), SinkError>;
}

/// Writes the image of `layout` to `destination` and returns the image that
/// was written.
pub fn materialize<'l, S: ImageSink + ?Sized>(
    layout: &'l RenderedLayout,
    sink: &mut S,
    destination: &Path,
) -> Result<&'l RasterImage, RenderError> {
    let image = &layout.image;
    match sink.write(image, destination) {
        Ok(()) => {
            log::info!(
                "Wrote {}x{} image to {}",
                image.width(),
                image.height(),
                destination.display()
            );
            Ok(image)
        }
        Err(source) => {
            log::error!("Cannot write image to {}: {}", destination.display(), source);
            Err(RenderError::SinkWriteFailure { destination: destination.to_path_buf(), source })
        }
    }
}

/// Encodes images as 8-bit RGBA PNG files.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngFileSink;

impl PngFileSink {
    pub fn new() -> Self {
        Self
    }
}

impl ImageSink for PngFileSink {
    fn write(&mut self, image: &RasterImage, destination: &Path) -> Result<(), SinkError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(SinkError::Unsupported(format!(
                "cannot encode a {}x{} image",
                image.width(),
                image.height()
            )));
        }

        let file = File::create(destination)?;
        let mut encoder = png::Encoder::new(BufWriter::new(file), image.width(), image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&image.to_rgba8())?;
        writer.finish()?;
        Ok(())
    }
}

/// Reserves a fresh `tmp-*.png` file in the system temporary directory and
/// returns its path. The file is kept after the call.
pub fn temp_png_destination() -> std::io::Result<PathBuf> {
    let file = tempfile::Builder::new().prefix("tmp-").suffix(".png").tempfile()?;
    file.into_temp_path().keep().map_err(|e| e.error)
}
