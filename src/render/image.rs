use anyhow::{anyhow, ensure, Result};

/// Pixel layouts an engine may hand back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// Straight-alpha RGBA, one byte per channel.
    Rgba8,
    /// Premultiplied ARGB in native-endian 32-bit words (B, G, R, A bytes on little endian).
    PreMulArgb32,
}

impl PixelFormat {
    pub fn bytes_per_pixel(&self) -> u32 {
        4
    }
}

/// In-memory rendered image.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterImage {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    stride: u32,
    format: PixelFormat,
}

impl RasterImage {
    /// Wraps a pixel buffer. `stride` is the byte distance between rows.
    pub fn from_raw(pixels: Vec<u8>, width: u32, height: u32, stride: u32, format: PixelFormat) -> Result<Self> {
        ensure!(
            stride as u64 >= width as u64 * format.bytes_per_pixel() as u64,
            "stride {stride} is too small for a row of {width} pixels"
        );
        ensure!(
            pixels.len() as u64 >= height as u64 * stride as u64,
            "pixel buffer of {} bytes is too small for {width}x{height} with stride {stride}",
            pixels.len()
        );

        Ok(Self { pixels, width, height, stride, format })
    }

    /// Fully transparent image. Fails when the buffer size is not addressable.
    pub fn blank(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let stride = width
            .checked_mul(format.bytes_per_pixel())
            .ok_or_else(|| anyhow!("a row of {width} pixels overflows the stride"))?;
        let len = stride as u64 * height as u64;
        ensure!(len <= isize::MAX as u64, "a {width}x{height} image does not fit in memory");

        Ok(Self {
            pixels: vec![0u8; len as usize],
            width,
            height,
            stride,
            format,
        })
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }
    pub fn stride(&self) -> u32 { self.stride }
    pub fn format(&self) -> PixelFormat { self.format }
    pub fn pixels(&self) -> &[u8] { &self.pixels }

    /// Straight-alpha RGBA value at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = y as usize * self.stride as usize + x as usize * 4;
        let raw = &self.pixels[offset..offset + 4];
        Some(match self.format {
            PixelFormat::Rgba8 => [raw[0], raw[1], raw[2], raw[3]],
            PixelFormat::PreMulArgb32 => {
                let word = u32::from_ne_bytes([raw[0], raw[1], raw[2], raw[3]]);
                let a = (word >> 24) as u8;
                let unpremultiply = |c: u32| -> u8 {
                    if a == 0 { 0 } else { ((c & 0xff) * 255 / a as u32).min(255) as u8 }
                };
                [unpremultiply(word >> 16), unpremultiply(word >> 8), unpremultiply(word), a]
            }
        })
    }

    /// Tightly packed straight-alpha RGBA rows, as image encoders expect.
    pub fn to_rgba8(&self) -> Vec<u8> {
        if self.format == PixelFormat::Rgba8 && self.stride == self.width * 4 {
            return self.pixels[..(self.stride as usize * self.height as usize)].to_vec();
        }
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize * 4);
        for y in 0..self.height {
            for x in 0..self.width {
                out.extend_from_slice(&self.pixel(x, y).unwrap_or_default());
            }
        }
        out
    }
}

impl std::fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("len", &self.pixels.len())
            .finish()
    }
}
