use anyhow::Result;

use crate::render::engine::{RenderRequest, RenderResult, RenderingEngine};
use crate::render::image::{PixelFormat, RasterImage};
use crate::render::view::{Bounds, ViewNode};

/// Engine that does not draw anything.
///
/// Returns a transparent image of the configured screen size and a single
/// root `FrameLayout` covering it. Useful to exercise the pipeline without a
/// real layout library.
#[derive(Debug, Default)]
pub struct NullEngine {
    /// Number of renders served, used to tag log output.
    frame_id: u64,
}

impl NullEngine {
    /// Creates a new instance of the null engine.
    pub fn new() -> Self {
        Self { frame_id: 0 }
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frame_id
    }
}

impl RenderingEngine for NullEngine {
    fn name(&self) -> &str {
        "NullEngine"
    }

    fn render(&mut self, request: &RenderRequest<'_>) -> Result<RenderResult> {
        self.frame_id = self.frame_id.wrapping_add(1);

        let (width, height) = request.screen_size();
        request.logger.fidelity_warning(
            Some("null"),
            &format!("frame {}: '{}' is not drawn by the null engine", self.frame_id, request.layout.name),
        );

        let image = RasterImage::blank(width, height, PixelFormat::Rgba8)?;
        let root = ViewNode::new("FrameLayout", Bounds::new(0, 0, width as i32, height as i32));
        Ok(RenderResult::success(image, vec![root]))
    }
}
