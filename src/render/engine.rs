//! The rendering engine seam.
//!
//! The engine is an external component that measures, lays out and paints a
//! layout document. The orchestrator hands it one [`RenderRequest`] and gets
//! back one [`RenderResult`]. Anything implementing [`RenderingEngine`] can
//! stand in for it, including test doubles and the
//! [`NullEngine`](crate::render::backends::null::NullEngine).

use std::path::PathBuf;

use crate::config::DeviceConfiguration;
use crate::render::callback::ProjectCallback;
use crate::render::image::RasterImage;
use crate::render::logger::RenderLogger;
use crate::render::outcome::FailureKind;
use crate::render::view::ViewNode;
use crate::resources::ResourceResolution;

/// Application identity shown by decor such as an action bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    pub app_name: String,
    pub icon_name: String,
}

impl AppInfo {
    pub fn new<N: Into<String>, I: Into<String>>(app_name: N, icon_name: I) -> Self {
        Self { app_name: app_name.into(), icon_name: icon_name.into() }
    }
}

/// Layout document to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSource {
    pub name: String,
    /// File the document was read from, if it came from disk.
    pub path: Option<PathBuf>,
    pub contents: String,
}

/// Everything the engine receives for one render.
pub struct RenderRequest<'r> {
    pub resolution: &'r ResourceResolution<'r>,
    pub config: &'r DeviceConfiguration,
    pub callback: &'r dyn ProjectCallback,
    pub logger: &'r dyn RenderLogger,
    pub app_info: Option<&'r AppInfo>,
    pub layout: LayoutSource,
}

impl RenderRequest<'_> {
    /// Screen size in pixels, width first.
    pub fn screen_size(&self) -> (u32, u32) {
        (self.config.screen_width_px(), self.config.screen_height_px())
    }
}

/// Status and payload returned by the engine.
#[derive(Debug)]
pub struct RenderResult {
    pub success: bool,
    pub error_message: Option<String>,
    pub cause: Option<anyhow::Error>,
    /// Classification of a failure. Ignored on success.
    pub kind: FailureKind,
    pub image: Option<RasterImage>,
    /// Top-level views. `None` is the same as an empty list.
    pub root_views: Option<Vec<ViewNode>>,
}

impl RenderResult {
    pub fn success(image: RasterImage, root_views: Vec<ViewNode>) -> Self {
        Self {
            success: true,
            error_message: None,
            cause: None,
            kind: FailureKind::EngineInternal,
            image: Some(image),
            root_views: Some(root_views),
        }
    }

    pub fn failure<S: Into<String>>(message: S) -> Self {
        Self {
            success: false,
            error_message: Some(message.into()),
            cause: None,
            kind: FailureKind::EngineInternal,
            image: None,
            root_views: None,
        }
    }

    pub fn with_cause(mut self, cause: impl Into<anyhow::Error>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn with_kind(mut self, kind: FailureKind) -> Self {
        self.kind = kind;
        self
    }
}

/// External rendering engine. Called exactly once per render request, on the
/// caller's thread; the call may block for as long as rendering takes.
pub trait RenderingEngine {
    fn name(&self) -> &str;

    /// Render `request`. An `Err` is an engine fault rather than a reported
    /// render failure; the orchestrator classifies both the same way.
    fn render(&mut self, request: &RenderRequest<'_>) -> anyhow::Result<RenderResult>;
}
