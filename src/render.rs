/// Rendering engines shipped with the crate.
pub mod backends {
    /// Engine that draws nothing
    pub mod null;
}

mod callback;
mod engine;
mod image;
mod logger;
mod orchestrator;
mod outcome;
mod view;

pub use callback::{DefaultProjectCallback, ProjectCallback, FIRST_DYNAMIC_ID};
pub use engine::{AppInfo, LayoutSource, RenderRequest, RenderResult, RenderingEngine};
pub use image::{PixelFormat, RasterImage};
pub use logger::{LogLogger, RenderLogger};
pub use orchestrator::{render, RenderService};
pub use outcome::{FailureKind, RenderFailure, RenderOutcome, RenderedLayout};
pub use view::{Bounds, ViewNode};
