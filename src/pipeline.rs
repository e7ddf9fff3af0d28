//! End-to-end render of a [`RenderJob`].
//!
//! Loads the resource stores if needed, binds the theme, renders the layout
//! once, writes the image and lists the view hierarchy. The first failing step
//! ends the run and its error is returned to the caller.

use std::path::PathBuf;

use crate::config::RenderJob;
use crate::errors::{RenderError, SinkError};
use crate::output::{materialize, temp_png_destination, ImageSink};
use crate::render::{render, DefaultProjectCallback, LogLogger, RenderingEngine, ViewNode};
use crate::resources::{ResourceBinder, ResourceStore};
use crate::walker;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
    /// Where the image was written.
    pub destination: PathBuf,
    pub image_size: (u32, u32),
    pub root_views: Vec<ViewNode>,
}

impl RenderReport {
    /// Tab-indented view listing, one line per view.
    pub fn listing(&self) -> String {
        walker::render_text(&self.root_views)
    }

    pub fn view_count(&self) -> usize {
        walker::walk(&self.root_views).count()
    }
}

fn loaded(store: &mut dyn ResourceStore) -> Result<&dyn ResourceStore, RenderError> {
    if !store.is_loaded() {
        log::debug!("Loading resources from {}", store.location());
        store.load_resources()?;
    }
    Ok(&*store)
}

/// Runs `job` against `project` (and `framework`, for framework themes and
/// `@android:` references).
pub fn run<E, S>(
    job: &RenderJob,
    project: &mut dyn ResourceStore,
    framework: Option<&mut dyn ResourceStore>,
    engine: &mut E,
    sink: &mut S,
) -> Result<RenderReport, RenderError>
where
    E: RenderingEngine + ?Sized,
    S: ImageSink + ?Sized,
{
    let framework = framework.map(loaded).transpose()?;
    let project = loaded(project)?;

    let binder = match framework {
        Some(framework) => ResourceBinder::with_framework(framework),
        None => ResourceBinder::new(),
    };
    let resolution = binder.bind(project, &job.device, &job.theme.name, job.theme.is_project_theme)?;

    let callback = DefaultProjectCallback::default();
    let layout = render(
        engine,
        &resolution,
        &job.device,
        &callback,
        &LogLogger,
        job.app_info.as_ref(),
        &job.layout,
    )
    .into_result()?;

    let destination = match &job.output {
        Some(path) => path.clone(),
        None => temp_png_destination().map_err(|e| RenderError::SinkWriteFailure {
            destination: std::env::temp_dir(),
            source: SinkError::Io(e),
        })?,
    };
    let image = materialize(&layout, sink, &destination)?;

    let report = RenderReport {
        destination,
        image_size: (image.width(), image.height()),
        root_views: layout.root_views,
    };
    log::info!("Render of '{}' finished with {} view(s)", job.layout, report.view_count());
    Ok(report)
}
