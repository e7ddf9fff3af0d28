//! Render orchestration.
//!
//! One call to [`render`] composes a request, dispatches it to the engine
//! exactly once and classifies what comes back. Every fault past this point
//! (unreadable layout, engine error, engine panic, engine-reported failure)
//! ends up as [`RenderOutcome::Failure`]; nothing is re-thrown.

use std::fs;
use std::panic::{self, AssertUnwindSafe};

use crate::config::DeviceConfiguration;
use crate::render::callback::ProjectCallback;
use crate::render::engine::{AppInfo, LayoutSource, RenderRequest, RenderResult, RenderingEngine};
use crate::render::logger::{LogLogger, RenderLogger};
use crate::render::outcome::{FailureKind, RenderFailure, RenderOutcome, RenderedLayout};
use crate::resources::{ResourceResolution, ResourceType, ResourceValue};

static DEFAULT_LOGGER: LogLogger = LogLogger;

/// Renders `layout_name` with `engine`.
///
/// `resolution` must have been bound for `config`; a mismatch is logged and
/// the request is dispatched with `config` as given.
pub fn render<E: RenderingEngine + ?Sized>(
    engine: &mut E,
    resolution: &ResourceResolution<'_>,
    config: &DeviceConfiguration,
    callback: &dyn ProjectCallback,
    logger: &dyn RenderLogger,
    app_info: Option<&AppInfo>,
    layout_name: &str,
) -> RenderOutcome {
    if resolution.config() != config {
        log::warn!(
            "Resources were bound for {} but rendering for {}",
            resolution.config(),
            config
        );
    }

    let layout = match compose(resolution, layout_name) {
        Ok(layout) => layout,
        Err(failure) => {
            log::warn!("Cannot compose render of '{}': {}", layout_name, failure);
            return RenderOutcome::Failure(failure);
        }
    };

    let request = RenderRequest { resolution, config, callback, logger, app_info, layout };
    log::info!("Rendering layout '{}' with {} on {}", layout_name, engine.name(), config);

    let outcome = dispatch(engine, &request);
    match &outcome {
        RenderOutcome::Success(layout) => log::info!(
            "Rendered '{}': {}x{} image, {} root view(s)",
            layout_name,
            layout.image.width(),
            layout.image.height(),
            layout.root_views.len()
        ),
        RenderOutcome::Failure(failure) => log::warn!("Rendering '{}' failed: {}", layout_name, failure),
    }
    outcome
}

/// Resource names are `[A-Za-z0-9_.]` and do not start with a digit.
fn is_valid_layout_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

fn compose(resolution: &ResourceResolution<'_>, layout_name: &str) -> Result<LayoutSource, RenderFailure> {
    if !is_valid_layout_name(layout_name) {
        return Err(RenderFailure::new(
            FailureKind::MalformedInput,
            format!("'{layout_name}' is not a valid layout name"),
        ));
    }

    let value = resolution
        .find_resource(ResourceType::Layout, layout_name, false)
        .or_else(|| resolution.find_resource(ResourceType::Layout, layout_name, true))
        .ok_or_else(|| {
            RenderFailure::new(
                FailureKind::ResourceReadFailure,
                format!("layout '{layout_name}' not found for {}", resolution.config()),
            )
        })?;

    let (path, contents) = match value {
        ResourceValue::Inline(contents) => (None, contents.clone()),
        ResourceValue::File(path) => {
            let bytes = fs::read(path).map_err(|e| {
                RenderFailure::new(
                    FailureKind::ResourceReadFailure,
                    format!("cannot read layout {}", path.display()),
                )
                .with_cause(e)
            })?;
            let contents = String::from_utf8(bytes).map_err(|e| {
                RenderFailure::new(
                    FailureKind::MalformedInput,
                    format!("layout {} is not valid UTF-8", path.display()),
                )
                .with_cause(e)
            })?;
            (Some(path.clone()), contents)
        }
        ResourceValue::Value(_) | ResourceValue::Style(_) => {
            return Err(RenderFailure::new(
                FailureKind::MalformedInput,
                format!("resource '{layout_name}' is not a layout document"),
            ));
        }
    };

    let trimmed = contents.trim_start_matches('\u{feff}').trim_start();
    if trimmed.is_empty() {
        return Err(RenderFailure::new(FailureKind::MalformedInput, format!("layout '{layout_name}' is empty")));
    }
    if !trimmed.starts_with('<') {
        return Err(RenderFailure::new(
            FailureKind::MalformedInput,
            format!("layout '{layout_name}' does not start with markup"),
        ));
    }

    Ok(LayoutSource { name: layout_name.to_string(), path, contents })
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn dispatch<E: RenderingEngine + ?Sized>(engine: &mut E, request: &RenderRequest<'_>) -> RenderOutcome {
    let dispatched = panic::catch_unwind(AssertUnwindSafe(|| engine.render(request)));
    match dispatched {
        Ok(Ok(result)) => classify(result),
        Ok(Err(e)) => RenderOutcome::Failure(RenderFailure {
            kind: FailureKind::EngineInternal,
            message: e.to_string(),
            cause: Some(e),
        }),
        Err(payload) => RenderOutcome::Failure(RenderFailure::new(
            FailureKind::EngineInternal,
            format!("engine panicked: {}", panic_message(&*payload)),
        )),
    }
}

fn classify(result: RenderResult) -> RenderOutcome {
    if !result.success {
        return RenderOutcome::Failure(RenderFailure {
            kind: result.kind,
            message: result.error_message.unwrap_or_else(|| "unknown rendering error".to_string()),
            cause: result.cause,
        });
    }

    match result.image {
        Some(image) => RenderOutcome::Success(RenderedLayout {
            image,
            root_views: result.root_views.unwrap_or_default(),
        }),
        None => RenderOutcome::Failure(RenderFailure::new(
            FailureKind::EngineInternal,
            "engine reported success without an image",
        )),
    }
}

/// Fluent front end over [`render`] for one bound resolution.
///
/// ```rust
/// use layout_render::config::default_device;
/// use layout_render::render::backends::null::NullEngine;
/// use layout_render::render::{DefaultProjectCallback, RenderService};
/// use layout_render::resources::{bind_resources, InMemoryResourceStore, ResourceStore, StyleValue};
/// # fn main() -> Result<(), layout_render::RenderError> {
/// let mut store = InMemoryResourceStore::project()
///     .with_style(StyleValue::new("AppTheme"))
///     .with_layout("main", "<FrameLayout/>");
/// store.load_resources()?;
/// let config = default_device()?;
/// let resolution = bind_resources(&store, &config, "AppTheme", true)?;
///
/// let mut engine = NullEngine::new();
/// let callback = DefaultProjectCallback::default();
/// let outcome = RenderService::new(&mut engine, &resolution, &callback)
///     .set_app_info("Layout Library Sample", "icon")
///     .create_render_session("main");
/// assert!(outcome.is_success());
/// # Ok(()) }
/// ```
pub struct RenderService<'r, E: RenderingEngine + ?Sized> {
    engine: &'r mut E,
    resolution: &'r ResourceResolution<'r>,
    config: DeviceConfiguration,
    callback: &'r dyn ProjectCallback,
    logger: &'r dyn RenderLogger,
    app_info: Option<AppInfo>,
}

impl<'r, E: RenderingEngine + ?Sized> RenderService<'r, E> {
    /// Renders with the configuration `resolution` was bound for and logs
    /// through [`LogLogger`] until [`set_log`](Self::set_log) is called.
    pub fn new(engine: &'r mut E, resolution: &'r ResourceResolution<'r>, callback: &'r dyn ProjectCallback) -> Self {
        Self {
            engine,
            resolution,
            config: *resolution.config(),
            callback,
            logger: &DEFAULT_LOGGER,
            app_info: None,
        }
    }

    pub fn set_log(mut self, logger: &'r dyn RenderLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn set_app_info<N: Into<String>, I: Into<String>>(mut self, app_name: N, icon_name: I) -> Self {
        self.app_info = Some(AppInfo::new(app_name, icon_name));
        self
    }

    pub fn create_render_session(&mut self, layout_name: &str) -> RenderOutcome {
        render(
            &mut *self.engine,
            self.resolution,
            &self.config,
            self.callback,
            self.logger,
            self.app_info.as_ref(),
            layout_name,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::Path;

    use super::*;
    use crate::config::{default_device, DeviceConfiguration};
    use crate::errors::SinkError;
    use crate::output::{materialize, ImageSink};
    use crate::render::callback::DefaultProjectCallback;
    use crate::render::image::{PixelFormat, RasterImage};
    use crate::render::view::{Bounds, ViewNode};
    use crate::resources::{bind_resources, InMemoryResourceStore, ResourceStore, StyleValue};
    use crate::walker::walk;

    /// Engine double that replays one scripted result and records what it saw.
    struct ScriptedEngine {
        result: Option<anyhow::Result<RenderResult>>,
        calls: usize,
        seen_layout: Option<LayoutSource>,
        seen_app: Option<AppInfo>,
        seen_size: Option<(u32, u32)>,
    }

    impl ScriptedEngine {
        fn new(result: anyhow::Result<RenderResult>) -> Self {
            Self { result: Some(result), calls: 0, seen_layout: None, seen_app: None, seen_size: None }
        }
    }

    impl RenderingEngine for ScriptedEngine {
        fn name(&self) -> &str {
            "ScriptedEngine"
        }

        fn render(&mut self, request: &RenderRequest<'_>) -> anyhow::Result<RenderResult> {
            self.calls += 1;
            self.seen_layout = Some(request.layout.clone());
            self.seen_app = request.app_info.cloned();
            self.seen_size = Some(request.screen_size());
            request.logger.warning(Some("test"), "rendering");
            self.result.take().unwrap_or_else(|| Ok(RenderResult::failure("already rendered")))
        }
    }

    struct PanickingEngine;

    impl RenderingEngine for PanickingEngine {
        fn name(&self) -> &str {
            "PanickingEngine"
        }

        fn render(&mut self, _request: &RenderRequest<'_>) -> anyhow::Result<RenderResult> {
            panic!("font cache corrupted");
        }
    }

    #[derive(Default)]
    struct CountingSink {
        writes: Vec<(u32, u32)>,
    }

    impl ImageSink for CountingSink {
        fn write(&mut self, image: &RasterImage, _destination: &Path) -> Result<(), SinkError> {
            self.writes.push((image.width(), image.height()));
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        warnings: RefCell<Vec<String>>,
    }

    impl RenderLogger for RecordingLogger {
        fn warning(&self, _tag: Option<&str>, message: &str) {
            self.warnings.borrow_mut().push(message.to_string());
        }

        fn error(&self, _tag: Option<&str>, message: &str, _cause: Option<&anyhow::Error>) {
            self.warnings.borrow_mut().push(message.to_string());
        }
    }

    fn store() -> InMemoryResourceStore {
        let mut store = InMemoryResourceStore::project()
            .with_style(StyleValue::new("AppTheme"))
            .with_layout("main", "<LinearLayout/>")
            .with_layout("empty", "   \n")
            .with_layout("text", "just words")
            .with(ResourceType::Layout, "on_disk", ResourceValue::File("/nonexistent/layout/on_disk.xml".into()))
            .with(ResourceType::Layout, "value", ResourceValue::Value("x".into()));
        store.load_resources().unwrap();
        store
    }

    fn run(
        engine: &mut dyn RenderingEngine,
        store: &InMemoryResourceStore,
        config: &DeviceConfiguration,
        layout: &str,
    ) -> RenderOutcome {
        let resolution = bind_resources(store, config, "AppTheme", true).unwrap();
        let callback = DefaultProjectCallback::default();
        let app = AppInfo::new("Layout Library Sample", "icon");
        render(engine, &resolution, config, &callback, &LogLogger, Some(&app), layout)
    }

    fn two_roots() -> Vec<ViewNode> {
        vec![
            ViewNode::new("LinearLayout", Bounds::new(0, 0, 10, 5))
                .with_children(vec![ViewNode::new("TextView", Bounds::new(0, 0, 10, 2))]),
            ViewNode::new("FrameLayout", Bounds::new(0, 5, 10, 10)),
        ]
    }

    #[test]
    fn engine_failure_is_reported_verbatim_and_sink_untouched() {
        let store = store();
        let config = default_device().unwrap();
        let mut engine = ScriptedEngine::new(Ok(RenderResult::failure("layout not found")));
        let mut sink = CountingSink::default();

        let outcome = run(&mut engine, &store, &config, "main");
        let failure = outcome.failure().unwrap();
        assert_eq!(failure.message, "layout not found");
        assert_eq!(failure.kind, FailureKind::EngineInternal);
        assert!(failure.cause.is_none());

        if let Some(layout) = outcome.success() {
            materialize(layout, &mut sink, Path::new("out.png")).unwrap();
        }
        assert!(sink.writes.is_empty());
        assert_eq!(engine.calls, 1);
    }

    #[test]
    fn success_feeds_sink_once_and_walker_sees_two_roots() {
        let store = store();
        let config = default_device().unwrap();
        let image = RasterImage::blank(10, 10, PixelFormat::Rgba8).unwrap();
        let mut engine = ScriptedEngine::new(Ok(RenderResult::success(image, two_roots())));
        let mut sink = CountingSink::default();

        let outcome = run(&mut engine, &store, &config, "main");
        let layout = outcome.success().unwrap();
        let written = materialize(layout, &mut sink, Path::new("out.png")).unwrap();
        assert_eq!((written.width(), written.height()), (10, 10));
        assert_eq!(sink.writes, vec![(10, 10)]);

        let top_level = walk(&layout.root_views).filter(|(depth, _)| *depth == 0).count();
        assert_eq!(top_level, 2);
    }

    #[test]
    fn request_carries_layout_app_info_and_screen() {
        let store = store();
        let config = default_device().unwrap();
        let mut engine = ScriptedEngine::new(Ok(RenderResult::failure("stop")));
        run(&mut engine, &store, &config, "main");

        let layout = engine.seen_layout.unwrap();
        assert_eq!(layout.name, "main");
        assert_eq!(layout.contents, "<LinearLayout/>");
        assert!(layout.path.is_none());
        assert_eq!(engine.seen_app.unwrap().app_name, "Layout Library Sample");
        assert_eq!(engine.seen_size, Some((1280, 800)));
    }

    #[test]
    fn engine_error_becomes_engine_internal_with_cause() {
        let store = store();
        let config = default_device().unwrap();
        let mut engine = ScriptedEngine::new(Err(anyhow::anyhow!("native library crashed")));

        let outcome = run(&mut engine, &store, &config, "main");
        let failure = outcome.failure().unwrap();
        assert_eq!(failure.kind, FailureKind::EngineInternal);
        assert_eq!(failure.message, "native library crashed");
        assert!(failure.cause.is_some());
    }

    #[test]
    fn engine_failure_keeps_kind_and_cause() {
        let store = store();
        let config = default_device().unwrap();
        let io = std::io::Error::new(std::io::ErrorKind::Other, "drawable missing");
        let result = RenderResult::failure("inflate failed").with_kind(FailureKind::ResourceReadFailure).with_cause(io);
        let mut engine = ScriptedEngine::new(Ok(result));

        let outcome = run(&mut engine, &store, &config, "main");
        let failure = outcome.failure().unwrap();
        assert_eq!(failure.kind, FailureKind::ResourceReadFailure);
        assert_eq!(failure.cause.as_ref().map(|c| c.to_string()).as_deref(), Some("drawable missing"));
    }

    #[test]
    fn engine_panic_is_contained() {
        let store = store();
        let config = default_device().unwrap();
        let outcome = run(&mut PanickingEngine, &store, &config, "main");
        let failure = outcome.failure().unwrap();
        assert_eq!(failure.kind, FailureKind::EngineInternal);
        assert_eq!(failure.message, "engine panicked: font cache corrupted");
    }

    #[test]
    fn success_without_image_is_an_engine_failure() {
        let store = store();
        let config = default_device().unwrap();
        let mut result = RenderResult::success(RasterImage::blank(1, 1, PixelFormat::Rgba8).unwrap(), Vec::new());
        result.image = None;
        let mut engine = ScriptedEngine::new(Ok(result));

        let outcome = run(&mut engine, &store, &config, "main");
        assert_eq!(outcome.failure().unwrap().kind, FailureKind::EngineInternal);
    }

    #[test]
    fn absent_root_list_is_empty() {
        let store = store();
        let config = default_device().unwrap();
        let mut result = RenderResult::success(RasterImage::blank(2, 2, PixelFormat::Rgba8).unwrap(), Vec::new());
        result.root_views = None;
        let mut engine = ScriptedEngine::new(Ok(result));

        let outcome = run(&mut engine, &store, &config, "main");
        assert!(outcome.success().unwrap().root_views.is_empty());
    }

    #[test]
    fn composing_failures_never_reach_the_engine() {
        let store = store();
        let config = default_device().unwrap();
        let cases = [
            ("", FailureKind::MalformedInput),
            ("9patch", FailureKind::MalformedInput),
            ("../main", FailureKind::MalformedInput),
            ("missing", FailureKind::ResourceReadFailure),
            ("on_disk", FailureKind::ResourceReadFailure),
            ("empty", FailureKind::MalformedInput),
            ("text", FailureKind::MalformedInput),
            ("value", FailureKind::MalformedInput),
        ];
        for (layout, kind) in cases {
            let mut engine = ScriptedEngine::new(Ok(RenderResult::failure("unreachable")));
            let outcome = run(&mut engine, &store, &config, layout);
            assert_eq!(outcome.failure().map(|f| f.kind), Some(kind), "layout '{layout}'");
            assert_eq!(engine.calls, 0, "layout '{layout}'");
        }
    }

    #[test]
    fn file_layouts_are_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.xml");
        std::fs::write(&path, "<?xml version=\"1.0\"?>\n<FrameLayout/>").unwrap();
        let bad = dir.path().join("bad.xml");
        std::fs::write(&bad, [0x3c, 0xff, 0xfe]).unwrap();

        let mut store = InMemoryResourceStore::project()
            .with_style(StyleValue::new("AppTheme"))
            .with(ResourceType::Layout, "main", ResourceValue::File(path.clone()))
            .with(ResourceType::Layout, "bad", ResourceValue::File(bad));
        store.load_resources().unwrap();
        let config = default_device().unwrap();

        let mut engine = ScriptedEngine::new(Ok(RenderResult::failure("stop")));
        run(&mut engine, &store, &config, "main");
        assert_eq!(engine.seen_layout.unwrap().path, Some(path));

        let mut engine = ScriptedEngine::new(Ok(RenderResult::failure("stop")));
        let outcome = run(&mut engine, &store, &config, "bad");
        assert_eq!(outcome.failure().unwrap().kind, FailureKind::MalformedInput);
    }

    #[test]
    fn render_service_uses_bound_configuration_and_logger() {
        let store = store();
        let config = default_device().unwrap();
        let resolution = bind_resources(&store, &config, "AppTheme", true).unwrap();
        let callback = DefaultProjectCallback::default();
        let logger = RecordingLogger::default();
        let mut engine = ScriptedEngine::new(Ok(RenderResult::success(
            RasterImage::blank(4, 4, PixelFormat::Rgba8).unwrap(),
            two_roots(),
        )));

        let outcome = RenderService::new(&mut engine, &resolution, &callback)
            .set_log(&logger)
            .set_app_info("Sample", "icon")
            .create_render_session("main");

        assert!(outcome.is_success());
        assert_eq!(*logger.warnings.borrow(), vec!["rendering".to_string()]);
        assert_eq!(engine.seen_app, Some(AppInfo::new("Sample", "icon")));
        assert_eq!(engine.seen_size, Some((1280, 800)));
    }

    #[test]
    fn layout_names() {
        assert!(is_valid_layout_name("main"));
        assert!(is_valid_layout_name("activity_main.v2"));
        assert!(is_valid_layout_name("_private"));
        assert!(!is_valid_layout_name(""));
        assert!(!is_valid_layout_name("1main"));
        assert!(!is_valid_layout_name("main-land"));
        assert!(!is_valid_layout_name("layout/main"));
    }
}
