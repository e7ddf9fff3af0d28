//! Render job configuration.
//!
//! A [`RenderJob`] describes one end-to-end render: which project to load,
//! which layout to render with which theme, on which device, and where the
//! image goes. Locations are explicit values; nothing here reads the process
//! environment.
//!
//! # Examples
//!
//! ```rust
//! use layout_render::config::RenderJob;
//! # fn main() -> Result<(), layout_render::RenderError> {
//! let job = RenderJob::builder()
//!     .project_root("testproject")
//!     .layout("main")
//!     .project_theme("AppTheme")
//!     .build()?;
//! assert_eq!(job.resource_dir().to_str(), Some("testproject/res"));
//! # Ok(()) }
//! ```

use std::path::{Path, PathBuf};

use crate::config::device::DeviceConfiguration;
use crate::config::qualifiers::{
    Density, Keyboard, KeyboardState, Navigation, NavigationState, ScreenOrientation, ScreenRatio, ScreenSize,
    TouchScreen,
};
use crate::errors::RenderError;
use crate::render::AppInfo;
use crate::resources::ThemeRef;

const DEFAULT_LAYOUT: &str = "main";
const DEFAULT_THEME: &str = "Theme";
const DEFAULT_APP_NAME: &str = "Layout Library Sample";
const DEFAULT_APP_ICON: &str = "icon";

#[derive(Debug, Clone)]
pub struct RenderJob {
    /// Project directory; resources are read from `<project_root>/res`.
    pub project_root: PathBuf,
    /// Layout resource to render.
    pub layout: String,
    pub theme: ThemeRef,
    pub device: DeviceConfiguration,
    pub app_info: Option<AppInfo>,
    /// Where the image is written. `None` allocates a temporary `.png` file.
    pub output: Option<PathBuf>,
}

impl RenderJob {
    pub fn builder() -> RenderJobBuilder {
        RenderJobBuilder::default()
    }

    pub fn resource_dir(&self) -> PathBuf {
        self.project_root.join("res")
    }
}

/// The 1280x800 extra-large landscape tablet at api level 12.
pub fn default_device() -> Result<DeviceConfiguration, RenderError> {
    DeviceConfiguration::builder()
        .dimensions(1280, 800)
        .screen_size(ScreenSize::XLarge)
        .screen_ratio(ScreenRatio::Long)
        .orientation(ScreenOrientation::Landscape)
        .density(Density::Medium)
        .touch(TouchScreen::Finger)
        .keyboard_state(KeyboardState::Soft)
        .keyboard(Keyboard::Qwerty)
        .navigation_state(NavigationState::Exposed)
        .navigation(Navigation::NoNav)
        .api_level(12)
        .build()
}

#[derive(Debug, Clone)]
pub struct RenderJobBuilder {
    project_root: PathBuf,
    layout: String,
    theme: ThemeRef,
    device: Option<DeviceConfiguration>,
    app_info: Option<AppInfo>,
    output: Option<PathBuf>,
}

impl Default for RenderJobBuilder {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            layout: DEFAULT_LAYOUT.to_string(),
            theme: ThemeRef::framework(DEFAULT_THEME),
            device: None,
            app_info: Some(AppInfo::new(DEFAULT_APP_NAME, DEFAULT_APP_ICON)),
            output: None,
        }
    }
}

impl RenderJobBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut Self)) -> Self {
        f(&mut self);
        self
    }

    pub fn project_root<P: AsRef<Path>>(self, root: P) -> Self { self.map(|b| b.project_root = root.as_ref().to_path_buf()) }
    pub fn layout<S: Into<String>>(self, name: S) -> Self { self.map(|b| b.layout = name.into()) }
    pub fn project_theme<S: Into<String>>(self, name: S) -> Self { self.map(|b| b.theme = ThemeRef::project(name)) }
    pub fn framework_theme<S: Into<String>>(self, name: S) -> Self { self.map(|b| b.theme = ThemeRef::framework(name)) }
    pub fn device(self, device: DeviceConfiguration) -> Self { self.map(|b| b.device = Some(device)) }
    pub fn app_info(self, info: Option<AppInfo>) -> Self { self.map(|b| b.app_info = info) }
    pub fn output<P: AsRef<Path>>(self, path: P) -> Self { self.map(|b| b.output = Some(path.as_ref().to_path_buf())) }

    /// Validate and build the job. Without an explicit device the default
    /// tablet configuration is used.
    pub fn build(self) -> Result<RenderJob, RenderError> {
        if self.layout.trim().is_empty() {
            return Err(RenderError::InvalidConfiguration("layout name is empty".into()));
        }
        if self.theme.name.trim().is_empty() {
            return Err(RenderError::InvalidConfiguration("theme name is empty".into()));
        }
        let device = match self.device {
            Some(device) => device,
            None => default_device()?,
        };

        Ok(RenderJob {
            project_root: self.project_root,
            layout: self.layout,
            theme: self.theme,
            device,
            app_info: self.app_info,
            output: self.output,
        })
    }
}
