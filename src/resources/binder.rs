use crate::config::DeviceConfiguration;
use crate::errors::{LoadError, RenderError};
use crate::resources::resolution::ResourceResolution;
use crate::resources::store::{ConfiguredResources, ResourceStore};
use crate::resources::types::ThemeRef;

/// Binds `store` and a theme declared in it into a [`ResourceResolution`].
///
/// The theme scope must match the store: a project theme needs a project
/// store, a framework theme a framework store. Binding a project store with a
/// framework theme such as `Theme` (`is_project_theme == false`) always ends in
/// [`RenderError::ThemeNotFound`] here; load the framework resources and bind
/// through [`ResourceBinder::with_framework`] instead:
///
/// ```rust
/// use layout_render::config::default_device;
/// use layout_render::resources::{InMemoryResourceStore, ResourceBinder, ResourceStore, StyleValue};
/// # fn main() -> Result<(), layout_render::RenderError> {
/// let mut framework = InMemoryResourceStore::framework().with_style(StyleValue::new("Theme"));
/// framework.load_resources()?;
/// let mut project = InMemoryResourceStore::project().with_layout("main", "<FrameLayout/>");
/// project.load_resources()?;
///
/// let config = default_device()?;
/// let resolution = ResourceBinder::with_framework(&framework).bind(&project, &config, "Theme", false)?;
/// assert_eq!(resolution.theme().name, "Theme");
/// # Ok(()) }
/// ```
///
/// # Errors
///
/// - [`RenderError::ResourceLoadFailure`] if the store has not been loaded.
/// - [`RenderError::ThemeNotFound`] if no style named `theme_name` exists in
///   the store for the best-matching configuration.
pub fn bind_resources<'a>(
    store: &'a dyn ResourceStore,
    config: &DeviceConfiguration,
    theme_name: &str,
    is_project_theme: bool,
) -> Result<ResourceResolution<'a>, RenderError> {
    let theme = ThemeRef::new(theme_name, is_project_theme);
    if store.is_framework() {
        resolve(None, Some(store), config, theme)
    } else {
        resolve(Some(store), None, config, theme)
    }
}

/// Binds project stores, resolving framework themes and `@android:`
/// references against a shared framework store.
#[derive(Default, Clone, Copy)]
pub struct ResourceBinder<'a> {
    framework: Option<&'a dyn ResourceStore>,
}

impl<'a> ResourceBinder<'a> {
    pub fn new() -> Self {
        Self { framework: None }
    }

    /// Uses `framework` for framework-scoped lookups. It must be loaded before binding.
    pub fn with_framework(framework: &'a dyn ResourceStore) -> Self {
        Self { framework: Some(framework) }
    }

    pub fn bind(
        &self,
        project: &'a dyn ResourceStore,
        config: &DeviceConfiguration,
        theme_name: &str,
        is_project_theme: bool,
    ) -> Result<ResourceResolution<'a>, RenderError> {
        resolve(Some(project), self.framework, config, ThemeRef::new(theme_name, is_project_theme))
    }
}

fn ensure_loaded(store: Option<&dyn ResourceStore>) -> Result<(), RenderError> {
    match store {
        Some(store) if !store.is_loaded() => Err(RenderError::ResourceLoadFailure {
            location: store.location(),
            source: LoadError::NotLoaded,
        }),
        _ => Ok(()),
    }
}

fn configured(store: Option<&dyn ResourceStore>, config: &DeviceConfiguration) -> ConfiguredResources {
    store.map(|s| s.configured_resources(config)).unwrap_or_default()
}

fn resolve<'a>(
    project: Option<&'a dyn ResourceStore>,
    framework: Option<&'a dyn ResourceStore>,
    config: &DeviceConfiguration,
    theme: ThemeRef,
) -> Result<ResourceResolution<'a>, RenderError> {
    ensure_loaded(project)?;
    ensure_loaded(framework)?;

    let project_resources = configured(project, config);
    let framework_resources = configured(framework, config);

    let scope = if theme.is_project_theme { &project_resources } else { &framework_resources };
    let Some(theme_style) = scope.style(&theme.name).cloned() else {
        log::error!("Theme {} not found for {}", theme, config);
        return Err(RenderError::ThemeNotFound { name: theme.name, is_project_theme: theme.is_project_theme });
    };

    log::debug!(
        "Bound theme {} with {} project and {} framework resources",
        theme,
        project_resources.len(),
        framework_resources.len()
    );

    Ok(ResourceResolution {
        project,
        framework,
        config: *config,
        theme,
        theme_style,
        project_resources,
        framework_resources,
    })
}
