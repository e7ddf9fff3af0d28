//! Directory-backed resource store.
//!
//! Indexes a `res/` directory laid out as one sub-directory per qualified
//! folder (`layout`, `layout-land`, `values-v11`, ...):
//!
//! - `layout*`, `drawable*`, `mipmap*`: every file is a resource named after
//!   its file stem (`main.xml` is `@layout/main`, `bg.9.png` is `@drawable/bg`).
//! - `values*`: every `.json` file holds simple values and styles:
//!
//! ```json
//! {
//!   "strings": { "app_name": "Sample" },
//!   "colors": { "accent": "#ff4081" },
//!   "styles": {
//!     "AppTheme": { "parent": "@android:style/Theme", "items": { "android:windowNoTitle": "true" } }
//!   }
//! }
//! ```
//!
//! Folders with unknown qualifiers are skipped with a warning.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::DeviceConfiguration;
use crate::errors::{LoadError, RenderError};
use crate::resources::folder::{parse_folder_name, FolderConfiguration};
use crate::resources::store::{ConfiguredResources, ResourceIndex, ResourceStore};
use crate::resources::types::{ResourceType, ResourceValue, StyleValue};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ValuesFile {
    strings: BTreeMap<String, String>,
    colors: BTreeMap<String, String>,
    dimens: BTreeMap<String, String>,
    bools: BTreeMap<String, String>,
    integers: BTreeMap<String, String>,
    styles: BTreeMap<String, StyleValue>,
}

#[derive(Debug, Clone)]
pub struct FolderResourceStore {
    root: PathBuf,
    framework: bool,
    loaded: bool,
    index: ResourceIndex,
}

impl FolderResourceStore {
    pub fn new<P: AsRef<Path>>(root: P, framework: bool) -> Self {
        Self { root: root.as_ref().to_path_buf(), framework, loaded: false, index: ResourceIndex::new() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load_error(path: &Path, source: impl Into<LoadError>) -> RenderError {
        RenderError::ResourceLoadFailure { location: path.display().to_string(), source: source.into() }
    }

    /// Directory entries sorted by name so reloads are deterministic.
    fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, RenderError> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| Self::load_error(dir, e))? {
            let entry = entry.map_err(|e| Self::load_error(dir, e))?;
            entries.push(entry.path());
        }
        entries.sort();
        Ok(entries)
    }

    fn load_folder(&mut self, dir: &Path, kind: ResourceType, folder: FolderConfiguration) -> Result<(), RenderError> {
        for path in Self::sorted_entries(dir)? {
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()).and_then(|n| n.split('.').next()) else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            let name = name.to_string();
            self.index.insert(kind, &name, folder, ResourceValue::File(path));
        }
        Ok(())
    }

    fn load_values(&mut self, dir: &Path, folder: FolderConfiguration) -> Result<(), RenderError> {
        for path in Self::sorted_entries(dir)? {
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let contents = fs::read_to_string(&path).map_err(|e| Self::load_error(&path, e))?;
            let values: ValuesFile = serde_json::from_str(&contents).map_err(|e| Self::load_error(&path, e))?;

            let simple = [
                (ResourceType::String, values.strings),
                (ResourceType::Color, values.colors),
                (ResourceType::Dimen, values.dimens),
                (ResourceType::Bool, values.bools),
                (ResourceType::Integer, values.integers),
            ];
            for (kind, map) in simple {
                for (name, value) in map {
                    self.index.insert(kind, &name, folder, ResourceValue::Value(value));
                }
            }
            for (name, mut style) in values.styles {
                style.name = name.clone();
                self.index.insert(ResourceType::Style, &name, folder, ResourceValue::Style(style));
            }
        }
        Ok(())
    }
}

impl ResourceStore for FolderResourceStore {
    fn location(&self) -> String {
        self.root.display().to_string()
    }

    fn is_framework(&self) -> bool {
        self.framework
    }

    fn load_resources(&mut self) -> Result<(), RenderError> {
        self.loaded = false;
        self.index.clear();

        if !self.root.is_dir() {
            return Err(Self::load_error(&self.root, LoadError::NotADirectory));
        }

        let root = self.root.clone();
        for dir in Self::sorted_entries(&root)? {
            if !dir.is_dir() {
                continue;
            }
            let Some(dir_name) = dir.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let (folder_type, folder) = match parse_folder_name(dir_name) {
                Ok(parsed) => parsed,
                Err(e) => {
                    log::warn!("Skipping resource folder {}: {}", dir.display(), e);
                    continue;
                }
            };
            match folder_type {
                "values" => self.load_values(&dir, folder)?,
                "layout" => self.load_folder(&dir, ResourceType::Layout, folder)?,
                "drawable" => self.load_folder(&dir, ResourceType::Drawable, folder)?,
                "mipmap" => self.load_folder(&dir, ResourceType::Mipmap, folder)?,
                other => log::debug!("Ignoring unsupported resource folder type '{}'", other),
            }
        }

        self.loaded = true;
        log::info!("Loaded {} resources from {}", self.index.len(), self.root.display());
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn configured_resources(&self, config: &DeviceConfiguration) -> ConfiguredResources {
        if !self.loaded {
            return ConfiguredResources::default();
        }
        self.index.configured(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_device;
    use crate::errors::ErrorKind;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn loads_layouts_values_and_styles() {
        let dir = tempfile::tempdir().unwrap();
        let res = dir.path();
        write(res, "layout/main.xml", "<LinearLayout/>");
        write(res, "layout-land/main.xml", "<FrameLayout/>");
        write(res, "drawable-mdpi/bg.9.png", "png");
        write(
            res,
            "values/strings.json",
            r#"{ "strings": { "app_name": "Sample" }, "styles": { "AppTheme": { "parent": "Theme", "items": { "android:windowNoTitle": "true" } } } }"#,
        );

        let mut store = FolderResourceStore::new(res, false);
        store.load_resources().unwrap();
        assert!(store.is_loaded());

        let configured = store.configured_resources(&default_device().unwrap());
        assert_eq!(
            configured.get(ResourceType::Layout, "main"),
            Some(&ResourceValue::File(res.join("layout-land/main.xml")))
        );
        assert!(configured.get(ResourceType::Drawable, "bg").is_some());
        assert_eq!(configured.get(ResourceType::String, "app_name").and_then(ResourceValue::as_value), Some("Sample"));

        let theme = configured.style("AppTheme").unwrap();
        assert_eq!(theme.name, "AppTheme");
        assert_eq!(theme.parent.as_deref(), Some("Theme"));
        assert_eq!(theme.item("android:windowNoTitle"), Some("true"));
    }

    #[test]
    fn invalid_folders_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "layout-v11-land/main.xml", "<FrameLayout/>");
        write(dir.path(), "raw/data.bin", "x");

        let mut store = FolderResourceStore::new(dir.path(), false);
        store.load_resources().unwrap();
        assert!(store.configured_resources(&default_device().unwrap()).is_empty());
    }

    #[test]
    fn missing_root_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FolderResourceStore::new(dir.path().join("res"), false);
        let err = store.load_resources().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceLoadFailure);
        assert!(!store.is_loaded());
    }

    #[test]
    fn malformed_values_file_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "values/broken.json", "{ \"strings\": ");

        let mut store = FolderResourceStore::new(dir.path(), false);
        let err = store.load_resources().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceLoadFailure);
        assert!(matches!(err, RenderError::ResourceLoadFailure { source: LoadError::Values(_), .. }));
    }
}
