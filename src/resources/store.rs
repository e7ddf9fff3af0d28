//! Resource stores.
//!
//! A [`ResourceStore`] holds every variant of every resource of one scope
//! (project or framework), keyed by type and name, each variant tagged with the
//! folder configuration it was declared under. Selecting the variants for one
//! device yields [`ConfiguredResources`].

use std::collections::{BTreeMap, HashMap};

use crate::config::DeviceConfiguration;
use crate::errors::RenderError;
use crate::resources::folder::{best_match, FolderConfiguration};
use crate::resources::types::{ResourceType, ResourceValue, StyleValue};

/// Resources selected for one device configuration: at most one value per (type, name).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfiguredResources {
    values: HashMap<ResourceType, BTreeMap<String, ResourceValue>>,
}

impl ConfiguredResources {
    pub fn get(&self, kind: ResourceType, name: &str) -> Option<&ResourceValue> {
        self.values.get(&kind)?.get(name)
    }

    pub fn style(&self, name: &str) -> Option<&StyleValue> {
        self.get(ResourceType::Style, name)?.as_style()
    }

    /// Names of all resources of `kind`, sorted.
    pub fn names(&self, kind: ResourceType) -> impl Iterator<Item = &str> {
        self.values.get(&kind).into_iter().flat_map(|m| m.keys().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.values.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// All declared variants of a store's resources.
#[derive(Debug, Clone, Default)]
pub struct ResourceIndex {
    items: BTreeMap<(ResourceType, String), Vec<(FolderConfiguration, ResourceValue)>>,
}

impl ResourceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variant. A later variant under an identical folder configuration replaces the earlier one.
    pub fn insert(&mut self, kind: ResourceType, name: &str, folder: FolderConfiguration, value: ResourceValue) {
        let variants = self.items.entry((kind, name.to_string())).or_default();
        match variants.iter_mut().find(|(f, _)| *f == folder) {
            Some(existing) => existing.1 = value,
            None => variants.push((folder, value)),
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Selects, for each resource, the variant best matching `config`. Resources
    /// without a compatible variant are left out.
    pub fn configured(&self, config: &DeviceConfiguration) -> ConfiguredResources {
        let mut out = ConfiguredResources::default();
        for ((kind, name), variants) in &self.items {
            let picked = best_match(variants.iter().map(|(folder, value)| (folder, value)), config);
            if let Some(value) = picked {
                out.values.entry(*kind).or_default().insert(name.clone(), value.clone());
            }
        }
        out
    }
}

/// A loadable collection of resources of one scope.
pub trait ResourceStore {
    /// Human-readable location used in diagnostics (a path, or `<memory>`).
    fn location(&self) -> String;

    /// Whether the store holds framework (`android:`) resources.
    fn is_framework(&self) -> bool;

    /// Loads (or reloads) the resources. Must succeed before the store is bound.
    fn load_resources(&mut self) -> Result<(), RenderError>;

    fn is_loaded(&self) -> bool;

    /// Resources best matching `config`. Empty before a successful load.
    fn configured_resources(&self, config: &DeviceConfiguration) -> ConfiguredResources;
}

/// Store populated programmatically. Loading is a no-op that marks it ready.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResourceStore {
    framework: bool,
    loaded: bool,
    index: ResourceIndex,
}

impl InMemoryResourceStore {
    pub fn new(framework: bool) -> Self {
        Self { framework, loaded: false, index: ResourceIndex::new() }
    }

    pub fn project() -> Self {
        Self::new(false)
    }

    pub fn framework() -> Self {
        Self::new(true)
    }

    /// Adds a resource under the default (unqualified) folder.
    pub fn with(self, kind: ResourceType, name: &str, value: ResourceValue) -> Self {
        self.with_qualified(kind, name, FolderConfiguration::default(), value)
    }

    pub fn with_qualified(mut self, kind: ResourceType, name: &str, folder: FolderConfiguration, value: ResourceValue) -> Self {
        self.insert(kind, name, folder, value);
        self
    }

    pub fn with_style(self, style: StyleValue) -> Self {
        let name = style.name.clone();
        self.with(ResourceType::Style, &name, ResourceValue::Style(style))
    }

    /// Adds an in-memory layout document.
    pub fn with_layout(self, name: &str, contents: &str) -> Self {
        self.with(ResourceType::Layout, name, ResourceValue::Inline(contents.to_string()))
    }

    pub fn insert(&mut self, kind: ResourceType, name: &str, folder: FolderConfiguration, value: ResourceValue) {
        self.index.insert(kind, name, folder, value);
    }
}

impl ResourceStore for InMemoryResourceStore {
    fn location(&self) -> String {
        "<memory>".to_string()
    }

    fn is_framework(&self) -> bool {
        self.framework
    }

    fn load_resources(&mut self) -> Result<(), RenderError> {
        self.loaded = true;
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
