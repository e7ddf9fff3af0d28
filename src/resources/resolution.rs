//! Bound resource context handed to the rendering engine.
//!
//! A [`ResourceResolution`] is created by the binder for one
//! (store, configuration, theme) triple. It borrows the stores, which must
//! outlive it, and answers style, theme-attribute and reference lookups.

use std::collections::HashSet;
use std::fmt;

use crate::config::DeviceConfiguration;
use crate::resources::store::{ConfiguredResources, ResourceStore};
use crate::resources::types::{ResourceType, ResourceValue, StyleValue, ThemeRef};

/// Upper bound on chained references (`@string/a` -> `@string/b` -> ...).
const MAX_REFERENCE_DEPTH: usize = 16;
/// Upper bound on style inheritance depth.
const MAX_STYLE_DEPTH: usize = 32;

pub struct ResourceResolution<'a> {
    pub(crate) project: Option<&'a dyn ResourceStore>,
    pub(crate) framework: Option<&'a dyn ResourceStore>,
    pub(crate) config: DeviceConfiguration,
    pub(crate) theme: ThemeRef,
    pub(crate) theme_style: StyleValue,
    pub(crate) project_resources: ConfiguredResources,
    pub(crate) framework_resources: ConfiguredResources,
}

impl fmt::Debug for ResourceResolution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceResolution")
            .field("project", &self.project.map(|s| s.location()))
            .field("framework", &self.framework.map(|s| s.location()))
            .field("config", &self.config.qualifier_string())
            .field("theme", &self.theme)
            .finish()
    }
}

/// Splits a style reference into its name and scope.
///
/// Accepts `@android:style/X`, `@*android:style/X`, `android:X`, and
/// `@style/X` or a bare `X`, which keep `default_framework`.
pub fn parse_style_reference(raw: &str, default_framework: bool) -> (&str, bool) {
    let raw = raw.trim();
    if let Some(rest) = raw.strip_prefix("@*android:style/").or_else(|| raw.strip_prefix("@android:style/")) {
        (rest, true)
    } else if let Some(rest) = raw.strip_prefix("@style/") {
        (rest, default_framework)
    } else if let Some(rest) = raw.strip_prefix("android:") {
        (rest, true)
    } else {
        (raw, default_framework)
    }
}

/// Parses `@[android:]type/name` into its parts. Without the `android:`
/// prefix the reference stays in `default_framework`'s scope.
fn parse_resource_reference(raw: &str, default_framework: bool) -> Option<(ResourceType, &str, bool)> {
    let rest = raw.strip_prefix('@')?;
    let rest = rest.strip_prefix('*').unwrap_or(rest);
    let (framework, rest) = match rest.strip_prefix("android:") {
        Some(r) => (true, r),
        None => (default_framework, rest),
    };
    let (kind, name) = rest.split_once('/')?;
    let kind = kind.parse::<ResourceType>().ok()?;
    if name.is_empty() {
        return None;
    }
    Some((kind, name, framework))
}

/// Normalizes a `?` theme attribute reference to the key used in style items.
fn parse_attribute_reference(raw: &str) -> Option<String> {
    let rest = raw.strip_prefix('?')?;
    if let Some(name) = rest.strip_prefix("android:attr/") {
        return Some(format!("android:{name}"));
    }
    if let Some(name) = rest.strip_prefix("attr/") {
        return Some(name.to_string());
    }
    Some(rest.to_string())
}

impl<'a> ResourceResolution<'a> {
    pub fn config(&self) -> &DeviceConfiguration {
        &self.config
    }

    pub fn theme(&self) -> &ThemeRef {
        &self.theme
    }

    /// The bound theme's own definition, without inherited items.
    pub fn theme_style(&self) -> &StyleValue {
        &self.theme_style
    }

    pub fn project_store(&self) -> Option<&'a dyn ResourceStore> {
        self.project
    }

    pub fn framework_store(&self) -> Option<&'a dyn ResourceStore> {
        self.framework
    }

    pub fn resources(&self, is_framework: bool) -> &ConfiguredResources {
        if is_framework {
            &self.framework_resources
        } else {
            &self.project_resources
        }
    }

    pub fn find_resource(&self, kind: ResourceType, name: &str, is_framework: bool) -> Option<&ResourceValue> {
        self.resources(is_framework).get(kind, name)
    }

    pub fn find_style(&self, name: &str, is_framework: bool) -> Option<&StyleValue> {
        self.resources(is_framework).style(name)
    }

    /// Parent of `style`, declared in scope `is_framework`.
    ///
    /// An explicit empty parent means none. Without an explicit parent a
    /// dotted name inherits from its prefix in the same scope
    /// (`Theme.Light` -> `Theme`).
    pub fn parent_style(&self, style: &StyleValue, is_framework: bool) -> Option<(&StyleValue, bool)> {
        let (name, framework) = match style.parent.as_deref() {
            Some(raw) if raw.trim().is_empty() => return None,
            Some(raw) => parse_style_reference(raw, is_framework),
            None => (style.name.rsplit_once('.')?.0, is_framework),
        };
        self.find_style(name, framework).map(|parent| (parent, framework))
    }

    /// Looks `attr` up in the theme and then along its parent chain. Cycles
    /// and overly deep chains end the search.
    pub fn find_item_in_theme(&self, attr: &str) -> Option<&str> {
        self.find_scoped_item_in_theme(attr).map(|(value, _)| value)
    }

    /// Like [`find_item_in_theme`](Self::find_item_in_theme), also returning
    /// whether the defining style is a framework style.
    pub fn find_scoped_item_in_theme(&self, attr: &str) -> Option<(&str, bool)> {
        let theme_framework = !self.theme.is_project_theme;
        if let Some(value) = self.theme_style.item(attr) {
            return Some((value, theme_framework));
        }

        let mut visited = HashSet::new();
        visited.insert((self.theme_style.name.as_str(), theme_framework));
        let mut current = self.parent_style(&self.theme_style, theme_framework);
        let mut depth = 0;
        while let Some((style, framework)) = current {
            if !visited.insert((style.name.as_str(), framework)) || depth >= MAX_STYLE_DEPTH {
                log::warn!("Style chain of {} is cyclic or too deep at {}", self.theme, style.name);
                return None;
            }
            if let Some(value) = style.item(attr) {
                return Some((value, framework));
            }
            current = self.parent_style(style, framework);
            depth += 1;
        }
        None
    }

    /// Resolves a raw attribute value by following `@type/name` and `?attr`
    /// references until a literal is reached.
    ///
    /// `raw` is read in the project scope, or in the framework scope when no
    /// project is bound. A reference without `android:` stays in the scope of
    /// the style or value it was found in.
    ///
    /// References to styles and file resources resolve to the reference itself.
    /// Returns `None` for `@null`, dangling references and reference loops.
    pub fn resolve_value<'s>(&'s self, raw: &'s str) -> Option<&'s str> {
        let mut current = raw;
        let mut scope_framework = self.project.is_none();
        for _ in 0..MAX_REFERENCE_DEPTH {
            if current == "@null" {
                return None;
            }
            if current.starts_with('?') {
                let attr = parse_attribute_reference(current)?;
                (current, scope_framework) = self.find_scoped_item_in_theme(&attr)?;
                continue;
            }
            if current.starts_with('@') {
                let (kind, name, framework) = parse_resource_reference(current, scope_framework)?;
                match self.find_resource(kind, name, framework)? {
                    ResourceValue::Value(value) => {
                        current = value.as_str();
                        scope_framework = framework;
                        continue;
                    }
                    _ => return Some(current),
                }
            }
            return Some(current);
        }
        log::warn!("Reference chain starting at '{}' is too deep", raw);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_references_carry_scope() {
        assert_eq!(parse_style_reference("@android:style/Theme", false), ("Theme", true));
        assert_eq!(parse_style_reference("@*android:style/Theme.Holo", false), ("Theme.Holo", true));
        assert_eq!(parse_style_reference("@style/AppTheme", false), ("AppTheme", false));
        assert_eq!(parse_style_reference("@style/Theme.Light", true), ("Theme.Light", true));
        assert_eq!(parse_style_reference("android:Theme", false), ("Theme", true));
        assert_eq!(parse_style_reference("Base", true), ("Base", true));
        assert_eq!(parse_style_reference("Base", false), ("Base", false));
    }

    #[test]
    fn resource_references_parse() {
        assert_eq!(parse_resource_reference("@string/app_name", false), Some((ResourceType::String, "app_name", false)));
        assert_eq!(parse_resource_reference("@string/app_name", true), Some((ResourceType::String, "app_name", true)));
        assert_eq!(parse_resource_reference("@android:color/white", false), Some((ResourceType::Color, "white", true)));
        assert_eq!(parse_resource_reference("@*android:color/white", false), Some((ResourceType::Color, "white", true)));
        assert_eq!(parse_resource_reference("@layout/", false), None);
        assert_eq!(parse_resource_reference("@menu/main", false), None);
        assert_eq!(parse_resource_reference("plain", false), None);
    }

    #[test]
    fn attribute_references_normalize() {
        assert_eq!(parse_attribute_reference("?android:attr/textColor").as_deref(), Some("android:textColor"));
        assert_eq!(parse_attribute_reference("?attr/colorPrimary").as_deref(), Some("colorPrimary"));
        assert_eq!(parse_attribute_reference("?android:textColor").as_deref(), Some("android:textColor"));
        assert_eq!(parse_attribute_reference("#fff"), None);
    }
}
