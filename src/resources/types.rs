use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceType {
    Layout,
    Drawable,
    Mipmap,
    Style,
    String,
    Color,
    Dimen,
    Bool,
    Integer,
    Id,
}

impl ResourceType {
    pub fn name(&self) -> &'static str {
        match self {
            ResourceType::Layout => "layout",
            ResourceType::Drawable => "drawable",
            ResourceType::Mipmap => "mipmap",
            ResourceType::Style => "style",
            ResourceType::String => "string",
            ResourceType::Color => "color",
            ResourceType::Dimen => "dimen",
            ResourceType::Bool => "bool",
            ResourceType::Integer => "integer",
            ResourceType::Id => "id",
        }
    }

    /// Types whose resources are whole files named after the resource.
    pub fn is_file_based(&self) -> bool {
        matches!(self, ResourceType::Layout | ResourceType::Drawable | ResourceType::Mipmap)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "layout" => ResourceType::Layout,
            "drawable" => ResourceType::Drawable,
            "mipmap" => ResourceType::Mipmap,
            "style" => ResourceType::Style,
            "string" => ResourceType::String,
            "color" => ResourceType::Color,
            "dimen" => ResourceType::Dimen,
            "bool" => ResourceType::Bool,
            "integer" => ResourceType::Integer,
            "id" => ResourceType::Id,
            other => return Err(format!("unknown resource type '{other}'")),
        })
    }
}

/// A style (or theme) definition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StyleValue {
    #[serde(default)]
    pub name: String,
    /// Explicit parent reference. Without one, a dotted name inherits from its prefix.
    #[serde(default)]
    pub parent: Option<String>,
    /// Attribute name to raw value. Framework attributes carry an `android:` prefix.
    #[serde(default)]
    pub items: BTreeMap<String, String>,
}

impl StyleValue {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn with_parent<S: Into<String>>(mut self, parent: S) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_item<K: Into<String>, V: Into<String>>(mut self, attr: K, value: V) -> Self {
        self.items.insert(attr.into(), value.into());
        self
    }

    /// Looks an attribute up in this style only. `android:foo` and `foo` are
    /// kept distinct.
    pub fn item(&self, attr: &str) -> Option<&str> {
        self.items.get(attr).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceValue {
    /// Simple value: string, color, dimension, bool, integer.
    Value(String),
    Style(StyleValue),
    /// File-backed resource such as a layout or drawable.
    File(PathBuf),
    /// File-type resource whose contents are held in memory.
    Inline(String),
}

impl ResourceValue {
    pub fn as_value(&self) -> Option<&str> {
        match self {
            ResourceValue::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_style(&self) -> Option<&StyleValue> {
        match self {
            ResourceValue::Style(style) => Some(style),
            _ => None,
        }
    }
}

/// Theme selection: a style name plus whether it lives in the project or the framework.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThemeRef {
    pub name: String,
    pub is_project_theme: bool,
}

impl ThemeRef {
    pub fn new<S: Into<String>>(name: S, is_project_theme: bool) -> Self {
        Self { name: name.into(), is_project_theme }
    }

    pub fn project<S: Into<String>>(name: S) -> Self {
        Self::new(name, true)
    }

    pub fn framework<S: Into<String>>(name: S) -> Self {
        Self::new(name, false)
    }
}

impl fmt::Display for ThemeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_project_theme {
            write!(f, "@style/{}", self.name)
        } else {
            write!(f, "@android:style/{}", self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_type_names_parse_back() {
        for t in [ResourceType::Layout, ResourceType::Style, ResourceType::Dimen, ResourceType::Id] {
            assert_eq!(t.name().parse::<ResourceType>().unwrap(), t);
        }
        assert!("menu".parse::<ResourceType>().is_err());
    }

    #[test]
    fn style_items_are_scoped_by_prefix() {
        let style = StyleValue::new("AppTheme")
            .with_item("android:windowNoTitle", "true")
            .with_item("colorPrimary", "#ff0000");
        assert_eq!(style.item("android:windowNoTitle"), Some("true"));
        assert_eq!(style.item("windowNoTitle"), None);
        assert_eq!(style.item("colorPrimary"), Some("#ff0000"));
    }

    #[test]
    fn theme_ref_display_reflects_scope() {
        assert_eq!(ThemeRef::project("AppTheme").to_string(), "@style/AppTheme");
        assert_eq!(ThemeRef::framework("Theme").to_string(), "@android:style/Theme");
    }
}
