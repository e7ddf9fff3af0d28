use std::fmt;

use serde::{Deserialize, Serialize};

/// Pixel box in the root view's coordinate space. Inverted boxes
/// (`left > right`, `top > bottom`) are kept as reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Signed width; negative for inverted boxes.
    pub fn width(&self) -> i64 {
        self.right as i64 - self.left as i64
    }

    pub fn height(&self) -> i64 {
        self.bottom as i64 - self.top as i64
    }

    pub fn is_inverted(&self) -> bool {
        self.left > self.right || self.top > self.bottom
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.left, self.top, self.right, self.bottom)
    }
}

/// One rendered view and its subtree.
///
/// `children` may be absent; an absent list and an empty list are treated the
/// same by every accessor, by equality and by serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewNode {
    pub class_name: String,
    pub bounds: Bounds,
    #[serde(default, skip_serializing_if = "no_children")]
    pub children: Option<Vec<ViewNode>>,
}

fn no_children(children: &Option<Vec<ViewNode>>) -> bool {
    children.as_ref().map_or(true, Vec::is_empty)
}

impl ViewNode {
    pub fn new<S: Into<String>>(class_name: S, bounds: Bounds) -> Self {
        Self { class_name: class_name.into(), bounds, children: None }
    }

    pub fn with_children(mut self, children: Vec<ViewNode>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn children(&self) -> &[ViewNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }
}

impl PartialEq for ViewNode {
    fn eq(&self, other: &Self) -> bool {
        self.class_name == other.class_name && self.bounds == other.bounds && self.children() == other.children()
    }
}

impl Eq for ViewNode {}
