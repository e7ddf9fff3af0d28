//! View tree traversal and presentation.
//!
//! [`walk`] yields `(depth, node)` pairs in pre-order without touching the
//! nodes. Presentation helpers build on top of it: [`render_text`] produces the
//! familiar tab-indented listing
//!
//! ```text
//! LinearLayout [0, 0, 1280, 800]
//! 	TextView [0, 0, 1280, 40]
//! ```
//!
//! and [`to_json`] the structured form.

use std::fmt::Write as _;

use crate::render::ViewNode;

/// Lazy pre-order, depth-first traversal over a forest of views.
///
/// Uses an explicit stack, so deep hierarchies cannot overflow the call
/// stack. Cloning a `Walk` forks the traversal at its current position.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    /// Sibling slices still to visit, innermost last, with their depth.
    stack: Vec<(usize, std::slice::Iter<'a, ViewNode>)>,
}

/// Starts a traversal over `roots`. Each call starts from scratch.
pub fn walk(roots: &[ViewNode]) -> Walk<'_> {
    Walk { stack: vec![(0, roots.iter())] }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a ViewNode);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (depth, siblings) = self.stack.last_mut()?;
            let depth = *depth;
            match siblings.next() {
                Some(node) => {
                    if node.has_children() {
                        self.stack.push((depth + 1, node.children().iter()));
                    }
                    return Some((depth, node));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// One tab per level.
pub fn indent(depth: usize) -> String {
    "\t".repeat(depth)
}

/// `<indent>ClassName [left, top, right, bottom]`
pub fn format_entry(depth: usize, node: &ViewNode) -> String {
    format!("{}{} {}", indent(depth), node.class_name, node.bounds)
}

/// Full listing, one line per view, each line newline-terminated.
pub fn render_text(roots: &[ViewNode]) -> String {
    let mut out = String::new();
    for (depth, node) in walk(roots) {
        let _ = writeln!(out, "{}", format_entry(depth, node));
    }
    out
}

/// Pretty-printed JSON array of the root views.
pub fn to_json(roots: &[ViewNode]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(roots)
}
