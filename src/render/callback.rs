use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::resources::ResourceType;

/// First id handed out for project resources (`0x7f` package, type 0).
pub const FIRST_DYNAMIC_ID: i32 = 0x7f00_0000;

/// Project-side services the engine calls back into while inflating a layout.
pub trait ProjectCallback {
    /// Package namespace of the project, e.g. `com.example.android.render`.
    fn namespace(&self) -> &str;

    /// Integer id for a project resource, allocated on first use.
    fn resource_id(&self, kind: ResourceType, name: &str) -> i32;

    /// Reverse lookup of an id handed out by [`resource_id`](Self::resource_id).
    fn resolve_resource_id(&self, id: i32) -> Option<(ResourceType, String)>;
}

#[derive(Debug, Default)]
struct IdTable {
    next: i32,
    by_name: HashMap<(ResourceType, String), i32>,
    by_id: HashMap<i32, (ResourceType, String)>,
}

/// Callback that allocates ids sequentially from [`FIRST_DYNAMIC_ID`].
#[derive(Debug)]
pub struct DefaultProjectCallback {
    namespace: String,
    ids: Mutex<IdTable>,
}

impl DefaultProjectCallback {
    pub fn new<S: Into<String>>(namespace: S) -> Self {
        Self {
            namespace: namespace.into(),
            ids: Mutex::new(IdTable { next: FIRST_DYNAMIC_ID, ..Default::default() }),
        }
    }
}

impl Default for DefaultProjectCallback {
    fn default() -> Self {
        Self::new("com.example.android.render")
    }
}

impl ProjectCallback for DefaultProjectCallback {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn resource_id(&self, kind: ResourceType, name: &str) -> i32 {
        let mut ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
        let key = (kind, name.to_string());
        if let Some(id) = ids.by_name.get(&key) {
            return *id;
        }
        let id = ids.next;
        ids.next += 1;
        ids.by_id.insert(id, key.clone());
        ids.by_name.insert(key, id);
        id
    }

    fn resolve_resource_id(&self, id: i32) -> Option<(ResourceType, String)> {
        let ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
        ids.by_id.get(&id).cloned()
    }
}
