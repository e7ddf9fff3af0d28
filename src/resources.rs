//! Project and framework resources, and their binding to a device and theme.

mod binder;
pub mod folder;
mod folder_store;
mod resolution;
mod store;
mod types;

pub use binder::{bind_resources, ResourceBinder};
pub use folder::{best_match, parse_folder_name, FolderConfiguration, FolderNameError};
pub use folder_store::FolderResourceStore;
pub use resolution::{parse_style_reference, ResourceResolution};
pub use store::{ConfiguredResources, InMemoryResourceStore, ResourceIndex, ResourceStore};
pub use types::{ResourceType, ResourceValue, StyleValue, ThemeRef};
