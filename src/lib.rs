//! Render layout documents to images through a pluggable rendering engine.
//!
//! The flow is: build a [`DeviceConfiguration`](config::DeviceConfiguration),
//! bind a theme with [`bind_resources`](resources::bind_resources), call
//! [`render`](render::render), then hand the result to
//! [`materialize`](output::materialize) and [`walk`](walker::walk).
//! [`pipeline::run`] does all of it for a [`RenderJob`](config::RenderJob).

pub mod config;
pub mod errors;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod resources;
pub mod walker;

pub use errors::{ErrorKind, RenderError};
