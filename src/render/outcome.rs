use std::error::Error as StdError;
use std::fmt;

use crate::errors::{ErrorKind, RenderError};
use crate::render::image::RasterImage;
use crate::render::view::ViewNode;

/// Origin of a failed render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The request could not be composed: bad layout name, unreadable or malformed document.
    MalformedInput,
    /// A project resource needed for the request could not be read.
    ResourceReadFailure,
    /// The engine failed, panicked, or reported an error.
    EngineInternal,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureKind::MalformedInput => "malformed input",
            FailureKind::ResourceReadFailure => "resource read failure",
            FailureKind::EngineInternal => "engine internal error",
        })
    }
}

impl From<FailureKind> for ErrorKind {
    fn from(kind: FailureKind) -> Self {
        match kind {
            FailureKind::MalformedInput => ErrorKind::MalformedInput,
            FailureKind::ResourceReadFailure => ErrorKind::ResourceReadFailure,
            FailureKind::EngineInternal => ErrorKind::EngineInternal,
        }
    }
}

/// A classified render failure. The cause, when present, is kept for
/// diagnostics and exposed as the error source.
#[derive(Debug)]
pub struct RenderFailure {
    pub kind: FailureKind,
    pub message: String,
    pub cause: Option<anyhow::Error>,
}

impl RenderFailure {
    pub fn new<S: Into<String>>(kind: FailureKind, message: S) -> Self {
        Self { kind, message: message.into(), cause: None }
    }

    pub fn with_cause(mut self, cause: impl Into<anyhow::Error>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}

impl fmt::Display for RenderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl StdError for RenderFailure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_ref().map(|cause| {
            let err: &(dyn StdError + 'static) = &**cause;
            err
        })
    }
}

/// Image and view hierarchy of a successful render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLayout {
    pub image: RasterImage,
    pub root_views: Vec<ViewNode>,
}

/// Result of one render invocation.
#[derive(Debug)]
pub enum RenderOutcome {
    Success(RenderedLayout),
    Failure(RenderFailure),
}

impl RenderOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RenderOutcome::Success(_))
    }

    pub fn success(&self) -> Option<&RenderedLayout> {
        match self {
            RenderOutcome::Success(layout) => Some(layout),
            RenderOutcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&RenderFailure> {
        match self {
            RenderOutcome::Success(_) => None,
            RenderOutcome::Failure(failure) => Some(failure),
        }
    }

    pub fn into_result(self) -> Result<RenderedLayout, RenderError> {
        match self {
            RenderOutcome::Success(layout) => Ok(layout),
            RenderOutcome::Failure(failure) => Err(failure.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_exposes_cause_as_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "main.xml");
        let failure = RenderFailure::new(FailureKind::ResourceReadFailure, "cannot read layout").with_cause(io);
        assert_eq!(failure.to_string(), "resource read failure: cannot read layout");
        assert_eq!(failure.source().map(|s| s.to_string()).as_deref(), Some("main.xml"));
    }

    #[test]
    fn into_result_carries_kind() {
        let outcome = RenderOutcome::Failure(RenderFailure::new(FailureKind::EngineInternal, "boom"));
        assert!(!outcome.is_success());
        assert!(outcome.success().is_none());
        let err = outcome.into_result().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EngineInternal);
        assert_eq!(err.to_string(), "engine internal error: boom");
    }
}
