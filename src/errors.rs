use std::path::PathBuf;

use crate::render::RenderFailure;

/// Flat error taxonomy shared by every stage of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidConfiguration,
    ThemeNotFound,
    ResourceLoadFailure,
    MalformedInput,
    ResourceReadFailure,
    EngineInternal,
    SinkWriteFailure,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Theme not found: {} ({})", name, if *is_project_theme { "project" } else { "framework" })]
    ThemeNotFound { name: String, is_project_theme: bool },

    #[error("Cannot load resources from {location}")]
    ResourceLoadFailure {
        location: String,
        #[source]
        source: LoadError,
    },

    #[error(transparent)]
    Render(#[from] RenderFailure),

    #[error("Cannot write image to {}", destination.display())]
    SinkWriteFailure {
        destination: PathBuf,
        #[source]
        source: SinkError,
    },
}

impl RenderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RenderError::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
            RenderError::ThemeNotFound { .. } => ErrorKind::ThemeNotFound,
            RenderError::ResourceLoadFailure { .. } => ErrorKind::ResourceLoadFailure,
            RenderError::Render(failure) => failure.kind.into(),
            RenderError::SinkWriteFailure { .. } => ErrorKind::SinkWriteFailure,
        }
    }
}

/// Reasons a resource store could not complete its load phase.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("resources have not been loaded")]
    NotLoaded,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid values file: {0}")]
    Values(#[from] serde_json::Error),

    #[error("not a resource directory")]
    NotADirectory,
}

/// Errors reported by an [`ImageSink`](crate::output::ImageSink).
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("unsupported image: {0}")]
    Unsupported(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::FailureKind;

    #[test]
    fn render_failures_map_onto_taxonomy() {
        let err: RenderError = RenderFailure::new(FailureKind::ResourceReadFailure, "gone").into();
        assert_eq!(err.kind(), ErrorKind::ResourceReadFailure);
        assert_eq!(err.to_string(), "resource read failure: gone");
    }

    #[test]
    fn theme_not_found_mentions_scope() {
        let err = RenderError::ThemeNotFound { name: "AppTheme".into(), is_project_theme: true };
        assert_eq!(err.kind(), ErrorKind::ThemeNotFound);
        assert_eq!(err.to_string(), "Theme not found: AppTheme (project)");
    }

    #[test]
    fn sink_failure_keeps_source() {
        let err = RenderError::SinkWriteFailure {
            destination: PathBuf::from("/nowhere/out.png"),
            source: SinkError::Unsupported("empty".into()),
        };
        assert_eq!(err.kind(), ErrorKind::SinkWriteFailure);
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("unsupported image: empty"));
    }
}
