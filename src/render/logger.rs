/// Sink for messages the engine emits while rendering. Write-only.
pub trait RenderLogger {
    fn warning(&self, tag: Option<&str>, message: &str);

    /// Something was rendered, but not faithfully (unsupported feature, approximated drawable).
    fn fidelity_warning(&self, tag: Option<&str>, message: &str) {
        self.warning(tag, message);
    }

    fn error(&self, tag: Option<&str>, message: &str, cause: Option<&anyhow::Error>);
}

/// Forwards engine messages to the `log` facade under the `layout_render::engine` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogLogger;

const TARGET: &str = "layout_render::engine";

impl RenderLogger for LogLogger {
    fn warning(&self, tag: Option<&str>, message: &str) {
        log::warn!(target: TARGET, "[{}] {}", tag.unwrap_or("-"), message);
    }

    fn fidelity_warning(&self, tag: Option<&str>, message: &str) {
        log::info!(target: TARGET, "[{}] fidelity: {}", tag.unwrap_or("-"), message);
    }

    fn error(&self, tag: Option<&str>, message: &str, cause: Option<&anyhow::Error>) {
        match cause {
            Some(cause) => log::error!(target: TARGET, "[{}] {}: {:#}", tag.unwrap_or("-"), message, cause),
            None => log::error!(target: TARGET, "[{}] {}", tag.unwrap_or("-"), message),
        }
    }
}
