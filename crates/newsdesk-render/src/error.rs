//! Error types for loading and rendering templates.
//!
//! Two error types cover the two phases of the engine's life:
//!
//! - [`LoadError`]: raised while the engine is built. The process should not
//!   start serving with an incomplete template set.
//! - [`RenderError`]: raised by [`Engine::render`](crate::Engine::render).
//!   Every variant is a programmer error (an unknown template name, a context
//!   without a language, a template that fails to execute). Request handlers
//!   are expected to turn any of them into a server error response.

use std::path::PathBuf;

use newsdesk_locale::CatalogError;

/// Error raised while building the template repository.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A template directory or file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template failed to compile.
    #[error("failed to parse template {name}: {source}")]
    Syntax {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// Two template files resolve to the same name.
    #[error("template {name} is defined more than once")]
    DuplicateTemplate { name: String },

    /// The translation catalog could not be built.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The engine configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
}

/// Error raised while rendering a template.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// No template with this name was compiled.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// The render context has no string `language` value.
    #[error("render context for {template} has no language")]
    MissingLanguage { template: String },

    /// The template failed while executing.
    #[error("failed to execute {entry_point} in {template}: {source}")]
    Execution {
        template: String,
        entry_point: &'static str,
        #[source]
        source: minijinja::Error,
    },
}

impl RenderError {
    /// Name of the template the error refers to.
    pub fn template(&self) -> &str {
        match self {
            RenderError::TemplateNotFound(name) => name,
            RenderError::MissingLanguage { template } => template,
            RenderError::Execution { template, .. } => template,
        }
    }
}
