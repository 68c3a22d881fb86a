//! Error types for catalog loading.

/// Error raised while building a [`Catalog`](crate::Catalog).
///
/// Catalogs are loaded once at startup, so every variant is a configuration
/// error that should stop the process.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A translation table is not valid JSON or has the wrong shape.
    #[error("invalid translation table for {language}: {source}")]
    Parse {
        language: String,
        #[source]
        source: serde_json::Error,
    },

    /// A language code is empty.
    #[error("translation table registered without a language code")]
    EmptyLanguage,
}
