//! Translation catalogs.
//!
//! A [`Catalog`] maps language codes to message tables. Tables are JSON
//! objects whose values are either a single message or an array of plural
//! forms:
//!
//! ```json
//! {
//!     "page.unread.title": "Unread",
//!     "time_elapsed.minutes": ["%d minute ago", "%d minutes ago"]
//! }
//! ```
//!
//! The tables shipped with this crate are compiled into the binary and parsed
//! by [`Catalog::embedded`]. Parsing happens once, when the application builds
//! its catalog; there is no lazily initialized global.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::CatalogError;
use crate::printer::Printer;

/// Language used when a request does not carry a usable preference.
pub const DEFAULT_LANGUAGE: &str = "en_US";

const EMBEDDED_TABLES: &[(&str, &str)] = &[
    ("de_DE", include_str!("../translations/de_DE.json")),
    ("en_US", include_str!("../translations/en_US.json")),
    ("fr_FR", include_str!("../translations/fr_FR.json")),
    ("pl_PL", include_str!("../translations/pl_PL.json")),
    ("ru_RU", include_str!("../translations/ru_RU.json")),
];

const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("de_DE", "Deutsch"),
    ("en_US", "English"),
    ("fr_FR", "Français"),
    ("pl_PL", "Polski"),
    ("ru_RU", "Русский"),
];

/// Returns the `(code, display name)` pairs of the embedded languages,
/// sorted by code.
pub fn available_languages() -> &'static [(&'static str, &'static str)] {
    LANGUAGE_NAMES
}

/// One entry of a message table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Message {
    /// A plain message.
    Single(String),
    /// Plural forms, indexed by [`plural_form`](crate::plural_form).
    Plural(Vec<String>),
}

/// A message table for one language.
pub type Messages = HashMap<String, Message>;

/// Message tables keyed by language code.
///
/// Tables are reference counted so that [`Printer`]s handed out per request
/// share them without copying.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: HashMap<String, Arc<Messages>>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the tables shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if an embedded table is malformed.
    pub fn embedded() -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for (language, json) in EMBEDDED_TABLES {
            catalog.add_json(language, json)?;
        }
        Ok(catalog)
    }

    /// Parses `json` and registers it as the table for `language`.
    ///
    /// Messages are merged into an existing table for the same language;
    /// keys present in `json` replace the existing ones.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyLanguage`] for an empty code and
    /// [`CatalogError::Parse`] if `json` is not an object of messages.
    pub fn add_json(&mut self, language: &str, json: &str) -> Result<(), CatalogError> {
        if language.is_empty() {
            return Err(CatalogError::EmptyLanguage);
        }

        let messages: Messages =
            serde_json::from_str(json).map_err(|source| CatalogError::Parse {
                language: language.to_string(),
                source,
            })?;

        let table = self.tables.entry(language.to_string()).or_default();
        Arc::make_mut(table).extend(messages);
        Ok(())
    }

    /// Returns a printer bound to `language`.
    ///
    /// Unknown languages get an empty table, so every lookup falls back to
    /// the message key.
    pub fn printer(&self, language: &str) -> Printer {
        let messages = self.tables.get(language).cloned().unwrap_or_default();
        Printer::new(language, messages)
    }

    /// Whether a table is registered for `language`.
    pub fn contains(&self, language: &str) -> bool {
        self.tables.contains_key(language)
    }

    /// Registered language codes, in no particular order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(|k| k.as_str())
    }
}
