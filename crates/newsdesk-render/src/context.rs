//! Per-request render data.
//!
//! A [`RenderContext`] is the mapping a request handler fills before asking the
//! engine to render a page or a feed. Two keys are interpreted by the engine
//! itself; everything else is opaque and only read by templates:
//!
//! | Key | Type | Meaning |
//! |-----|------|---------|
//! | `language` | string | Language of the translation functions (required) |
//! | `rss` | bool | Render the `base_rss` entry point instead of `base` |
//!
//! # Example
//!
//! ```rust
//! use newsdesk_render::{OutputKind, RenderContext};
//!
//! let mut ctx = RenderContext::new("en_US");
//! ctx.set("menu", "categories").set("total", 42);
//! assert_eq!(OutputKind::for_context(&ctx), OutputKind::Html);
//!
//! let feed = RenderContext::new("en_US").with("rss", true);
//! assert_eq!(OutputKind::for_context(&feed), OutputKind::Rss);
//! ```
//!
//! # Error Values
//!
//! Handlers sometimes pass an error to a template so that it can be shown to
//! the user. [`RenderContext::set_error`] stores it as an [`ErrorMessage`],
//! which the `t` translation function prints verbatim instead of looking it
//! up in the catalog.

use std::collections::BTreeMap;
use std::fmt;

use minijinja::value::Object;
use minijinja::Value;
use serde::Serialize;

use crate::template::{FunctionSet, HTML_ENTRY_POINT, RSS_ENTRY_POINT};

/// Key holding the language code.
pub const LANGUAGE_KEY: &str = "language";

/// Key holding the feed output flag.
pub const RSS_KEY: &str = "rss";

/// Data for one render call.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    values: BTreeMap<String, Value>,
}

impl RenderContext {
    /// Creates a context for `language`.
    pub fn new(language: impl Into<String>) -> Self {
        let mut ctx = Self::default();
        ctx.set_value(LANGUAGE_KEY, Value::from(language.into()));
        ctx
    }

    /// Serializes `value` and stores it under `key`.
    pub fn set<T: Serialize>(&mut self, key: impl Into<String>, value: T) -> &mut Self {
        self.set_value(key, Value::from_serialize(value))
    }

    /// Builder form of [`set`](Self::set).
    pub fn with<T: Serialize>(mut self, key: impl Into<String>, value: T) -> Self {
        self.set(key, value);
        self
    }

    /// Stores a template value as-is.
    pub fn set_value(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Stores an error so that `t(key)` prints its message untranslated.
    pub fn set_error(&mut self, key: impl Into<String>, error: impl fmt::Display) -> &mut Self {
        self.set_value(key, Value::from_object(ErrorMessage::new(error.to_string())))
    }

    /// Gets a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// The `language` value, if it is a string.
    pub fn language(&self) -> Option<&str> {
        self.values.get(LANGUAGE_KEY).and_then(|v| v.as_str())
    }

    /// Whether `rss` holds the boolean `true`.
    ///
    /// Truthy values of other types (`1`, `"yes"`) do not select the feed.
    pub fn is_rss(&self) -> bool {
        self.values
            .get(RSS_KEY)
            .is_some_and(|v| v.kind() == minijinja::value::ValueKind::Bool && v.is_true())
    }

    /// The entry point selected by the `rss` flag.
    pub fn entry_point(&self) -> &'static str {
        OutputKind::for_context(self).entry_point()
    }

    /// Converts the context into the value templates are executed with.
    pub fn to_value(&self) -> Value {
        Value::from_serialize(&self.values)
    }

    /// Like [`to_value`](Self::to_value), with every function of `layers`
    /// stored under its name.
    ///
    /// Template lookups check the context before globals, so a data key
    /// named `t` or `route` would otherwise hide the function. Functions
    /// replace data keys of the same name.
    pub fn to_value_with(&self, layers: &[&FunctionSet]) -> Value {
        let mut values = self.values.clone();
        for (name, function) in layers.iter().flat_map(|layer| layer.iter()) {
            values.insert(name.to_string(), function.clone());
        }
        Value::from_serialize(&values)
    }
}

/// An error passed to a template for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage(String);

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Object for ErrorMessage {}

/// The kind of document a render call produces.
///
/// The engine only returns bytes; response writers use this to pick the
/// `Content-Type` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    Html,
    Rss,
}

impl OutputKind {
    /// Output kind selected by the context's `rss` flag.
    pub fn for_context(ctx: &RenderContext) -> Self {
        if ctx.is_rss() {
            OutputKind::Rss
        } else {
            OutputKind::Html
        }
    }

    /// Name of the entry point rendered for this kind.
    pub fn entry_point(self) -> &'static str {
        match self {
            OutputKind::Html => HTML_ENTRY_POINT,
            OutputKind::Rss => RSS_ENTRY_POINT,
        }
    }

    /// Conventional `Content-Type` header value.
    pub fn content_type(self) -> &'static str {
        match self {
            OutputKind::Html => "text/html; charset=utf-8",
            OutputKind::Rss => "application/rss+xml; charset=utf-8",
        }
    }
}
