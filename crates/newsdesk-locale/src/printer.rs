//! Language-bound message lookup.

use std::fmt::Display;
use std::sync::Arc;

use crate::catalog::{Message, Messages};
use crate::format::sprintf;
use crate::plural::plural_form;

/// A message table bound to one language.
///
/// Printers are created per request from a [`Catalog`](crate::Catalog) and
/// are cheap to clone: the table itself is shared.
///
/// Lookups never fail. A missing key is formatted and returned as-is, which
/// keeps a page readable when a translation is incomplete.
#[derive(Debug, Clone)]
pub struct Printer {
    language: String,
    messages: Arc<Messages>,
}

impl Printer {
    /// Creates a printer for `language` over `messages`.
    pub fn new(language: impl Into<String>, messages: Arc<Messages>) -> Self {
        Self {
            language: language.into(),
            messages,
        }
    }

    /// The language code this printer was created for.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Translates `key` and formats it with `args`.
    ///
    /// If the key is missing, or maps to plural forms, the key itself is
    /// used as the format string.
    pub fn printf<A: Display>(&self, key: &str, args: &[A]) -> String {
        let format = match self.messages.get(key) {
            Some(Message::Single(message)) => message.as_str(),
            _ => key,
        };
        sprintf(format, args)
    }

    /// Translates `key` without arguments.
    pub fn message(&self, key: &str) -> String {
        self.printf::<&str>(key, &[])
    }

    /// Translates `key` into the plural form for `n` and formats it with `args`.
    ///
    /// Returns the key unformatted when it is missing, is not a plural
    /// message, or has fewer forms than the language's rule asks for.
    pub fn plural<A: Display>(&self, key: &str, n: i64, args: &[A]) -> String {
        if let Some(Message::Plural(forms)) = self.messages.get(key) {
            if let Some(form) = forms.get(plural_form(&self.language, n)) {
                return sprintf(form, args);
            }
        }
        key.to_string()
    }
}
