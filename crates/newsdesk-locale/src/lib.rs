//! # Newsdesk Locale - Translations for Rendered Pages
//!
//! `newsdesk-locale` holds the translation catalogs used by the newsdesk
//! template engine. It is deliberately small: no template engine types leak
//! into it, so it can be used from request handlers as well (for example to
//! build an RSS channel description outside of a template).
//!
//! ## Core Concepts
//!
//! - [`Catalog`]: Message tables keyed by language code (`en_US`, `fr_FR`, ...)
//! - [`Printer`]: A catalog view bound to one language, cheap to clone
//! - [`plural_form`]: Index of the plural form to use for a count
//! - [`sprintf`]: Go-style `%s`/`%d` message formatting
//!
//! ## Example
//!
//! ```rust
//! use newsdesk_locale::Catalog;
//!
//! let catalog = Catalog::embedded().unwrap();
//! let printer = catalog.printer("fr_FR");
//!
//! assert_eq!(printer.plural("time_elapsed.minutes", 1, &[1]), "il y a 1 minute");
//! assert_eq!(printer.plural("time_elapsed.minutes", 5, &[5]), "il y a 5 minutes");
//!
//! // Unknown keys fall back to the key itself.
//! assert_eq!(printer.message("no.such.key"), "no.such.key");
//! ```

mod catalog;
mod error;
mod format;
mod plural;
mod printer;

pub use catalog::{available_languages, Catalog, Message, Messages, DEFAULT_LANGUAGE};
pub use error::CatalogError;
pub use format::sprintf;
pub use plural::plural_form;
pub use printer::Printer;
