//! Template compilation and the compiled template set.
//!
//! ## Groups and Trees
//!
//! Every view file is compiled into one tree together with all common
//! partials, which are concatenated in front of it in file name order:
//!
//! ```text
//! common/entry_meta.html ┐
//! common/feed.rss        │ prelude
//! common/layout.html     │
//! common/pagination.html ┘
//! views/entries.rss        → tree "main" of entry "entries.rss"
//! ```
//!
//! Standalone files are compiled alone and never see the partials.
//!
//! ## Two Variants
//!
//! The file suffix picks the escaping rule. `.html` files HTML-escape every
//! interpolated value ([`HtmlTemplate`]); anything else is rendered verbatim
//! ([`TextTemplate`]). Values returned by `safe_html()` are never escaped.
//!
//! ## Functions
//!
//! Static functions ([`FunctionMap`]) are attached before compilation.
//! Request-bound functions ([`dynamic_functions`]) are attached to a derived
//! copy of the compiled tree for each render, see [`Templater::with_functions`].
//!
//! ## Key Types
//!
//! - [`TemplateRepository`]: the compiled set, keyed by file name
//! - [`TemplateSources`]: the three source groups, embedded or from disk
//! - [`TemplateVariant`]: one compiled tree in either variant

pub mod functions;
mod repository;
mod sources;
mod variant;

pub use functions::{dynamic_functions, system_clock, Clock, FunctionMap, FunctionSet};
pub use repository::TemplateRepository;
pub use sources::{TemplateFile, TemplateSources, TEMPLATE_EXTENSIONS};
pub use variant::{
    Escaping, HtmlTemplate, Root, TemplateVariant, Templater, TextTemplate, HTML_ENTRY_POINT,
    MAIN_TEMPLATE, RSS_ENTRY_POINT,
};
