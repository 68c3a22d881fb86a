//! # Newsdesk Render - Page and Feed Templates
//!
//! `newsdesk-render` compiles the page and feed templates of the newsdesk
//! feed reader at startup and renders them per request. The same view can
//! produce an HTML page or an RSS document; the request's `rss` flag picks
//! which one.
//!
//! ## Core Concepts
//!
//! - [`Engine`]: compiled templates plus translations, built once and shared
//! - [`RenderContext`]: the data of one render call, including its `language`
//! - [`OutputKind`]: HTML or RSS, with the matching content type
//! - [`PathResolver`] / [`Router`]: named routes behind the `route()` function
//! - [`EngineConfig`]: URLs and the optional template directory
//!
//! ## Quick Start
//!
//! ```rust
//! use newsdesk_render::{Engine, OutputKind, RenderContext};
//!
//! let engine = Engine::builder().build().unwrap();
//!
//! let ctx = RenderContext::new("fr_FR");
//! let page = engine.render("offline.html", &ctx).unwrap();
//! let page = String::from_utf8(page).unwrap();
//!
//! assert!(page.contains("Mode hors ligne"));
//! assert_eq!(OutputKind::for_context(&ctx).content_type(), "text/html; charset=utf-8");
//! ```
//!
//! ## Template Layout
//!
//! | Group | Compiled as | Entry points |
//! |-------|-------------|--------------|
//! | `common/` | prefix of every view | none |
//! | `views/` | one tree per file, partials first | `base` and `base_rss` macros |
//! | `standalone/` | one tree per file, alone | the file itself |
//!
//! `.html` templates escape interpolated values, other templates do not. See
//! the [`template`] module for details.
//!
//! ## Translations
//!
//! Every render binds `t`, `plural` and `elapsed` to the context's language.
//! Missing translations never fail a render; the key is printed instead.
//!
//! ## Configuration
//!
//! [`Engine::from_env`] reads `NEWSDESK_BASE_URL`, `NEWSDESK_ROOT_URL` and
//! `NEWSDESK_TEMPLATES_DIR`. See [`EngineConfig`].

mod config;
mod context;
mod elapsed;
mod engine;
mod error;
mod route;
pub mod template;

pub use crate::config::EngineConfig;
pub use context::{ErrorMessage, OutputKind, RenderContext, LANGUAGE_KEY, RSS_KEY};
pub use elapsed::{elapsed_time, parse_timestamp};
pub use engine::{Engine, EngineBuilder};
pub use error::{LoadError, RenderError};
pub use route::{PathResolver, RouteError, Router};

pub use newsdesk_locale::{Catalog, Printer};
