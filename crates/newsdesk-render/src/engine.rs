//! The render pipeline.
//!
//! An [`Engine`] is built once at startup and then shared by all request
//! handlers. Building it compiles every template; a template that does not
//! compile stops the build, so a running engine always has its full set.
//!
//! ```rust
//! use newsdesk_render::{Engine, RenderContext, Router};
//!
//! let router = Router::new()
//!     .route("home", "/")
//!     .route("home_rss", "/rss")
//!     .route("feedEntries", "/feed/{feedID}/entries")
//!     .route("entry", "/entry/{entryID}");
//!
//! let engine = Engine::builder().resolver(router).build().unwrap();
//!
//! let ctx = RenderContext::new("en_US").with("rss", true);
//! let feed = engine.render("category_entries_public.html", &ctx).unwrap();
//! assert!(String::from_utf8(feed).unwrap().contains("<rss"));
//! ```
//!
//! # Rendering
//!
//! [`Engine::render`] looks up the template, binds the translation functions
//! to the context's `language`, picks the `base` or `base_rss` entry point
//! from the `rss` flag and returns the rendered bytes. The compiled set is
//! never modified by a render, so any number of threads can render at once.

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use newsdesk_locale::Catalog;

use crate::config::EngineConfig;
use crate::context::RenderContext;
use crate::error::{LoadError, RenderError};
use crate::route::{PathResolver, Router};
use crate::template::{
    dynamic_functions, system_clock, Clock, FunctionMap, FunctionSet, TemplateRepository,
    TemplateSources, Templater,
};

/// Compiled templates plus the translation catalog.
pub struct Engine {
    repository: TemplateRepository,
    functions: FunctionSet,
    catalog: Catalog,
    clock: Clock,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Builds an engine from `config` with the default route table.
    pub fn new(config: EngineConfig) -> Result<Self, LoadError> {
        Self::builder().config(config).build()
    }

    /// Builds an engine from `NEWSDESK_*` environment variables.
    pub fn from_env() -> Result<Self, LoadError> {
        Self::new(EngineConfig::from_env()?)
    }

    /// Renders `name` with `ctx`.
    pub fn render(&self, name: &str, ctx: &RenderContext) -> Result<Vec<u8>, RenderError> {
        let mut out = Vec::new();
        self.render_to(&mut out, name, ctx)?;
        Ok(out)
    }

    /// Renders `name` with `ctx` into `sink`.
    ///
    /// On error, `sink` may already hold part of the output.
    pub fn render_to(
        &self,
        sink: &mut dyn Write,
        name: &str,
        ctx: &RenderContext,
    ) -> Result<(), RenderError> {
        let template = self
            .repository
            .get(name)
            .ok_or_else(|| RenderError::TemplateNotFound(name.to_string()))?;

        let language = ctx.language().ok_or_else(|| RenderError::MissingLanguage {
            template: name.to_string(),
        })?;

        let functions = dynamic_functions(self.catalog.printer(language), Arc::clone(&self.clock));
        let template = template.with_functions(&functions);
        let entry_point = ctx.entry_point();

        tracing::debug!(template_name = name, entry_point, language, "Rendering template");

        template
            .execute(sink, entry_point, &ctx.to_value_with(&[&self.functions, &functions]))
            .map_err(|source| RenderError::Execution {
                template: name.to_string(),
                entry_point,
                source,
            })
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.repository.contains(name)
    }

    /// Names of all compiled templates, sorted.
    pub fn template_names(&self) -> Vec<&str> {
        self.repository.names()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("templates", &self.repository.names())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Engine`].
///
/// Every setting is optional:
///
/// | Setting | Default |
/// |---------|---------|
/// | [`config`](Self::config) | [`EngineConfig::default`] |
/// | [`resolver`](Self::resolver) | an empty [`Router`] |
/// | [`sources`](Self::sources) | `config.templates_dir`, else the embedded templates |
/// | [`catalog`](Self::catalog) | [`Catalog::embedded`] |
/// | [`clock`](Self::clock) | the system clock |
#[derive(Default)]
pub struct EngineBuilder {
    config: EngineConfig,
    resolver: Option<Arc<dyn PathResolver>>,
    sources: Option<TemplateSources>,
    catalog: Option<Catalog>,
    clock: Option<Clock>,
}

impl EngineBuilder {
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the resolver behind the `route()` function.
    pub fn resolver(mut self, resolver: impl PathResolver + 'static) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// Uses `sources` instead of the configured or embedded templates.
    pub fn sources(mut self, sources: TemplateSources) -> Self {
        self.sources = Some(sources);
        self
    }

    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Replaces the time source of `elapsed()`.
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Compiles all templates.
    pub fn build(self) -> Result<Engine, LoadError> {
        let sources = match (self.sources, &self.config.templates_dir) {
            (Some(sources), _) => sources,
            (None, Some(dir)) => TemplateSources::from_dir(dir)?,
            (None, None) => TemplateSources::embedded(),
        };
        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => Catalog::embedded()?,
        };
        let resolver = self
            .resolver
            .unwrap_or_else(|| Arc::new(Router::new()) as Arc<dyn PathResolver>);

        let functions =
            FunctionMap::new(resolver, self.config.base_url, self.config.root_url).static_functions();
        let repository = TemplateRepository::parse(&sources, &functions)?;

        tracing::info!(templates = repository.len(), "Compiled templates");

        Ok(Engine {
            repository,
            functions,
            catalog,
            clock: self.clock.unwrap_or_else(system_clock),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_engine_is_send_and_sync() {
        assert_send_sync::<Engine>();
    }

    #[test]
    fn test_default_build_uses_embedded_templates() {
        let engine = Engine::builder().build().unwrap();
        assert_eq!(
            engine.template_names(),
            vec!["category_entries_public.html", "entries.rss", "offline.html"]
        );
        assert!(engine.has_template("offline.html"));
        assert!(!engine.has_template("offline"));
        assert!(engine.catalog().contains("fr_FR"));
    }

    #[test]
    fn test_unknown_template() {
        let engine = Engine::builder().build().unwrap();
        let err = engine
            .render("missing.html", &RenderContext::new("en_US"))
            .unwrap_err();
        assert!(matches!(err, RenderError::TemplateNotFound(ref name) if name == "missing.html"));
    }

    #[test]
    fn test_missing_language() {
        let engine = Engine::builder().build().unwrap();
        let err = engine
            .render("offline.html", &RenderContext::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingLanguage { .. }));
    }

    #[test]
    fn test_execution_error_names_entry_point() {
        let sources = TemplateSources::from_entries(
            &[],
            &[("page.html", "{% macro base() %}{{ nope() }}{% endmacro %}")],
            &[],
        );
        let engine = Engine::builder().sources(sources).build().unwrap();
        let err = engine
            .render("page.html", &RenderContext::new("en_US"))
            .unwrap_err();
        match err {
            RenderError::Execution {
                template,
                entry_point,
                ..
            } => {
                assert_eq!(template, "page.html");
                assert_eq!(entry_point, "base");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_templates_dir_from_config() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("standalone")).unwrap();
        std::fs::write(tmp.path().join("standalone/hello.html"), "hi {{ name }}").unwrap();

        let config = EngineConfig::default().with_templates_dir(tmp.path());
        let engine = Engine::new(config).unwrap();
        assert_eq!(engine.template_names(), vec!["hello.html"]);

        let out = engine
            .render("hello.html", &RenderContext::new("en_US").with("name", "<you>"))
            .unwrap();
        assert_eq!(out, b"hi &lt;you&gt;");
    }

    #[test]
    fn test_missing_templates_dir_fails_build() {
        let config = EngineConfig::default().with_templates_dir("/definitely/not/here");
        assert!(matches!(Engine::new(config), Err(LoadError::Read { .. })));
    }

    #[test]
    fn test_debug_lists_templates() {
        let engine = Engine::builder().build().unwrap();
        assert!(format!("{engine:?}").contains("entries.rss"));
    }
}
