//! Compiled template variants.
//!
//! Pages and feeds are compiled by the same engine with different escaping
//! rules. An [`HtmlTemplate`] HTML-escapes every interpolated value, a
//! [`TextTemplate`] inserts values verbatim so that feeds can embed raw
//! markup in `CDATA` sections. Both implement [`Templater`], and
//! [`TemplateVariant`] holds either one behind a single type.
//!
//! # Entry Points
//!
//! A view is compiled as one template named [`MAIN_TEMPLATE`] whose
//! top-level macros are its entry points:
//!
//! ```jinja
//! {% macro base() %}<html>...</html>{% endmacro %}
//! {% macro base_rss() %}<rss>...</rss>{% endmacro %}
//! ```
//!
//! Executing an entry point evaluates the template once, which defines the
//! macros and discards the top-level output, then calls the named macro.
//!
//! A standalone file has no macros to select from. It is compiled under the
//! name of its only entry point (`base` for `.html`, `base_rss` otherwise)
//! and executing it renders the whole file.

use std::io::Write;

use minijinja::{AutoEscape, Environment, Error, ErrorKind, UndefinedBehavior, Value};

use super::functions::FunctionSet;

/// Name of the compiled tree of a view.
pub const MAIN_TEMPLATE: &str = "main";

/// Entry point rendered for pages.
pub const HTML_ENTRY_POINT: &str = "base";

/// Entry point rendered for feeds.
pub const RSS_ENTRY_POINT: &str = "base_rss";

/// Escaping applied to interpolated values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Escaping {
    /// HTML-escape values unless they are marked safe.
    Html,
    /// Insert values verbatim.
    None,
}

impl Escaping {
    /// `.html` files escape, everything else (`.rss`) does not.
    pub fn for_file(name: &str) -> Self {
        if name.ends_with(".html") {
            Escaping::Html
        } else {
            Escaping::None
        }
    }

    fn auto_escape(self) -> AutoEscape {
        match self {
            Escaping::Html => AutoEscape::Html,
            Escaping::None => AutoEscape::None,
        }
    }
}

/// How a compiled tree exposes its entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Root {
    /// A view: entry points are top-level macros of [`MAIN_TEMPLATE`].
    Main,
    /// A standalone file: the tree itself is the only entry point.
    Standalone,
}

impl Root {
    fn template_name(self, escaping: Escaping) -> &'static str {
        match (self, escaping) {
            (Root::Main, _) => MAIN_TEMPLATE,
            (Root::Standalone, Escaping::Html) => HTML_ENTRY_POINT,
            (Root::Standalone, Escaping::None) => RSS_ENTRY_POINT,
        }
    }
}

/// Common interface of both variants.
pub trait Templater: Send + Sync {
    /// Renders `entry_point` with `context` into `sink`.
    fn execute(&self, sink: &mut dyn Write, entry_point: &str, context: &Value) -> Result<(), Error>;

    /// Returns a copy that also sees `functions`.
    ///
    /// The compiled tree is shared with `self`, which is left unchanged.
    fn with_functions(&self, functions: &FunctionSet) -> Self
    where
        Self: Sized;

    /// Escaping applied to interpolated values.
    fn escaping(&self) -> Escaping;
}

#[derive(Debug, Clone)]
struct CompiledTree {
    env: Environment<'static>,
    root: Root,
    escaping: Escaping,
}

impl CompiledTree {
    fn compile(
        source: String,
        root: Root,
        escaping: Escaping,
        functions: &FunctionSet,
    ) -> Result<Self, Error> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(move |_| escaping.auto_escape());
        env.set_undefined_behavior(UndefinedBehavior::Lenient);
        env.set_keep_trailing_newline(true);
        functions.register(&mut env);
        env.add_template_owned(root.template_name(escaping), source)?;
        Ok(Self {
            env,
            root,
            escaping,
        })
    }

    fn with_functions(&self, functions: &FunctionSet) -> Self {
        let mut derived = self.clone();
        functions.register(&mut derived.env);
        derived
    }

    fn execute(&self, sink: &mut dyn Write, entry_point: &str, context: &Value) -> Result<(), Error> {
        match self.root {
            Root::Main => {
                let tmpl = self.env.get_template(MAIN_TEMPLATE)?;
                let state = tmpl.eval_to_state(context)?;
                let entry = state
                    .lookup(entry_point)
                    .filter(|value| !value.is_undefined() && !value.is_none())
                    .ok_or_else(|| {
                        Error::new(
                            ErrorKind::TemplateNotFound,
                            format!("no entry point named {entry_point}"),
                        )
                    })?;
                let output = entry.call(&state, &[])?;
                sink.write_all(output.to_string().as_bytes())
                    .map_err(|e| {
                        Error::new(ErrorKind::WriteFailure, "failed to write output").with_source(e)
                    })
            }
            Root::Standalone => {
                let tmpl = self.env.get_template(entry_point)?;
                tmpl.render_to_write(context, &mut *sink)?;
                Ok(())
            }
        }
    }
}

/// A template rendered with HTML escaping.
#[derive(Debug, Clone)]
pub struct HtmlTemplate(CompiledTree);

impl HtmlTemplate {
    pub fn compile(source: String, root: Root, functions: &FunctionSet) -> Result<Self, Error> {
        CompiledTree::compile(source, root, Escaping::Html, functions).map(Self)
    }
}

impl Templater for HtmlTemplate {
    fn execute(&self, sink: &mut dyn Write, entry_point: &str, context: &Value) -> Result<(), Error> {
        self.0.execute(sink, entry_point, context)
    }

    fn with_functions(&self, functions: &FunctionSet) -> Self {
        Self(self.0.with_functions(functions))
    }

    fn escaping(&self) -> Escaping {
        self.0.escaping
    }
}

/// A template rendered without escaping.
#[derive(Debug, Clone)]
pub struct TextTemplate(CompiledTree);

impl TextTemplate {
    pub fn compile(source: String, root: Root, functions: &FunctionSet) -> Result<Self, Error> {
        CompiledTree::compile(source, root, Escaping::None, functions).map(Self)
    }
}

impl Templater for TextTemplate {
    fn execute(&self, sink: &mut dyn Write, entry_point: &str, context: &Value) -> Result<(), Error> {
        self.0.execute(sink, entry_point, context)
    }

    fn with_functions(&self, functions: &FunctionSet) -> Self {
        Self(self.0.with_functions(functions))
    }

    fn escaping(&self) -> Escaping {
        self.0.escaping
    }
}

/// Either variant.
#[derive(Debug, Clone)]
pub enum TemplateVariant {
    Html(HtmlTemplate),
    Text(TextTemplate),
}

impl TemplateVariant {
    /// Compiles `source`, choosing the variant from the file name.
    pub fn compile(
        file_name: &str,
        source: String,
        root: Root,
        functions: &FunctionSet,
    ) -> Result<Self, Error> {
        match Escaping::for_file(file_name) {
            Escaping::Html => HtmlTemplate::compile(source, root, functions).map(Self::Html),
            Escaping::None => TextTemplate::compile(source, root, functions).map(Self::Text),
        }
    }
}

impl Templater for TemplateVariant {
    fn execute(&self, sink: &mut dyn Write, entry_point: &str, context: &Value) -> Result<(), Error> {
        match self {
            TemplateVariant::Html(t) => t.execute(sink, entry_point, context),
            TemplateVariant::Text(t) => t.execute(sink, entry_point, context),
        }
    }

    fn with_functions(&self, functions: &FunctionSet) -> Self {
        match self {
            TemplateVariant::Html(t) => TemplateVariant::Html(t.with_functions(functions)),
            TemplateVariant::Text(t) => TemplateVariant::Text(t.with_functions(functions)),
        }
    }

    fn escaping(&self) -> Escaping {
        match self {
            TemplateVariant::Html(t) => t.escaping(),
            TemplateVariant::Text(t) => t.escaping(),
        }
    }
}
