//! Template functions.
//!
//! Functions come in two layers:
//!
//! - Static functions ([`FunctionMap::static_functions`]) are registered on
//!   every environment before its template is compiled. They depend only on
//!   the engine's configuration.
//! - Dynamic functions ([`dynamic_functions`]) are rebuilt for every render
//!   call and close over the request's [`Printer`]. They are attached to a
//!   derived copy of the template and dropped with it.
//!
//! | Function | Layer | Description |
//! |----------|-------|-------------|
//! | `route(name, key, value, ...)` | static | Path of a named route, marked safe |
//! | `base_url()` / `root_url()` | static | Configured public URLs, marked safe |
//! | `safe_html(s)` | static | Marks `s` as safe markup |
//! | `truncate(s, max)` | static | Cuts `s` to `max` characters plus `…` |
//! | `domain(url)` | static | Host part of `url` |
//! | `is_email(s)` | static | Whether `s` looks like an e-mail address |
//! | `format_file_size(n)` | static | `n` bytes as `1.5 KiB` |
//! | `isodate(ts)` / `rfc2822(ts)` | static | Timestamp formatting |
//! | `languages()` | static | `(code, name)` pairs of supported languages |
//! | `elapsed(timezone, ts)` | dynamic | Localized relative time |
//! | `t(key, args...)` / `translate` | dynamic | Translated message |
//! | `plural(key, n, args...)` / `pluralize` | dynamic | Translated plural form |

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use minijinja::value::Rest;
use minijinja::{Environment, Error, ErrorKind, Value};
use newsdesk_locale::{available_languages, Printer};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::context::ErrorMessage;
use crate::elapsed::{elapsed_time, parse_timestamp};
use crate::route::PathResolver;

/// Source of the current time for `elapsed()`.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Clock backed by the system time.
pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid e-mail pattern"));

/// Named template functions.
#[derive(Debug, Clone, Default)]
pub struct FunctionSet {
    functions: BTreeMap<&'static str, Value>,
}

impl FunctionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a function. `function` is usually built with
    /// [`Value::from_function`].
    pub fn insert(&mut self, name: &'static str, function: Value) -> &mut Self {
        self.functions.insert(name, function);
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.functions.keys().copied()
    }

    /// Name and function pairs, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> + '_ {
        self.functions.iter().map(|(name, function)| (*name, function))
    }

    /// Registers every function as a global of `env`.
    pub fn register(&self, env: &mut Environment<'static>) {
        for (name, function) in &self.functions {
            env.add_global(*name, function.clone());
        }
    }
}

/// Builds the static function layer.
#[derive(Clone)]
pub struct FunctionMap {
    resolver: Arc<dyn PathResolver>,
    base_url: String,
    root_url: String,
}

impl FunctionMap {
    pub fn new(
        resolver: Arc<dyn PathResolver>,
        base_url: impl Into<String>,
        root_url: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            base_url: base_url.into(),
            root_url: root_url.into(),
        }
    }

    pub fn static_functions(&self) -> FunctionSet {
        let mut set = FunctionSet::new();

        let resolver = Arc::clone(&self.resolver);
        set.insert(
            "route",
            Value::from_function(move |name: String, args: Rest<Value>| -> Result<Value, Error> {
                let params = route_params(&name, &args)?;
                resolver
                    .path(&name, &params)
                    .map(Value::from_safe_string)
                    .map_err(|e| {
                        Error::new(ErrorKind::InvalidOperation, "cannot resolve route")
                            .with_source(e)
                    })
            }),
        );

        let base_url = self.base_url.clone();
        set.insert(
            "base_url",
            Value::from_function(move || Value::from_safe_string(base_url.clone())),
        );
        let root_url = self.root_url.clone();
        set.insert(
            "root_url",
            Value::from_function(move || Value::from_safe_string(root_url.clone())),
        );

        set.insert("safe_html", Value::from_function(|s: String| Value::from_safe_string(s)));
        set.insert("truncate", Value::from_function(|s: String, max: usize| truncate(&s, max)));
        set.insert("domain", Value::from_function(|url: String| domain(&url)));
        set.insert("is_email", Value::from_function(|s: String| EMAIL.is_match(&s)));
        set.insert("format_file_size", Value::from_function(format_file_size));
        set.insert(
            "isodate",
            Value::from_function(|ts: Value| -> Result<String, Error> {
                Ok(parse_timestamp(&ts)?
                    .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_default())
            }),
        );
        set.insert(
            "rfc2822",
            Value::from_function(|ts: Value| -> Result<String, Error> {
                Ok(parse_timestamp(&ts)?
                    .map(|dt| dt.to_rfc2822())
                    .unwrap_or_default())
            }),
        );
        set.insert(
            "languages",
            Value::from_function(|| Value::from_serialize(available_languages())),
        );

        set
    }
}

fn route_params(name: &str, args: &[Value]) -> Result<Vec<(String, String)>, Error> {
    if args.len() % 2 != 0 {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("route {name} expects key/value pairs, got {} arguments", args.len()),
        ));
    }
    Ok(args
        .chunks(2)
        .map(|pair| (pair[0].to_string(), pair[1].to_string()))
        .collect())
}

/// Builds the dynamic function layer for one render call.
pub fn dynamic_functions(printer: Printer, clock: Clock) -> FunctionSet {
    let printer = Arc::new(printer);
    let mut set = FunctionSet::new();

    let p = Arc::clone(&printer);
    set.insert(
        "elapsed",
        Value::from_function(move |_timezone: Value, ts: Value| -> Result<String, Error> {
            Ok(elapsed_time(&p, parse_timestamp(&ts)?, (*clock)()))
        }),
    );

    let p = Arc::clone(&printer);
    let t = Value::from_function(move |key: Value, args: Rest<Value>| {
        translate(&p, &key, args.as_slice())
    });
    set.insert("t", t.clone());
    set.insert("translate", t);

    let p = printer;
    let plural = Value::from_function(move |key: String, n: i64, args: Rest<Value>| {
        p.plural(&key, n, args.as_slice())
    });
    set.insert("plural", plural.clone());
    set.insert("pluralize", plural);

    set
}

fn translate(printer: &Printer, key: &Value, args: &[Value]) -> String {
    if let Some(key) = key.as_str() {
        return printer.printf(key, args);
    }
    if let Some(error) = key.downcast_object_ref::<ErrorMessage>() {
        return error.message().to_string();
    }
    String::new()
}

/// Cuts `s` after `max` characters and appends `…`.
pub fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((index, _)) => format!("{}…", &s[..index]),
        None => s.to_string(),
    }
}

/// Host part of an absolute URL, or the input itself.
pub fn domain(url: &str) -> String {
    let Some((_, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let authority = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    host.to_string()
}

/// Formats a byte count with binary prefixes.
pub fn format_file_size(bytes: i64) -> String {
    const UNIT: i64 = 1024;
    if bytes < UNIT {
        return format!("{bytes} B");
    }
    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    let prefix = "KMGTPE".as_bytes()[exp] as char;
    format!("{:.1} {prefix}iB", bytes as f64 / div as f64)
}
