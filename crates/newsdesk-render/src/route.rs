//! Named route resolution for the `route()` template function.
//!
//! Templates never hard-code URLs. They ask for a route by name and pass the
//! path parameters as alternating keys and values:
//!
//! ```jinja
//! <a href="{{ route('feedEntries', 'feedID', feed.id) }}">{{ feed.title }}</a>
//! ```
//!
//! The engine only depends on the [`PathResolver`] trait. [`Router`] is a
//! small table of `{param}` patterns for applications that do not bring their
//! own router.
//!
//! Resolved paths are inserted into pages unescaped, so resolvers must
//! percent-encode parameter values. [`Router`] does.

use std::collections::HashMap;

/// Error raised when a route cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("route not found: {0}")]
    NotFound(String),

    #[error("route {route} requires parameter {param}")]
    MissingParameter { route: String, param: String },

    #[error("route {route} has an unterminated placeholder")]
    InvalidPattern { route: String },
}

/// Resolves a named route to a path.
pub trait PathResolver: Send + Sync {
    fn path(&self, name: &str, params: &[(String, String)]) -> Result<String, RouteError>;
}

/// Table of named route patterns.
///
/// ```rust
/// use newsdesk_render::{PathResolver, Router};
///
/// let router = Router::new()
///     .route("home", "/")
///     .route("feedEntries", "/feed/{feedID}/entries");
///
/// let params = vec![("feedID".to_string(), "42".to_string())];
/// assert_eq!(router.path("feedEntries", &params).unwrap(), "/feed/42/entries");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Router {
    base_path: String,
    patterns: HashMap<String, String>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefixes every resolved path with `base_path` (e.g. `/reader`).
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        let base_path = base_path.into();
        self.base_path = base_path.trim_end_matches('/').to_string();
        self
    }

    /// Adds a route, builder style.
    pub fn route(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.add(name, pattern);
        self
    }

    /// Adds or replaces a route.
    pub fn add(&mut self, name: impl Into<String>, pattern: impl Into<String>) {
        self.patterns.insert(name.into(), pattern.into());
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl PathResolver for Router {
    fn path(&self, name: &str, params: &[(String, String)]) -> Result<String, RouteError> {
        let pattern = self
            .patterns
            .get(name)
            .ok_or_else(|| RouteError::NotFound(name.to_string()))?;

        let mut path = self.base_path.clone();
        let mut rest = pattern.as_str();
        while let Some(start) = rest.find('{') {
            path.push_str(&rest[..start]);
            let end = rest[start..]
                .find('}')
                .map(|offset| start + offset)
                .ok_or_else(|| RouteError::InvalidPattern {
                    route: name.to_string(),
                })?;
            let param = &rest[start + 1..end];
            let value = params
                .iter()
                .find(|(key, _)| key == param)
                .map(|(_, value)| value)
                .ok_or_else(|| RouteError::MissingParameter {
                    route: name.to_string(),
                    param: param.to_string(),
                })?;
            encode_segment(&mut path, value);
            rest = &rest[end + 1..];
        }
        path.push_str(rest);
        Ok(path)
    }
}

/// Appends `value` to `out`, percent-encoding everything but unreserved
/// URL characters.
fn encode_segment(out: &mut String, value: &str) {
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
}
