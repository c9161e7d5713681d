//! Server-side configuration for htmx response compilation.

use serde::Deserialize;

/// Configuration shared by every request passing through [`HtmxLayer`](super::HtmxLayer).
///
/// # Examples
///
/// ```
/// use htmx_axum_http::ServerConfig;
///
/// let config = ServerConfig {
///     context_path: "/app".to_string(),
///     ..Default::default()
/// };
/// assert!(config.context_relative);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Path prefix the application is mounted under, e.g. `/app`. Empty for the root.
    pub context_path: String,

    /// Prefix absolute URLs (`/...`) in `HX-Push-Url`, `HX-Replace-Url` and `HX-Location`
    /// with the context path.
    pub context_relative: bool,

    /// Log each compiled response at debug level.
    pub enable_logging: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            context_path: String::new(),
            context_relative: true,
            enable_logging: false,
        }
    }
}

impl ServerConfig {
    /// The context path with a leading `//` collapsed and any trailing `/` removed.
    #[must_use]
    pub fn normalized_context_path(&self) -> String {
        normalize_context_path(&self.context_path)
    }
}

pub(crate) fn normalize_context_path(path: &str) -> String {
    let mut path = path.trim();
    while path.starts_with("//") {
        path = &path[1..];
    }
    path.trim_end_matches('/').to_string()
}
