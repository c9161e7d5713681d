//! View fragments rendered into the response body.

use serde_json::{Map, Value};

/// A reference to a renderable unit of HTML.
///
/// A fragment is identified by its view id. It may carry inline content (already rendered
/// HTML) and extra model data for the renderer. Fragments are rendered in the order they
/// were added; htmx applies them in document order.
///
/// # Examples
///
/// ```
/// use htmx_axum_http::types::Fragment;
///
/// let fragment = Fragment::new("todos :: item")
///     .with_model("id", 42)
///     .with_model("title", "Write docs");
/// assert_eq!(fragment.view(), "todos :: item");
/// assert_eq!(fragment.model()["id"], 42);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    view: String,
    content: Option<String>,
    model: Map<String, Value>,
}

impl Fragment {
    /// A fragment resolved by the renderer from its view id.
    #[must_use]
    pub fn new(view: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            ..Self::default()
        }
    }

    /// A fragment whose HTML is already known.
    #[must_use]
    pub fn inline(view: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            content: Some(content.into()),
            model: Map::new(),
        }
    }

    /// Add a model entry for the renderer.
    #[must_use]
    pub fn with_model(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.model.insert(key.into(), value.into());
        self
    }

    /// The view identifier; unique within a response.
    #[must_use]
    pub fn view(&self) -> &str {
        &self.view
    }

    /// Inline content, if any.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Model data for the renderer.
    #[must_use]
    pub fn model(&self) -> &Map<String, Value> {
        &self.model
    }
}

impl From<&str> for Fragment {
    fn from(view: &str) -> Self {
        Self::new(view)
    }
}

impl From<String> for Fragment {
    fn from(view: String) -> Self {
        Self::new(view)
    }
}
