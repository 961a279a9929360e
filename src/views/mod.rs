//! HTML views rendered with askama templates from `templates/`.
//!
//! Views never see raw upstream JSON in templates: each one first reduces
//! the [`Entity`] to a small model of strings and lists.

mod entity;

pub use entity::{HomeView, MovieView, PersonView, TvView};

use askama::Template;
use cineshelf_common::{EntityKind, Error, Result};

use crate::i18n::Labels;
use crate::metadata::Entity;

/// Everything a view may read.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    /// Projected data, `None` when nothing was loaded.
    pub data: Option<&'a Entity>,
    pub base_path: &'a str,
    pub pathname: &'a str,
    pub labels: &'a Labels,
}

/// A page body.
pub trait PageView: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn render(&self, ctx: &ViewContext<'_>) -> Result<String>;
}

/// View registered for each entity kind.
pub fn view_for(kind: EntityKind) -> std::sync::Arc<dyn PageView> {
    match kind {
        EntityKind::Movie => std::sync::Arc::new(MovieView),
        EntityKind::Person => std::sync::Arc::new(PersonView),
        EntityKind::Tv => std::sync::Arc::new(TvView),
    }
}

pub(crate) fn render_template<T: Template>(template: &T) -> Result<String> {
    template.render().map_err(|e| Error::template(e.to_string()))
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

pub struct LayoutParams<'a> {
    pub title: &'a str,
    /// Pre-rendered head markup (hreflang links).
    pub head: &'a str,
    /// Pre-rendered body markup.
    pub body: &'a str,
    pub loading: bool,
    pub base_path: &'a str,
    pub labels: &'a Labels,
}

#[derive(Template)]
#[template(path = "layout.html")]
struct LayoutTemplate<'a> {
    lang: &'a str,
    title: &'a str,
    head: &'a str,
    body: &'a str,
    loading: bool,
    base_path: &'a str,
    labels: &'a Labels,
}

/// Wrap a body in the document layout.
pub fn layout(params: &LayoutParams<'_>) -> Result<String> {
    render_template(&LayoutTemplate {
        lang: params.labels.language(),
        title: params.title,
        head: params.head,
        body: params.body,
        loading: params.loading,
        base_path: params.base_path,
        labels: params.labels,
    })
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    labels: &'a Labels,
}

/// Placeholder shown when there is no data to display.
pub fn error_placeholder(labels: &Labels) -> Result<String> {
    render_template(&ErrorTemplate { labels })
}

/// `<title>` text: the entity's title or name, followed by the site name.
pub fn document_title(data: Option<&Entity>, labels: &Labels) -> String {
    let site = labels.get("app.name");
    match data.and_then(|d| d.text("title").or_else(|| d.text("name"))) {
        Some(title) => format!("{title} | {site}"),
        None => site.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;
    use serde_json::json;

    fn labels() -> Labels {
        let mut catalog = Catalog::empty("en");
        catalog.insert(
            "en",
            "common",
            [("app.name", "Cineshelf"), ("loading", "Loading…")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        catalog.bundle("en", &["common".to_string()])
    }

    #[test]
    fn layout_keeps_head_and_body_markup() {
        let labels = labels();
        let html = layout(&LayoutParams {
            title: "Heat | Cineshelf",
            head: "<link rel=\"alternate\" hreflang=\"x-default\" href=\"/movie/1\">",
            body: "<p>body</p>",
            loading: true,
            base_path: "",
            labels: &labels,
        })
        .unwrap();

        assert!(html.contains("<html lang=\"en\">"));
        assert!(html.contains("<link rel=\"alternate\" hreflang=\"x-default\" href=\"/movie/1\">"));
        assert!(html.contains("<p>body</p>"));
        assert!(html.contains("data-loading=\"true\""));
        assert!(html.contains("Loading…"));
    }

    #[test]
    fn layout_escapes_title() {
        let labels = labels();
        let html = layout(&LayoutParams {
            title: "<script>",
            head: "",
            body: "",
            loading: false,
            base_path: "",
            labels: &labels,
        })
        .unwrap();
        assert!(!html.contains("<title><script>"));
        assert!(html.contains("data-loading=\"false\""));
    }

    #[test]
    fn document_title_prefers_title_then_name() {
        let labels = labels();
        let movie: Entity = serde_json::from_value(json!({"id": 1, "title": "Heat"})).unwrap();
        let person: Entity = serde_json::from_value(json!({"id": 2, "name": "Al Pacino"})).unwrap();
        assert_eq!(document_title(Some(&movie), &labels), "Heat | Cineshelf");
        assert_eq!(document_title(Some(&person), &labels), "Al Pacino | Cineshelf");
        assert_eq!(document_title(None, &labels), "Cineshelf");
    }

    #[test]
    fn error_placeholder_renders() {
        let html = error_placeholder(&labels()).unwrap();
        assert!(html.contains("class=\"error\""));
    }
}
