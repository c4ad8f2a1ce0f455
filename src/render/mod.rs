//! Rendering boundary: immutable pages, derived views.
//!
//! Markup-to-HTML conversion is an external collaborator behind the
//! [`Render`] trait. Indexed pages are never mutated; each request derives
//! its own [`RenderedView`] from the page's raw fields, so concurrent
//! rendering of the same page cannot interfere.

use serde::Serialize;

use crate::page::Page;

/// Request context handed to the rendering collaborator
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Language of the request (not necessarily the page's own, after a
    /// translation fallback)
    pub language: &'a str,
    /// Version edition being viewed; `None` for versionless content
    pub version: Option<&'a str>,
}

/// Markup-to-HTML conversion, supplied by the caller
///
/// Must be a pure function of `(text, context)`: deriving a view twice
/// from the same page yields identical output.
pub trait Render {
    fn render(&self, text: &str, ctx: &RenderContext) -> String;
}

/// Request-scoped rendered form of one page
///
/// Owns its fields; dropping it leaves the source page untouched.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedView {
    pub title: String,
    pub short_title: String,
    pub intro: String,
    pub body_html: String,
}

impl RenderedView {
    /// Render every display field of a page into an owned view.
    ///
    /// `short_title` falls back to `title`; a missing intro renders empty.
    pub fn derive(page: &Page, renderer: &dyn Render, ctx: &RenderContext) -> RenderedView {
        let render_opt =
            |field: &str| page.raw_field(field).map(|text| renderer.render(text, ctx));

        RenderedView {
            title: render_opt("title").unwrap_or_default(),
            short_title: render_opt("short_title").unwrap_or_default(),
            intro: render_opt("intro").unwrap_or_default(),
            body_html: render_opt("body").unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::testutil::make_page;

    /// Stub collaborator: wraps input so renders are distinguishable from
    /// raw fields.
    struct TagRenderer;

    impl Render for TagRenderer {
        fn render(&self, text: &str, ctx: &RenderContext) -> String {
            format!("<{}>{}</{}>", ctx.language, text, ctx.language)
        }
    }

    fn ctx() -> RenderContext<'static> {
        RenderContext {
            language: "en",
            version: Some("2.1"),
        }
    }

    #[test]
    fn test_derive_renders_all_fields() {
        let mut page = make_page("guide/setup.md", "en", &["2.1"]);
        page.meta.title = Some("Setup".to_string());
        page.meta.intro = Some("How to set up.".to_string());
        page.body = "body text".to_string();

        let view = RenderedView::derive(&page, &TagRenderer, &ctx());
        assert_eq!(view.title, "<en>Setup</en>");
        assert_eq!(view.intro, "<en>How to set up.</en>");
        assert_eq!(view.body_html, "<en>body text</en>");
    }

    #[test]
    fn test_short_title_falls_back_to_title() {
        let mut page = make_page("guide/setup.md", "en", &["2.1"]);
        page.meta.title = Some("Long setup title".to_string());
        page.meta.short_title = None;

        let view = RenderedView::derive(&page, &TagRenderer, &ctx());
        assert_eq!(view.short_title, "<en>Long setup title</en>");
    }

    #[test]
    fn test_derive_is_idempotent_and_leaves_page_raw() {
        let mut page = make_page("guide/setup.md", "en", &["2.1"]);
        page.meta.title = Some("Setup".to_string());

        let first = RenderedView::derive(&page, &TagRenderer, &ctx());
        let second = RenderedView::derive(&page, &TagRenderer, &ctx());

        // Same source, same output: rendering never feeds on itself
        assert_eq!(first.title, second.title);
        assert_eq!(page.raw_field("title"), Some("Setup"));
    }

    #[test]
    fn test_missing_intro_renders_empty() {
        let page = make_page("guide/setup.md", "en", &["2.1"]);
        let view = RenderedView::derive(&page, &TagRenderer, &ctx());
        assert_eq!(view.intro, "");
    }
}
