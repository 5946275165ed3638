//! Plain text to HTML rendering

use tracing::debug;

/// Turns the plain text body into the HTML alternative
pub trait Renderer: Send + Sync + 'static {
    /// Render `text` as an HTML fragment
    fn render(&self, text: &str) -> String;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&self, text: &str) -> String {
        (**self).render(text)
    }
}

/// Renders the body as CommonMark
#[cfg(feature = "markdown")]
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownRenderer;

#[cfg(feature = "markdown")]
impl Renderer for MarkdownRenderer {
    fn render(&self, text: &str) -> String {
        let parser = pulldown_cmark::Parser::new(text);

        let mut html = String::with_capacity(text.len() * 3 / 2);
        pulldown_cmark::html::push_html(&mut html, parser);

        html
    }
}

/// Keeps the body as-is apart from turning every newline into `<br>`
#[derive(Debug, Default, Clone, Copy)]
pub struct LineBreakRenderer;

impl Renderer for LineBreakRenderer {
    fn render(&self, text: &str) -> String {
        text.replace('\n', "<br>")
    }
}

/// Pick the renderer to use for this run.
///
/// Markdown is used when asked for and compiled in; otherwise the body only
/// gets its line breaks converted.
pub fn renderer_for(prefer_markdown: bool) -> Box<dyn Renderer> {
    if !prefer_markdown {
        debug!("markdown rendering disabled, using line breaks");
        return Box::new(LineBreakRenderer);
    }

    #[cfg(feature = "markdown")]
    {
        Box::new(MarkdownRenderer)
    }

    #[cfg(not(feature = "markdown"))]
    {
        tracing::warn!("built without markdown support, falling back to line breaks");
        Box::new(LineBreakRenderer)
    }
}
