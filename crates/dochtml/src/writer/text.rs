//! Text run rendering, rebuilding inline markup from flat attribute spans.

use std::fmt::Write;

use crate::Result;
use crate::model::{TextAttributes, TextRun, TextSpan};

/// The inline tags a span can open, in opening order.
///
/// Closing walks the table backwards, so every span is balanced.
const INLINE_TAGS: [InlineTag; 4] = [
    InlineTag::Italic,
    InlineTag::Bold,
    InlineTag::Underline,
    InlineTag::Link,
];

#[derive(Debug, Clone, Copy)]
enum InlineTag {
    Italic,
    Bold,
    Underline,
    Link,
}

impl InlineTag {
    fn open(self, attrs: &TextAttributes, out: &mut String) -> Result<()> {
        match self {
            InlineTag::Italic if attrs.italic => out.push_str("<em>"),
            InlineTag::Bold if attrs.bold => out.push_str("<strong>"),
            // Underline is dropped from the output.
            InlineTag::Underline => {}
            InlineTag::Link => {
                if let Some(url) = &attrs.link_url {
                    write!(out, r#"<a href="{url}">"#)?;
                }
            }
            InlineTag::Italic | InlineTag::Bold => {}
        }
        Ok(())
    }

    fn close(self, attrs: &TextAttributes, out: &mut String) {
        match self {
            InlineTag::Italic if attrs.italic => out.push_str("</em>"),
            InlineTag::Bold if attrs.bold => out.push_str("</strong>"),
            InlineTag::Underline => {}
            InlineTag::Link if attrs.link_url.is_some() => out.push_str("</a>"),
            InlineTag::Italic | InlineTag::Bold | InlineTag::Link => {}
        }
    }
}

/// Renders a text run as inline HTML.
///
/// Text is emitted raw; the output cleanup pass takes care of entities.
pub fn render_text(run: &TextRun) -> Result<String> {
    let spans = run.spans()?;

    if spans.len() <= 1 {
        let attrs = spans.first().map(|span| span.attrs);
        return Ok(render_uniform(&run.text, attrs));
    }

    let mut out = String::with_capacity(run.text.len() * 2);
    for span in &spans {
        render_span(span, &mut out)?;
    }
    Ok(out)
}

/// A run with one attribute set for its whole text.
fn render_uniform(text: &str, attrs: Option<&TextAttributes>) -> String {
    let bold = attrs.is_some_and(|attrs| attrs.bold);
    let italic = attrs.is_some_and(|attrs| attrs.italic);

    if bold {
        format!("<strong>{text}</strong>")
    } else if italic {
        // A fully italic run is taken for a quotation.
        format!("<blockquote>{text}</blockquote>")
    } else if is_bare_url(text) {
        format!(r#"<a href="{text}">{text}</a>"#)
    } else {
        text.to_owned()
    }
}

fn render_span(span: &TextSpan<'_>, out: &mut String) -> Result<()> {
    log::trace!("text span at {}: {:?} {:?}", span.start, span.text, span.attrs);

    for tag in INLINE_TAGS {
        tag.open(span.attrs, out)?;
    }

    let text = span.text;
    if is_reference_marker(text) {
        write!(out, "<sup>{text}</sup>")?;
    } else if is_bare_url(text) {
        write!(out, r#"<a href="{text}">{text}</a>"#)?;
    } else {
        out.push_str(text);
    }

    for tag in INLINE_TAGS.into_iter().rev() {
        tag.close(span.attrs, out);
    }
    Ok(())
}

/// Text like `[3]`, which marks a footnote reference.
fn is_reference_marker(text: &str) -> bool {
    let text = text.trim();
    text.len() >= 2 && text.starts_with('[') && text.ends_with(']')
}

fn is_bare_url(text: &str) -> bool {
    let text = text.trim();
    text.starts_with("http://") || text.starts_with("https://")
}
