//! The tree walker producing HTML fragments from document nodes.

use crate::Result;
use crate::config::ConvertFeat;
use crate::model::{Node, ParagraphHeading};

use super::image::{ImageExtractor, ImageRecord};
use super::list::ListCounters;
use super::text::render_text;

/// Where a node sits among its siblings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Position<'a> {
    /// The sibling following the node, if any.
    pub next_sibling: Option<&'a Node>,
    /// Whether nothing follows the node in the whole document.
    pub at_document_end: bool,
}

impl<'a> Position<'a> {
    /// The position of `siblings[index]`, whose parent is at the document end
    /// if `parent_at_end` holds.
    pub fn among(siblings: &'a [Node], index: usize, parent_at_end: bool) -> Self {
        Self {
            next_sibling: siblings.get(index + 1),
            at_document_end: parent_at_end && index + 1 == siblings.len(),
        }
    }
}

/// Renders the nodes of one document.
///
/// The renderer owns the list counters and the extracted images of a single
/// conversion. Create a new one for every document.
pub struct HtmlRenderer<'a> {
    feat: &'a ConvertFeat,
    extractor: ImageExtractor<'a>,
    lists: ListCounters,
    images: Vec<ImageRecord>,
}

impl<'a> HtmlRenderer<'a> {
    /// Creates a renderer for the document called `document_name`.
    pub fn new(document_name: &'a str, feat: &'a ConvertFeat) -> Self {
        Self {
            feat,
            extractor: ImageExtractor::new(document_name, &feat.asset_base),
            lists: ListCounters::new(),
            images: Vec::new(),
        }
    }

    /// Renders the direct children of a document body, one per line.
    pub fn render_body(&mut self, body: &[Node]) -> Result<String> {
        let fragments = body
            .iter()
            .enumerate()
            .map(|(idx, node)| self.render(node, Position::among(body, idx, true)))
            .collect::<Result<Vec<_>>>()?;

        Ok(fragments.join(self.feat.line_separator.as_str()))
    }

    /// Renders a node and its descendants.
    pub fn render(&mut self, node: &Node, pos: Position<'_>) -> Result<String> {
        match node {
            Node::Paragraph(paragraph) => {
                // Empty paragraphs only add vertical space.
                if paragraph.children.is_empty() {
                    return Ok(String::new());
                }

                let tag = block_tag(paragraph.heading);
                let mut out = format!("<{tag}>");
                self.render_children(&paragraph.children, pos.at_document_end, &mut out)?;
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
                Ok(out)
            }
            Node::ListItem(item) => {
                let is_last = pos.at_document_end
                    || pos.next_sibling.is_some_and(|next| !next.is_list_item());
                let markup = self.lists.visit(item, is_last);

                let mut out = String::from(markup.prefix.as_str());
                self.render_children(&item.children, pos.at_document_end, &mut out)?;
                out.push_str(&markup.suffix);
                Ok(out)
            }
            Node::Image(image) => self.extractor.extract(image, &mut self.images),
            Node::Text(run) => render_text(run),
            Node::Container { children } => {
                let mut out = String::new();
                self.render_children(children, pos.at_document_end, &mut out)?;
                Ok(out)
            }
            Node::Unsupported { kind } => {
                log::debug!("skipping unsupported element: {kind}");
                Ok(String::new())
            }
        }
    }

    fn render_children(&mut self, children: &[Node], at_end: bool, out: &mut String) -> Result<()> {
        for (idx, child) in children.iter().enumerate() {
            let fragment = self.render(child, Position::among(children, idx, at_end))?;
            out.push_str(&fragment);
        }
        Ok(())
    }

    /// The list counters accumulated so far.
    pub fn lists(&self) -> &ListCounters {
        &self.lists
    }

    /// The images extracted so far.
    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    /// Finishes rendering, yielding the extracted images.
    pub fn into_images(self) -> Vec<ImageRecord> {
        self.images
    }
}

/// The block tag of each paragraph style.
fn block_tag(heading: ParagraphHeading) -> &'static str {
    match heading {
        ParagraphHeading::Heading1 => "h1",
        ParagraphHeading::Heading2 => "h2",
        ParagraphHeading::Heading3 => "h3",
        ParagraphHeading::Heading4 => "h4",
        ParagraphHeading::Heading5 => "h5",
        ParagraphHeading::Heading6 => "h6",
        ParagraphHeading::Normal | ParagraphHeading::Title | ParagraphHeading::Subtitle => "p",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GlyphType, ListItem, TextAttributes, TextRun};

    fn render_one(node: &Node) -> String {
        let feat = ConvertFeat::default();
        let mut renderer = HtmlRenderer::new("Doc", &feat);
        renderer.render(node, Position::default()).unwrap()
    }

    #[test]
    fn headings() {
        let cases = [
            (ParagraphHeading::Normal, "<p>x</p>"),
            (ParagraphHeading::Title, "<p>x</p>"),
            (ParagraphHeading::Subtitle, "<p>x</p>"),
            (ParagraphHeading::Heading1, "<h1>x</h1>"),
            (ParagraphHeading::Heading2, "<h2>x</h2>"),
            (ParagraphHeading::Heading3, "<h3>x</h3>"),
            (ParagraphHeading::Heading4, "<h4>x</h4>"),
            (ParagraphHeading::Heading5, "<h5>x</h5>"),
            (ParagraphHeading::Heading6, "<h6>x</h6>"),
        ];
        for (heading, expected) in cases {
            assert_eq!(render_one(&Node::heading(heading, vec![Node::text("x")])), expected);
        }
    }

    #[test]
    fn empty_paragraph_is_dropped() {
        assert_eq!(render_one(&Node::paragraph(Vec::new())), "");
        assert_eq!(
            render_one(&Node::heading(ParagraphHeading::Heading1, Vec::new())),
            ""
        );
    }

    #[test]
    fn containers_concatenate() {
        let node = Node::Container {
            children: vec![
                Node::text("a"),
                Node::Unsupported {
                    kind: "horizontal_rule".into(),
                },
                Node::paragraph(vec![Node::text("b"), Node::text("c")]),
            ],
        };
        assert_eq!(render_one(&node), "a<p>bc</p>");
    }

    #[test]
    fn paragraph_with_spans() {
        let run = TextRun::plain("Hello world")
            .with_span(0, TextAttributes::bold())
            .with_span(6, TextAttributes::default());
        let node = Node::paragraph(vec![Node::Text(run)]);
        assert_eq!(render_one(&node), "<p><strong>Hello </strong>world</p>");
    }

    #[test]
    fn last_list_item_of_document_closes() {
        let body = vec![
            Node::paragraph(vec![Node::text("intro")]),
            Node::ListItem(ListItem::new(
                "l",
                0,
                GlyphType::Number,
                vec![Node::text("only")],
            )),
        ];
        let feat = ConvertFeat::default();
        let mut renderer = HtmlRenderer::new("Doc", &feat);
        let html = renderer.render_body(&body).unwrap();

        assert_eq!(html, "<p>intro</p>\r<ol class=\"list\">\n\t<li>only</li>\n</ol>");
    }

    #[test]
    fn list_followed_by_other_list_stays_open() {
        let body = vec![
            Node::ListItem(ListItem::new("a", 0, GlyphType::Bullet, vec![Node::text("1")])),
            Node::ListItem(ListItem::new("b", 0, GlyphType::Bullet, vec![Node::text("2")])),
            Node::paragraph(vec![Node::text("end")]),
        ];
        let feat = ConvertFeat {
            line_separator: "\n".into(),
            ..ConvertFeat::default()
        };
        let mut renderer = HtmlRenderer::new("Doc", &feat);
        let html = renderer.render_body(&body).unwrap();

        assert_eq!(
            html,
            "<ul class=\"list\">\n\t<li>1</li>\n\
             <ul class=\"list\">\n\t<li>2</li>\n</ul>\n\
             <p>end</p>"
        );
    }
}
