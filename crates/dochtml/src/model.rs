//! The document tree consumed by the converter.
//!
//! The tree is plain owned data: a host either builds it in code or
//! deserializes it from JSON. The converter never mutates it.

use std::io::Read;

use ecow::EcoString;
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};

use crate::{Error, Result};

/// A document to convert.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    /// The display name of the document.
    pub name: EcoString,
    /// The direct children of the document body.
    #[serde(default)]
    pub body: Vec<Node>,
}

impl Document {
    /// Creates a document from its name and body.
    pub fn new(name: impl Into<EcoString>, body: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            body,
        }
    }

    /// Parses a document from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a document from a reader yielding JSON.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// An element of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// A body paragraph or a heading.
    Paragraph(Paragraph),
    /// One item of a list. Lists have no container node of their own.
    ListItem(ListItem),
    /// An inline image.
    Image(InlineImage),
    /// A run of text with formatting spans.
    Text(TextRun),
    /// Any other element that only groups children.
    Container {
        /// The grouped children.
        #[serde(default)]
        children: Vec<Node>,
    },
    /// An element the converter has no rendering for, e.g. a page break.
    Unsupported {
        /// The host's name for the element.
        #[serde(default)]
        kind: EcoString,
    },
}

impl Node {
    /// Creates a body paragraph.
    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph(Paragraph {
            heading: ParagraphHeading::Normal,
            children,
        })
    }

    /// Creates a paragraph with the given heading style.
    pub fn heading(heading: ParagraphHeading, children: Vec<Node>) -> Self {
        Node::Paragraph(Paragraph { heading, children })
    }

    /// Creates an unformatted text run.
    pub fn text(text: impl Into<EcoString>) -> Self {
        Node::Text(TextRun::plain(text))
    }

    /// The ordered children of the node.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Paragraph(paragraph) => &paragraph.children,
            Node::ListItem(item) => &item.children,
            Node::Container { children } => children,
            Node::Image(..) | Node::Text(..) | Node::Unsupported { .. } => &[],
        }
    }

    /// Whether the node is a list item.
    pub fn is_list_item(&self) -> bool {
        matches!(self, Node::ListItem(..))
    }
}

/// A paragraph, possibly styled as a heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// The paragraph style.
    #[serde(default)]
    pub heading: ParagraphHeading,
    /// The inline content.
    #[serde(default)]
    pub children: Vec<Node>,
}

/// The paragraph styles a host document distinguishes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphHeading {
    /// A body paragraph.
    #[default]
    Normal,
    /// The document title style.
    Title,
    /// The document subtitle style.
    Subtitle,
    /// The top-level heading.
    Heading1,
    /// A second-level heading.
    Heading2,
    /// A third-level heading.
    Heading3,
    /// A fourth-level heading.
    Heading4,
    /// A fifth-level heading.
    Heading5,
    /// The deepest heading.
    Heading6,
}

impl ParagraphHeading {
    /// Maps a numeric heading level to a style, `0` and unknown levels being
    /// body paragraphs.
    pub fn from_level(level: u8) -> Self {
        match level {
            1 => Self::Heading1,
            2 => Self::Heading2,
            3 => Self::Heading3,
            4 => Self::Heading4,
            5 => Self::Heading5,
            6 => Self::Heading6,
            _ => Self::Normal,
        }
    }
}

/// A list item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// Shared by all items of one logical list.
    pub list_id: EcoString,
    /// The depth of the item inside its list, starting at zero.
    #[serde(default)]
    pub nesting_level: u32,
    /// The marker style of the item.
    #[serde(default)]
    pub glyph_type: GlyphType,
    /// The inline content.
    #[serde(default)]
    pub children: Vec<Node>,
}

impl ListItem {
    /// Creates a list item.
    pub fn new(
        list_id: impl Into<EcoString>,
        nesting_level: u32,
        glyph_type: GlyphType,
        children: Vec<Node>,
    ) -> Self {
        Self {
            list_id: list_id.into(),
            nesting_level,
            glyph_type,
            children,
        }
    }
}

/// The marker style of a list item.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlyphType {
    /// A filled bullet.
    #[default]
    Bullet,
    /// A hollow bullet.
    HollowBullet,
    /// A square bullet.
    SquareBullet,
    /// Arabic numbers.
    Number,
    /// Upper-case letters.
    LatinUpper,
    /// Lower-case letters.
    LatinLower,
    /// Upper-case roman numerals.
    RomanUpper,
    /// Lower-case roman numerals.
    RomanLower,
}

impl GlyphType {
    /// Whether items with this glyph belong in an unordered list.
    pub fn is_bullet(self) -> bool {
        matches!(
            self,
            GlyphType::Bullet | GlyphType::HollowBullet | GlyphType::SquareBullet
        )
    }
}

/// An inline image and its payload.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineImage {
    /// The MIME type of the payload.
    pub content_type: EcoString,
    /// The alternative text, if any.
    #[serde(default)]
    pub alt_title: Option<EcoString>,
    /// The raw bytes, base64 encoded in JSON.
    #[serde_as(as = "Base64")]
    pub data: Vec<u8>,
}

/// A run of text whose formatting changes at given character offsets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextRun {
    /// The full text.
    pub text: EcoString,
    /// The formatting spans, sorted by their start offset.
    #[serde(default)]
    pub attributes: Vec<AttributeRun>,
}

/// The start of a span sharing one attribute set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttributeRun {
    /// The character offset at which the span starts.
    pub offset: usize,
    /// The attributes active over the span.
    #[serde(flatten)]
    pub attrs: TextAttributes,
}

/// The formatting attributes of a text span.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextAttributes {
    /// Bold text.
    #[serde(default)]
    pub bold: bool,
    /// Italic text.
    #[serde(default)]
    pub italic: bool,
    /// Underlined text.
    #[serde(default)]
    pub underline: bool,
    /// The link target, if the span is a link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<EcoString>,
}

impl TextAttributes {
    /// Bold and nothing else.
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    /// Italic and nothing else.
    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Self::default()
        }
    }

    /// A plain link to `url`.
    pub fn link(url: impl Into<EcoString>) -> Self {
        Self {
            link_url: Some(url.into()),
            ..Self::default()
        }
    }
}

/// One formatting span of a [`TextRun`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSpan<'a> {
    /// The character offset at which the span starts.
    pub start: usize,
    /// The text covered by the span.
    pub text: &'a str,
    /// The attributes active over the span.
    pub attrs: &'a TextAttributes,
}

impl TextRun {
    /// Creates a run without any attribute offsets.
    pub fn plain(text: impl Into<EcoString>) -> Self {
        Self {
            text: text.into(),
            attributes: Vec::new(),
        }
    }

    /// Appends a span starting at `offset`.
    pub fn with_span(mut self, offset: usize, attrs: TextAttributes) -> Self {
        self.attributes.push(AttributeRun { offset, attrs });
        self
    }

    /// The start offsets of the formatting spans.
    pub fn attribute_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.attributes.iter().map(|run| run.offset)
    }

    /// The attributes active at the given character offset.
    pub fn attributes_at(&self, offset: usize) -> Option<&TextAttributes> {
        let idx = self.attributes.partition_point(|run| run.offset <= offset);
        idx.checked_sub(1).map(|idx| &self.attributes[idx].attrs)
    }

    /// Splits the text into its formatting spans.
    ///
    /// Span `i` covers `[offsets[i], offsets[i + 1])`, the last one running to
    /// the end of the text. Offsets must start at zero and increase strictly.
    pub fn spans(&self) -> Result<Vec<TextSpan<'_>>> {
        let bounds = self
            .text
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(std::iter::once(self.text.len()))
            .collect::<Vec<_>>();
        let char_len = bounds.len() - 1;

        let mut prev = None;
        for run in &self.attributes {
            match prev {
                None if run.offset != 0 => {
                    return Err(Error::malformed_attribute_runs(
                        run.offset,
                        "the first span must start at offset 0",
                    ));
                }
                Some(prev) if run.offset <= prev => {
                    return Err(Error::malformed_attribute_runs(
                        run.offset,
                        "offsets must be strictly increasing",
                    ));
                }
                _ => {}
            }
            if run.offset > char_len {
                return Err(Error::malformed_attribute_runs(
                    run.offset,
                    "offset is past the end of the text",
                ));
            }
            prev = Some(run.offset);
        }

        let spans = self
            .attributes
            .iter()
            .enumerate()
            .map(|(idx, run)| {
                let end = self
                    .attributes
                    .get(idx + 1)
                    .map_or(char_len, |next| next.offset);
                TextSpan {
                    start: run.offset,
                    text: &self.text[bounds[run.offset]..bounds[end]],
                    attrs: &run.attrs,
                }
            })
            .collect();

        Ok(spans)
    }

    /// The text of span `idx`, if there is such a span.
    pub fn span_text(&self, idx: usize) -> Result<Option<&str>> {
        Ok(self.spans()?.get(idx).map(|span| span.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn spans_cover_the_text() {
        let run = TextRun::plain("Hello world")
            .with_span(0, TextAttributes::bold())
            .with_span(6, TextAttributes::default());
        let spans = run.spans().unwrap();

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "Hello ");
        assert!(spans[0].attrs.bold);
        assert_eq!(spans[1].text, "world");
        assert!(!spans[1].attrs.bold);

        assert_eq!(run.span_text(1).unwrap(), Some("world"));
        assert_eq!(run.span_text(2).unwrap(), None);
    }

    #[test]
    fn spans_count_characters() {
        let run = TextRun::plain("naïve café")
            .with_span(0, TextAttributes::default())
            .with_span(6, TextAttributes::italic());
        let spans = run.spans().unwrap();

        assert_eq!(spans[0].text, "naïve ");
        assert_eq!(spans[1].text, "café");
    }

    #[test]
    fn attributes_at_offset() {
        let run = TextRun::plain("Hello world")
            .with_span(0, TextAttributes::bold())
            .with_span(6, TextAttributes::italic());

        assert_eq!(run.attributes_at(3), Some(&TextAttributes::bold()));
        assert_eq!(run.attributes_at(6), Some(&TextAttributes::italic()));
        assert_eq!(run.attributes_at(10), Some(&TextAttributes::italic()));
        assert_eq!(TextRun::plain("x").attributes_at(0), None);
        assert_eq!(run.attribute_indices().collect::<Vec<_>>(), vec![0, 6]);
    }

    #[test]
    fn malformed_offsets() {
        let not_zero = TextRun::plain("abc").with_span(1, TextAttributes::default());
        let decreasing = TextRun::plain("abc")
            .with_span(0, TextAttributes::default())
            .with_span(2, TextAttributes::bold())
            .with_span(2, TextAttributes::italic());
        let past_end = TextRun::plain("abc")
            .with_span(0, TextAttributes::default())
            .with_span(4, TextAttributes::bold());

        for run in [not_zero, decreasing, past_end] {
            let err = run.spans().unwrap_err();
            assert!(
                matches!(err.kind(), ErrorKind::MalformedAttributeRuns { .. }),
                "{err}"
            );
        }
    }

    #[test]
    fn heading_levels() {
        assert_eq!(ParagraphHeading::from_level(0), ParagraphHeading::Normal);
        assert_eq!(ParagraphHeading::from_level(1), ParagraphHeading::Heading1);
        assert_eq!(ParagraphHeading::from_level(6), ParagraphHeading::Heading6);
        assert_eq!(ParagraphHeading::from_level(7), ParagraphHeading::Normal);
    }

    #[test]
    fn glyph_kinds() {
        assert!(GlyphType::Bullet.is_bullet());
        assert!(GlyphType::HollowBullet.is_bullet());
        assert!(GlyphType::SquareBullet.is_bullet());
        assert!(!GlyphType::Number.is_bullet());
        assert!(!GlyphType::RomanLower.is_bullet());
    }

    #[test]
    fn parse_json() {
        let doc = Document::from_json(
            r#"{
                "name": "My Report",
                "body": [
                    { "type": "paragraph", "heading": "heading2", "children": [
                        { "type": "text", "text": "Intro", "attributes": [
                            { "offset": 0, "bold": true, "link_url": "https://a.example" }
                        ] }
                    ] },
                    { "type": "list_item", "list_id": "kix.1", "glyph_type": "number",
                      "children": [ { "type": "text", "text": "one" } ] },
                    { "type": "image", "content_type": "image/png", "data": "iVBORw==" },
                    { "type": "unsupported", "kind": "page_break" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.name, "My Report");
        assert_eq!(doc.body.len(), 4);

        let Node::Paragraph(para) = &doc.body[0] else {
            panic!("expected a paragraph, got {:?}", doc.body[0]);
        };
        assert_eq!(para.heading, ParagraphHeading::Heading2);
        let Node::Text(run) = &para.children[0] else {
            panic!("expected a text run");
        };
        assert_eq!(
            run.attributes[0].attrs,
            TextAttributes {
                bold: true,
                link_url: Some("https://a.example".into()),
                ..TextAttributes::default()
            }
        );

        let Node::ListItem(item) = &doc.body[1] else {
            panic!("expected a list item");
        };
        assert_eq!(item.nesting_level, 0);
        assert_eq!(item.glyph_type, GlyphType::Number);

        let Node::Image(image) = &doc.body[2] else {
            panic!("expected an image");
        };
        assert_eq!(image.data, vec![0x89, b'P', b'N', b'G']);
        assert_eq!(image.alt_title, None);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Document::from_json(r#"{ "name": 1 }"#).is_err());
    }
}
