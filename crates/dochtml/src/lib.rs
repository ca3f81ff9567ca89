//! # Dochtml
//!
//! Converts a rich-text document tree (paragraphs, headings, list items,
//! formatted text runs and inline images) into clean HTML, extracting the
//! images so they can be published next to it.
//!
//! ```
//! use dochtml::model::{Document, Node, ParagraphHeading};
//!
//! let doc = Document::new(
//!     "Notes",
//!     vec![Node::heading(ParagraphHeading::Heading1, vec![Node::text("Hi & bye")])],
//! );
//! let conv = dochtml::convert(&doc).unwrap();
//! assert_eq!(conv.html, "<h1>Hi &amp; bye</h1>");
//! ```

pub mod config;
pub mod delivery;
mod error;
pub mod filename;
pub mod model;
pub mod sanitize;
pub mod writer;

pub use error::*;

use crate::config::{ConvertFeat, DeliveryConfig};
use crate::delivery::{Message, Transport};
use crate::model::Document;
use crate::sanitize::clean_output;
use crate::writer::{HtmlRenderer, ImageRecord};

/// The result type for dochtml.
pub type Result<T, Err = Error> = std::result::Result<T, Err>;

/// The outcome of converting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// The HTML of the document body.
    pub html: String,
    /// The extracted images, in the order they appear.
    pub images: Vec<ImageRecord>,
}

impl Conversion {
    /// Builds the message delivering this conversion.
    pub fn into_message(self, document_name: &str, config: &DeliveryConfig) -> Message {
        Message::compose(document_name, self, config)
    }
}

/// Task builder for converting documents to HTML.
#[derive(Debug, Default, Clone)]
pub struct Converter {
    /// Features for the conversion.
    feat: ConvertFeat,
}

impl Converter {
    /// Creates a converter with default features.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets conversion features.
    pub fn with_feature(mut self, feat: ConvertFeat) -> Self {
        self.feat = feat;
        self
    }

    /// The conversion features in use.
    pub fn feat(&self) -> &ConvertFeat {
        &self.feat
    }

    /// Converts a document.
    ///
    /// Every call starts from fresh list counters and an empty image list. On
    /// error nothing is returned, not even the images extracted so far.
    pub fn convert(&self, doc: &Document) -> Result<Conversion> {
        let mut renderer = HtmlRenderer::new(&doc.name, &self.feat);
        let html = renderer.render_body(&doc.body)?;
        let images = renderer.into_images();

        let html = if self.feat.sanitize {
            clean_output(&html)
        } else {
            html
        };

        log::info!(
            "converted {:?}: {} top-level element(s), {} image(s), {} bytes of html",
            doc.name,
            doc.body.len(),
            images.len(),
            html.len()
        );

        Ok(Conversion { html, images })
    }

    /// Converts a document and sends the result through `transport`.
    pub fn deliver(
        &self,
        doc: &Document,
        config: &DeliveryConfig,
        transport: &dyn Transport,
    ) -> Result<Message> {
        let message = self.convert(doc)?.into_message(&doc.name, config);
        transport.send(&message)?;
        Ok(message)
    }
}

/// Converts a document with the default features.
pub fn convert(doc: &Document) -> Result<Conversion> {
    Converter::new().convert(doc)
}
