//! Image extraction for HTML output.

use ecow::{EcoString, eco_format};

use crate::filename::sanitize_filename;
use crate::model::InlineImage;
use crate::{Error, Result};

/// The image formats that can be published next to the HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// `image/png`
    Png,
    /// `image/gif`
    Gif,
    /// `image/jpeg` or `image/jpg`
    Jpeg,
}

impl ImageFormat {
    /// Detects the format from a MIME type, ignoring case and parameters.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type.split(';').next()?.trim();
        let (kind, subtype) = essence.split_once('/')?;
        if !kind.eq_ignore_ascii_case("image") {
            return None;
        }

        match subtype.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "jpeg" | "jpg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// The file extension, including the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => ".png",
            Self::Gif => ".gif",
            Self::Jpeg => ".jpg",
        }
    }
}

/// An image extracted from the document, to be delivered with the HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// The generated filename.
    pub file_name: EcoString,
    /// The MIME type reported by the document.
    pub mime_type: EcoString,
    /// The raw payload.
    pub data: Vec<u8>,
}

/// Turns image nodes into `<img>` tags referring to extracted files.
#[derive(Debug, Clone, Copy)]
pub struct ImageExtractor<'a> {
    document_name: &'a str,
    asset_base: &'a str,
}

impl<'a> ImageExtractor<'a> {
    /// Creates an extractor naming images after `document_name` and linking
    /// them under `asset_base`.
    pub fn new(document_name: &'a str, asset_base: &'a str) -> Self {
        Self {
            document_name,
            asset_base,
        }
    }

    /// Records `image` in `images` and returns the tag referring to it.
    ///
    /// The file is named after the alt text, or the document name when there
    /// is none, suffixed with its index in `images`.
    pub fn extract(&self, image: &InlineImage, images: &mut Vec<ImageRecord>) -> Result<String> {
        let format = ImageFormat::from_content_type(&image.content_type)
            .ok_or_else(|| Error::unsupported_asset_type(image.content_type.clone()))?;

        let alt = image.alt_title.as_deref().unwrap_or_default();
        let stem = sanitize_filename(if alt.is_empty() {
            self.document_name
        } else {
            alt
        });
        let file_name = eco_format!("{stem}-{}{}", images.len(), format.extension());

        log::debug!(
            "extracted image {file_name} ({}, {} bytes)",
            image.content_type,
            image.data.len()
        );

        let tag = format!(
            r#"<img src="{}{file_name}" alt="{alt}" />"#,
            self.asset_base
        );
        images.push(ImageRecord {
            file_name,
            mime_type: image.content_type.clone(),
            data: image.data.clone(),
        });

        Ok(tag)
    }
}
