use core::fmt;
use std::{borrow::Cow, ops::Deref};

use ecow::EcoString;

/// An error that can occur during the conversion process.
#[derive(Clone)]
pub struct Error(Box<ErrorKind>);

/// The kinds of failures a conversion or delivery can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Just a message.
    Msg(Cow<'static, str>),
    /// An image carries a content type that has no known file extension.
    ///
    /// This aborts the whole conversion, no partial document is produced.
    UnsupportedAssetType {
        /// The offending MIME type, as reported by the document.
        content_type: EcoString,
    },
    /// A text run's attribute offsets violate the host contract.
    MalformedAttributeRuns {
        /// The offending offset.
        offset: usize,
        /// What is wrong with it.
        reason: &'static str,
    },
}

impl Error {
    /// Creates an error for an image type that cannot be extracted.
    pub fn unsupported_asset_type(content_type: impl Into<EcoString>) -> Self {
        Error(Box::new(ErrorKind::UnsupportedAssetType {
            content_type: content_type.into(),
        }))
    }

    /// Creates an error for an invalid attribute run offset.
    pub fn malformed_attribute_runs(offset: usize, reason: &'static str) -> Self {
        Error(Box::new(ErrorKind::MalformedAttributeRuns { offset, reason }))
    }

    /// Returns the kind of the error.
    pub fn kind(&self) -> &ErrorKind {
        self.0.deref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.deref() {
            ErrorKind::Msg(s) => write!(f, "{s}"),
            ErrorKind::UnsupportedAssetType { content_type } => {
                write!(f, "unsupported image type: {content_type}")
            }
            ErrorKind::MalformedAttributeRuns { offset, reason } => {
                write!(f, "malformed attribute runs at offset {offset}: {reason}")
            }
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Self as fmt::Display>::fmt(self, f)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error(Box::new(ErrorKind::Msg(e.to_string().into())))
    }
}

impl From<fmt::Error> for Error {
    fn from(e: fmt::Error) -> Self {
        Error(Box::new(ErrorKind::Msg(e.to_string().into())))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error(Box::new(ErrorKind::Msg(
            format!("invalid document: {e}").into(),
        )))
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error(Box::new(ErrorKind::Msg(format!("invalid config: {e}").into())))
    }
}

impl From<&'static str> for Error {
    fn from(s: &'static str) -> Self {
        Error(Box::new(ErrorKind::Msg(s.into())))
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error(Box::new(ErrorKind::Msg(s.into())))
    }
}

impl From<Cow<'static, str>> for Error {
    fn from(s: Cow<'static, str>) -> Self {
        Error(Box::new(ErrorKind::Msg(s)))
    }
}
