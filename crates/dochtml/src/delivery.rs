//! Handing converted documents over to a recipient.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ecow::{EcoString, eco_format};
use serde::Serialize;

use crate::config::DeliveryConfig;
use crate::filename::sanitize_filename;
use crate::{Conversion, Result};

/// The name of the manifest written by [`DirectoryTransport`].
pub const MANIFEST_NAME: &str = "message.json";

/// A file attached to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// The filename shown to the recipient.
    pub file_name: EcoString,
    /// The MIME type of the content.
    pub mime_type: EcoString,
    /// The content.
    pub content: Vec<u8>,
}

/// A message carrying a converted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Who receives the message.
    pub to: Option<EcoString>,
    /// The subject line.
    pub subject: EcoString,
    /// The plain-text body.
    pub body: EcoString,
    /// The images followed by the HTML document.
    pub attachments: Vec<Attachment>,
}

impl Message {
    /// Builds the message for a converted document.
    ///
    /// Every extracted image becomes an attachment, in the order the images
    /// appear in the document, followed by the HTML itself, named after the
    /// document. The subject is the name of the HTML attachment.
    pub fn compose(document_name: &str, conversion: Conversion, config: &DeliveryConfig) -> Self {
        let html_name = eco_format!("{}.html", sanitize_filename(document_name));

        let mut attachments = conversion
            .images
            .into_iter()
            .map(|image| Attachment {
                file_name: image.file_name,
                mime_type: image.mime_type,
                content: image.data,
            })
            .collect::<Vec<_>>();
        attachments.push(Attachment {
            file_name: html_name.clone(),
            mime_type: "text/html".into(),
            content: conversion.html.into_bytes(),
        });

        Self {
            to: config.recipient.clone(),
            subject: html_name,
            body: config.body.clone(),
            attachments,
        }
    }

    /// The HTML attachment.
    pub fn html(&self) -> Option<&Attachment> {
        self.attachments
            .iter()
            .rev()
            .find(|attachment| attachment.mime_type == "text/html")
    }
}

/// Something that can deliver messages.
pub trait Transport {
    /// Delivers the message.
    fn send(&self, message: &Message) -> Result<()>;
}

/// Writes the attachments of a message into a directory, along with a
/// [`MANIFEST_NAME`] file describing the message.
#[derive(Debug, Clone)]
pub struct DirectoryTransport {
    dir: PathBuf,
}

#[derive(Serialize)]
struct Manifest<'a> {
    to: Option<&'a str>,
    subject: &'a str,
    body: &'a str,
    attachments: Vec<ManifestEntry<'a>>,
}

#[derive(Serialize)]
struct ManifestEntry<'a> {
    file_name: &'a str,
    mime_type: &'a str,
    size: usize,
}

impl DirectoryTransport {
    /// Creates a transport writing into `dir`, created on demand.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Transport for DirectoryTransport {
    fn send(&self, message: &Message) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|err| {
            format!("failed to create directory {}: {err}", self.dir.display())
        })?;

        for attachment in &message.attachments {
            let path = self.dir.join(attachment.file_name.as_str());
            std::fs::write(&path, &attachment.content)
                .map_err(|err| format!("failed to write {}: {err}", path.display()))?;
        }

        let manifest = Manifest {
            to: message.to.as_deref(),
            subject: &message.subject,
            body: &message.body,
            attachments: message
                .attachments
                .iter()
                .map(|attachment| ManifestEntry {
                    file_name: &attachment.file_name,
                    mime_type: &attachment.mime_type,
                    size: attachment.content.len(),
                })
                .collect(),
        };
        let manifest = serde_json::to_vec_pretty(&manifest)
            .map_err(|err| format!("failed to encode manifest: {err}"))?;
        std::fs::write(self.dir.join(MANIFEST_NAME), manifest)?;

        log::info!(
            "delivered {} attachment(s) to {}",
            message.attachments.len(),
            self.dir.display()
        );
        Ok(())
    }
}

/// Keeps every sent message in memory.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    sent: Mutex<Vec<Message>>,
}

impl MemoryTransport {
    /// Creates an empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// The messages sent so far.
    pub fn sent(&self) -> Vec<Message> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

impl Transport for MemoryTransport {
    fn send(&self, message: &Message) -> Result<()> {
        self.sent
            .lock()
            .map_err(|_| "memory transport is poisoned")?
            .push(message.clone());
        Ok(())
    }
}
