//! Writers turning document nodes into HTML.

pub mod html;
pub mod image;
pub mod list;
pub mod text;

pub use html::{HtmlRenderer, Position};
pub use image::{ImageExtractor, ImageFormat, ImageRecord};
pub use list::{ListCounters, ListItemMarkup, ListKey, ListState};
pub use text::render_text;
