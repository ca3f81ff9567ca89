//! List container inference.
//!
//! Host documents only know list items. Whether an item opens, continues or
//! closes a list is derived from how many items of the same list and level
//! were emitted before it and from whether it is the last item in a row.

use ecow::{EcoString, eco_format};
use rustc_hash::FxHashMap;

use crate::model::{GlyphType, ListItem};

/// The kind of list container an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    /// An `<ol>` list.
    Ordered,
    /// A `<ul>` list.
    Unordered,
}

impl ListState {
    /// Picks the container kind for a glyph.
    pub fn of(glyph: GlyphType) -> Self {
        if glyph.is_bullet() {
            ListState::Unordered
        } else {
            ListState::Ordered
        }
    }

    fn open_tag(self) -> &'static str {
        match self {
            ListState::Ordered => r#"<ol class="list">"#,
            ListState::Unordered => r#"<ul class="list">"#,
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            ListState::Ordered => "</ol>",
            ListState::Unordered => "</ul>",
        }
    }
}

/// Identifies one logical list at one nesting level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListKey {
    /// The host's list identifier.
    pub list_id: EcoString,
    /// The nesting level inside the list.
    pub nesting_level: u32,
}

/// The markup surrounding the content of one list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItemMarkup {
    /// Emitted before the item content.
    pub prefix: EcoString,
    /// Emitted after the item content.
    pub suffix: EcoString,
}

impl ListItemMarkup {
    /// Computes the markup of an item from the number of items already
    /// emitted for its list and level.
    pub fn new(emitted: usize, glyph: GlyphType, is_last: bool) -> Self {
        let state = ListState::of(glyph);

        let prefix = if emitted == 0 {
            eco_format!("{}\n\t<li>", state.open_tag())
        } else {
            EcoString::inline("\t<li>")
        };

        let suffix = if is_last {
            eco_format!("</li>\n{}", state.close_tag())
        } else {
            EcoString::inline("</li>")
        };

        Self { prefix, suffix }
    }
}

/// Counts the items emitted per list and nesting level during one conversion.
#[derive(Debug, Default, Clone)]
pub struct ListCounters {
    counters: FxHashMap<ListKey, usize>,
}

impl ListCounters {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of items emitted so far for a list at a level.
    pub fn count(&self, list_id: &str, nesting_level: u32) -> usize {
        let key = ListKey {
            list_id: list_id.into(),
            nesting_level,
        };
        self.counters.get(&key).copied().unwrap_or(0)
    }

    /// Decides the markup of `item` and records it as emitted.
    pub fn visit(&mut self, item: &ListItem, is_last: bool) -> ListItemMarkup {
        let key = ListKey {
            list_id: item.list_id.clone(),
            nesting_level: item.nesting_level,
        };
        let counter = self.counters.entry(key).or_default();
        let markup = ListItemMarkup::new(*counter, item.glyph_type, is_last);

        log::trace!(
            "list item {}.{}: emitted={}, last={is_last}",
            item.list_id,
            item.nesting_level,
            *counter
        );

        *counter += 1;
        markup
    }
}
