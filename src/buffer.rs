use crate::render::FeedItem;

/// The scrollable area the feed is rendered into.
///
/// Every render replaces the whole content; items have no identity across
/// renders.
#[derive(Default, Clone, Debug)]
pub struct FeedContainer {
    items: Vec<FeedItem>,
    /// Set by every render, consumed by the UI once it has scrolled.
    scroll_to_bottom: bool,
    /// Number of renders so far
    renders: u64,
}

impl FeedContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, items: Vec<FeedItem>) {
        self.items = items;
        self.scroll_to_bottom = true;
        self.renders += 1;
    }

    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Returns true once after each render.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_bottom)
    }
}
