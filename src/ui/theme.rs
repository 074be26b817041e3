//! Colors for the feed window.
//!
//! Bubble colors follow the web pages the feed replaces: blue for the
//! viewer's own messages, grey for everyone else, green for deliveries and
//! yellow (with dark text) for corrections.

use eframe::egui::{self, Color32};

use crate::render::BubbleStyle;

#[derive(Clone, Debug)]
pub struct FeedTheme {
    /// 0: window background, 1: input panel, 2: feed background
    pub surface: [Color32; 3],
    pub accent: Color32,
    pub error: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub border_medium: Color32,
    pub avatar_placeholder: Color32,
    pub badge: Color32,
}

impl FeedTheme {
    pub fn dark() -> Self {
        Self {
            surface: [
                Color32::from_rgb(10, 10, 15),
                Color32::from_rgb(19, 19, 26),
                Color32::from_rgb(28, 28, 38),
            ],
            accent: Color32::from_rgb(13, 110, 253),
            error: Color32::from_rgb(240, 71, 71),
            text_primary: Color32::WHITE,
            text_muted: Color32::from_rgb(114, 118, 125),
            border_medium: Color32::from_rgb(47, 49, 54),
            avatar_placeholder: Color32::from_rgb(255, 193, 7),
            badge: Color32::from_rgb(33, 37, 41),
        }
    }

    /// (fill, text) for a message bubble.
    pub fn bubble(&self, style: BubbleStyle) -> (Color32, Color32) {
        match style {
            BubbleStyle::Own => (self.accent, Color32::WHITE),
            BubbleStyle::Other => (Color32::from_rgb(108, 117, 125), Color32::WHITE),
            BubbleStyle::Delivery => (Color32::from_rgb(25, 135, 84), Color32::WHITE),
            BubbleStyle::Correction => (Color32::from_rgb(255, 193, 7), Color32::from_rgb(33, 37, 41)),
        }
    }
}

/// Apply the base egui style for the feed window.
pub fn apply_app_style(ctx: &egui::Context) {
    let theme = FeedTheme::dark();
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = theme.surface[0];
    visuals.window_fill = theme.surface[1];
    visuals.extreme_bg_color = theme.surface[2];
    visuals.selection.bg_fill = theme.accent;
    ctx.set_visuals(visuals);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_colors_are_distinct_from_authorship_colors() {
        let theme = FeedTheme::dark();
        let own = theme.bubble(BubbleStyle::Own).0;
        let other = theme.bubble(BubbleStyle::Other).0;
        for style in [BubbleStyle::Delivery, BubbleStyle::Correction] {
            let fill = theme.bubble(style).0;
            assert_ne!(fill, own);
            assert_ne!(fill, other);
        }
    }
}
