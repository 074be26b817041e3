//! Paints the feed container.

use eframe::egui::{self, Color32, RichText};
use url::Url;

use crate::buffer::FeedContainer;
use crate::render::{Alignment, Avatar, Body, FeedItem, MessageView, ATTACHMENT_LABEL};
use crate::ui::theme::FeedTheme;

const AVATAR_SIZE: f32 = 32.0;

/// Render the central message panel. Scrolls to the bottom after each render.
pub fn render_messages(ui: &mut egui::Ui, container: &mut FeedContainer, base: &Url, theme: &FeedTheme) {
    let scroll_to_bottom = container.take_scroll_request();

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            ui.add_space(8.0);

            for item in container.items() {
                match item {
                    FeedItem::Placeholder(text) => render_placeholder(ui, text, theme),
                    FeedItem::Message(view) => render_message(ui, view, base, theme),
                }
                ui.add_space(6.0);
            }

            if scroll_to_bottom {
                ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
            }
        });
}

fn render_placeholder(ui: &mut egui::Ui, text: &str, theme: &FeedTheme) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(RichText::new("💬").size(24.0).color(theme.text_muted));
        ui.label(RichText::new(text).color(theme.text_muted));
        ui.add_space(40.0);
    });
}

fn render_message(ui: &mut egui::Ui, view: &MessageView, base: &Url, theme: &FeedTheme) {
    let layout = match view.alignment {
        Alignment::Start => egui::Layout::left_to_right(egui::Align::TOP),
        Alignment::End => egui::Layout::right_to_left(egui::Align::TOP),
    };
    let (fill, text_color) = theme.bubble(view.style);

    ui.with_layout(layout, |ui| {
        ui.add_space(12.0);
        if let Some(avatar) = &view.avatar {
            render_avatar(ui, avatar, theme);
        }

        let max_width = ui.available_width() * 0.8;
        egui::Frame::new()
            .fill(fill)
            .corner_radius(18.0)
            .inner_margin(egui::Margin::symmetric(14, 10))
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&view.header).strong().size(12.0).color(text_color));
                        if let Some(badge) = view.badge {
                            ui.label(
                                RichText::new(badge)
                                    .size(10.0)
                                    .color(Color32::WHITE)
                                    .background_color(theme.badge),
                            );
                        }
                        if let Some(time) = &view.time {
                            ui.label(RichText::new(time).size(11.0).color(text_color.gamma_multiply(0.75)));
                        }
                    });

                    match &view.body {
                        Some(Body::Text(text)) => {
                            ui.label(RichText::new(text).color(text_color));
                        }
                        Some(Body::Lines(lines)) => {
                            for line in lines {
                                ui.label(RichText::new(line).size(13.0).color(text_color));
                            }
                        }
                        None => {}
                    }

                    if let Some(attachment) = &view.attachment {
                        let target = base
                            .join(attachment)
                            .map(String::from)
                            .unwrap_or_else(|_| attachment.clone());
                        ui.hyperlink_to(format!("⬇ {ATTACHMENT_LABEL}"), target);
                    }
                });
            });
    });
}

/// Draw the avatar circle.
///
/// A photo avatar is drawn as the author's initial on the accent color, with
/// the photo URL as hover text. The image itself is not downloaded: no egui
/// image loader is installed and the feed never fetches anything but the
/// endpoint.
fn render_avatar(ui: &mut egui::Ui, avatar: &Avatar, theme: &FeedTheme) {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(AVATAR_SIZE, AVATAR_SIZE), egui::Sense::hover());
    let painter = ui.painter();

    match avatar {
        Avatar::Photo { url, alt } => {
            painter.circle_filled(rect.center(), AVATAR_SIZE / 2.0, theme.accent);
            let initial = alt.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default();
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                initial,
                egui::FontId::proportional(14.0),
                Color32::WHITE,
            );
            response.on_hover_text(url);
        }
        Avatar::Placeholder => {
            painter.circle_filled(rect.center(), AVATAR_SIZE / 2.0, theme.avatar_placeholder);
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "👤",
                egui::FontId::proportional(13.0),
                theme.badge,
            );
        }
    }
    ui.add_space(8.0);
}
