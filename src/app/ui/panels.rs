//! Header and central feed panel rendering

use eframe::egui;

use crate::app::ChatFeedApp;
use crate::ui;

impl ChatFeedApp {
    /// Title bar with the variant name and the endpoint being polled
    pub(in crate::app) fn render_header(&mut self, ctx: &egui::Context) {
        let theme = &self.theme;

        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::new()
                    .fill(theme.surface[1])
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .stroke(egui::Stroke::new(1.0, theme.border_medium)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(self.config.variant.title());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(self.config.endpoint.as_str())
                                .size(11.0)
                                .color(theme.text_muted),
                        );
                    });
                });
                if let Some(err) = &self.backend_error {
                    ui.colored_label(theme.error, err);
                }
            });
    }

    /// The feed itself
    pub(in crate::app) fn render_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(self.theme.surface[2]))
            .show(ctx, |ui| {
                ui::render_messages(ui, &mut self.container, &self.config.endpoint, &self.theme);
            });
    }
}
