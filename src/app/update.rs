//! Main update loop

use eframe::egui;
use std::time::Duration;

use super::ChatFeedApp;

impl eframe::App for ChatFeedApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Process network events
        self.process_events();

        // Request repaint to keep checking for events
        ctx.request_repaint_after(Duration::from_millis(100));

        self.render_header(ctx);
        if self.config.variant.accepts_input() {
            self.render_input_panel(ctx);
        }
        self.render_central_panel(ctx);
    }
}
