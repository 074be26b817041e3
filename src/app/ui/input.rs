//! Message composer: text field plus send control

use eframe::egui;

use crate::app::ChatFeedApp;
use crate::input_state::ComposerInput;

impl ChatFeedApp {
    /// Render the input panel at the bottom of the window
    pub(in crate::app) fn render_input_panel(&mut self, ctx: &egui::Context) {
        let input_id = egui::Id::new("feed_message_input");
        let mut action = None;

        egui::TopBottomPanel::bottom("input_panel")
            .frame(
                egui::Frame::new()
                    .fill(self.theme.surface[1])
                    .inner_margin(egui::Margin::symmetric(12, 10))
                    .stroke(egui::Stroke::new(1.0, self.theme.border_medium)),
            )
            .show(ctx, |ui| {
                // Take Enter (without Shift) before the text edit sees it, so it
                // sends instead of inserting a newline.
                let had_focus = ui.memory(|m| m.has_focus(input_id));
                let shift = ui.input(|i| i.modifiers.shift);
                if had_focus && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    if !shift {
                        ui.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Enter));
                    }
                    action = Some(ComposerInput::Enter { shift });
                }

                ui.horizontal(|ui| {
                    let send_width = 80.0;
                    let response = ui.add(
                        egui::TextEdit::multiline(&mut self.input.message_input)
                            .id(input_id)
                            .desired_rows(1)
                            .desired_width(ui.available_width() - send_width)
                            .hint_text("Digite sua mensagem... (Enter para enviar)"),
                    );

                    let send = ui.add_enabled(!self.input.sending, egui::Button::new("Enviar"));
                    if send.clicked() {
                        action = Some(ComposerInput::SendClicked);
                        response.request_focus();
                    }
                });
            });

        if let Some(action) = action {
            if let Some(text) = self.input.handle(action) {
                self.submit(text);
            }
        }
    }
}
