//! Input state for message composition.
//!
//! Keeps the decision of "does this key press send?" out of the egui code so
//! it can be tested without a window.

/// A user action on the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerInput {
    /// Enter in the text field; `shift` inserts a newline instead of sending.
    Enter { shift: bool },
    /// Click on the send control.
    SendClicked,
}

#[derive(Default, Debug, Clone)]
pub struct InputState {
    /// Current message being composed
    pub message_input: String,

    /// A submit is in flight (the send control shows it)
    pub sending: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide what `input` does. Returns the text to submit, untrimmed, or
    /// `None` when nothing should be sent (shift+Enter, blank input, a
    /// submit already in flight).
    pub fn handle(&mut self, input: ComposerInput) -> Option<String> {
        match input {
            ComposerInput::Enter { shift: true } => None,
            ComposerInput::Enter { shift: false } | ComposerInput::SendClicked => {
                if self.sending || self.message_input.trim().is_empty() {
                    return None;
                }
                self.sending = true;
                Some(self.message_input.clone())
            }
        }
    }

    /// The server accepted the message.
    pub fn on_submitted(&mut self) {
        self.message_input.clear();
        self.sending = false;
    }

    /// The submit failed; keep the text so the user can retry.
    pub fn on_submit_failed(&mut self) {
        self.sending = false;
    }
}
