use crate::model::binding::OTP_LENGTH;
use crate::ui::theme::Typography;
use egui::{Response, TextEdit, Ui};

/// Centered, monospaced field for a verification code.
///
/// Input longer than [OTP_LENGTH] characters is cut off; anything that is not
/// a digit is removed after every edit.
pub struct OtpInput<'a> {
    code: &'a mut String,
    enabled: bool,
}

impl<'a> OtpInput<'a> {
    pub fn new(code: &'a mut String) -> Self {
        Self {
            code,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn show(self, ui: &mut Ui) -> Response {
        let code = self.code;
        let text_edit = TextEdit::singleline(&mut *code)
            .char_limit(OTP_LENGTH)
            .font(Typography::monospace_large())
            .horizontal_align(egui::Align::Center)
            .hint_text("000000")
            .desired_width(ui.available_width());
        let response = ui.add_enabled(self.enabled, text_edit);

        if response.changed() {
            code.retain(|c| c.is_ascii_digit());
        }
        response
    }
}
