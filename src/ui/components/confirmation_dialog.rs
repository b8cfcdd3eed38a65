use crate::ui::components::styled::{StyledButton, error_label};
use crate::ui::theme::{Spacing, Typography};
use egui::{InnerResponse, RichText, Ui, Widget};

/// Response from showing a confirmation dialog
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmationDialogResponse {
    /// Dialog is still open, no action taken
    None,
    /// User clicked confirm button
    Confirmed,
    /// User clicked cancel button or closed dialog
    Canceled,
}

/// A reusable confirmation dialog component that implements the Widget trait
///
/// The dialog is an `egui::Window` anchored at the center of the screen. While
/// `busy` is set both buttons are disabled and a spinner replaces the message
/// footer; closing the window is not possible either.
///
/// # Examples
///
/// ```rust
/// # use zone_wallet_tool::ui::components::confirmation_dialog::{ConfirmationDialog, ConfirmationDialogResponse};
/// # use egui::Ui;
/// # fn example(ui: &mut Ui) {
/// let response = ConfirmationDialog::new("確認出金", "確認提取 20 USDT 至你的 ZoneWallet 嗎？")
///     .detail("預計收到：626 TWD")
///     .confirm_text("確認")
///     .cancel_text("取消")
///     .show(ui);
///
/// match response.inner {
///     ConfirmationDialogResponse::Confirmed => println!("User confirmed"),
///     ConfirmationDialogResponse::Canceled => println!("User canceled"),
///     ConfirmationDialogResponse::None => {}
/// };
/// # }
/// ```
pub struct ConfirmationDialog {
    title: String,
    message: String,
    detail: Option<String>,
    error: Option<String>,
    confirm_text: String,
    cancel_text: String,
    busy: bool,
    is_open: bool,
}

impl ConfirmationDialog {
    /// Create a new confirmation dialog with the given title and message
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            detail: None,
            error: None,
            confirm_text: "確認".to_string(),
            cancel_text: "取消".to_string(),
            busy: false,
            is_open: true,
        }
    }

    /// Emphasized line shown under the message
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Error from a previous attempt, shown above the buttons
    pub fn error(mut self, error: Option<impl Into<String>>) -> Self {
        self.error = error.map(Into::into);
        self
    }

    /// Set the text for the confirm button
    pub fn confirm_text(mut self, text: impl Into<String>) -> Self {
        self.confirm_text = text.into();
        self
    }

    /// Set the text for the cancel button
    pub fn cancel_text(mut self, text: impl Into<String>) -> Self {
        self.cancel_text = text.into();
        self
    }

    /// Disable all interaction while the confirmed action runs
    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }

    /// Set whether the dialog is open
    pub fn open(mut self, open: bool) -> Self {
        self.is_open = open;
        self
    }
}

impl ConfirmationDialog {
    /// Show the dialog and return the user's response
    pub fn show(self, ui: &mut Ui) -> InnerResponse<ConfirmationDialogResponse> {
        let mut is_open = self.is_open;

        if !is_open {
            return InnerResponse::new(
                ConfirmationDialogResponse::Canceled,
                ui.allocate_response(egui::Vec2::ZERO, egui::Sense::hover()),
            );
        }

        let mut final_response = ConfirmationDialogResponse::None;
        let mut window = egui::Window::new(&self.title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO);
        if !self.busy {
            window = window.open(&mut is_open);
        }

        let window_response = window.show(ui.ctx(), |ui| {
            ui.set_min_width(300.0);

            ui.add_space(Spacing::SM);
            ui.label(&self.message);
            if let Some(detail) = &self.detail {
                ui.add_space(Spacing::XS);
                ui.label(RichText::new(detail).font(Typography::body()).strong());
            }
            if let Some(error) = &self.error {
                ui.add_space(Spacing::SM);
                error_label(ui, error);
            }
            ui.add_space(Spacing::MD);

            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if StyledButton::primary(&self.confirm_text)
                        .enabled(!self.busy)
                        .show(ui)
                        .clicked()
                    {
                        final_response = ConfirmationDialogResponse::Confirmed;
                    }

                    ui.add_space(Spacing::SM);

                    if StyledButton::secondary(&self.cancel_text)
                        .enabled(!self.busy)
                        .show(ui)
                        .clicked()
                    {
                        final_response = ConfirmationDialogResponse::Canceled;
                    }

                    if self.busy {
                        ui.add(egui::Spinner::new());
                    }
                });
            });

            ui.add_space(Spacing::SM);
        });

        // Handle window being closed via X button - treat as cancel
        if !is_open && matches!(final_response, ConfirmationDialogResponse::None) {
            final_response = ConfirmationDialogResponse::Canceled;
        }

        if let Some(window_response) = window_response {
            InnerResponse::new(final_response, window_response.response)
        } else {
            InnerResponse::new(
                final_response,
                ui.allocate_response(egui::Vec2::ZERO, egui::Sense::hover()),
            )
        }
    }
}

impl Widget for ConfirmationDialog {
    fn ui(self, ui: &mut Ui) -> egui::Response {
        let inner_response = self.show(ui);
        inner_response.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_dialog_creation() {
        let dialog = ConfirmationDialog::new("確認出金", "確認提取 20 USDT 至你的 ZoneWallet 嗎？")
            .detail("預計收到：626 TWD")
            .error(Some("餘額不足，請重新確認金額"))
            .busy(true);

        assert_eq!(dialog.title, "確認出金");
        assert_eq!(dialog.detail.as_deref(), Some("預計收到：626 TWD"));
        assert_eq!(dialog.error.as_deref(), Some("餘額不足，請重新確認金額"));
        assert_eq!(dialog.confirm_text, "確認");
        assert_eq!(dialog.cancel_text, "取消");
        assert!(dialog.busy);
        assert!(dialog.is_open);
    }

    #[test]
    fn test_no_error_by_default() {
        let dialog = ConfirmationDialog::new("t", "m").error(None::<String>);
        assert!(dialog.error.is_none());
        assert!(!dialog.busy);
    }
}
