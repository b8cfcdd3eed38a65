use crate::app::{AppAction, ModalKind};
use crate::backend_task::withdrawal::WithdrawalTask;
use crate::backend_task::{BackendTask, BackendTaskSuccessResult, TaskError};
use crate::model::balances::Balances;
use crate::model::currency::{EXCHANGE_RATES, FiatTarget};
use crate::model::withdrawal::{MIN_WITHDRAWAL_USDT, WithdrawalPhase, WithdrawalRequest};
use crate::ui::components::amount_input::AmountInput;
use crate::ui::components::confirmation_dialog::{
    ConfirmationDialog, ConfirmationDialogResponse,
};
use crate::ui::components::styled::{StyledButton, error_label, status_badge};
use crate::ui::theme::{Spacing, Typography, ZoneColors};
use crate::utils::tasks::{SessionId, SessionScope};
use egui::{ComboBox, RichText, Ui};

/// Withdrawal form with its confirmation and success overlays.
#[derive(Debug)]
pub struct WithdrawalModal {
    request: WithdrawalRequest,
    scope: Option<SessionScope>,
}

impl Default for WithdrawalModal {
    fn default() -> Self {
        Self::new()
    }
}

impl WithdrawalModal {
    pub fn new() -> Self {
        Self {
            request: WithdrawalRequest::new(Balances::default()),
            scope: None,
        }
    }

    /// Opens the form with the given balances snapshot.
    pub fn open(&mut self, scope: SessionScope, balances: Balances) {
        if let Some(previous) = self.scope.replace(scope) {
            previous.cancel();
        }
        self.request.reset(balances);
        tracing::info!("withdrawal form opened");
    }

    pub fn close(&mut self) {
        if let Some(scope) = self.scope.take() {
            scope.cancel();
            tracing::info!(phase = ?self.request.phase(), "withdrawal form closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.scope.is_some()
    }

    pub fn request(&self) -> &WithdrawalRequest {
        &self.request
    }

    pub fn request_mut(&mut self) -> &mut WithdrawalRequest {
        &mut self.request
    }

    pub fn display_task_result(
        &mut self,
        session: SessionId,
        task: &WithdrawalTask,
        outcome: Result<BackendTaskSuccessResult, TaskError>,
    ) -> AppAction {
        if self.scope.as_ref().map(SessionScope::id) != Some(session) {
            tracing::debug!(?session, ?task, "dropping stale withdrawal result");
            return AppAction::None;
        }
        self.request.apply_result(outcome);
        AppAction::None
    }

    pub fn show(&mut self, ui: &mut Ui) -> AppAction {
        let Some(scope) = self.scope.clone() else {
            return AppAction::None;
        };

        match self.request.phase().clone() {
            WithdrawalPhase::Editing => self.show_form(ui),
            WithdrawalPhase::Confirming { amount, fiat, error } => {
                let response = ConfirmationDialog::new(
                    "確認出金",
                    format!("確認提取 {} 至你的 ZoneWallet 嗎？", amount),
                )
                .detail(format!("預計收到：{} TWD", fiat.to_grouped_string()))
                .error(error)
                .show(ui);

                match response.inner {
                    ConfirmationDialogResponse::Confirmed => match self.request.confirm() {
                        Some(task) => {
                            AppAction::BackendTask(scope, BackendTask::WithdrawalTask(task))
                        }
                        None => AppAction::None,
                    },
                    ConfirmationDialogResponse::Canceled => {
                        self.request.cancel_confirmation();
                        AppAction::None
                    }
                    ConfirmationDialogResponse::None => AppAction::None,
                }
            }
            WithdrawalPhase::Submitting { amount, fiat } => {
                ui.ctx().request_repaint();
                ConfirmationDialog::new(
                    "確認出金",
                    format!("確認提取 {} 至你的 ZoneWallet 嗎？", amount),
                )
                .detail(format!("預計收到：{} TWD", fiat.to_grouped_string()))
                .busy(true)
                .show(ui);
                AppAction::None
            }
            WithdrawalPhase::Success { fiat, .. } => Self::show_success(ui, &fiat.to_grouped_string()),
        }
    }

    fn show_form(&mut self, ui: &mut Ui) -> AppAction {
        let mut action = AppAction::None;
        let mut is_open = true;

        egui::Window::new("出金操作")
            .id(egui::Id::new("withdrawal_form"))
            .collapsible(false)
            .resizable(false)
            .default_width(Spacing::MODAL_WIDTH)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .open(&mut is_open)
            .show(ui.ctx(), |ui| {
                ui.set_min_width(Spacing::MODAL_WIDTH);
                let dark_mode = ui.ctx().style().visuals.dark_mode;
                let hint = |text: String| {
                    RichText::new(text)
                        .font(Typography::caption())
                        .color(ZoneColors::text_secondary(dark_mode))
                };

                ui.label(RichText::new("從：").font(Typography::body_small()));
                let mut currency = self.request.source();
                let mut amount = self.request.amount_input().to_string();
                let input = AmountInput::new(&mut currency, &mut amount)
                    .hint_text("0.00")
                    .desired_width(ui.available_width() - 100.0)
                    .show(ui)
                    .inner;
                if input.currency_changed {
                    self.request.set_source(currency);
                }
                if input.amount_changed {
                    self.request.set_amount(amount);
                }

                ui.horizontal(|ui| {
                    ui.label(hint(format!(
                        "可用餘額: {} {}",
                        self.request.available().to_grouped_string(),
                        self.request.source()
                    )));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        match self.request.validation_error() {
                            Some(error) => {
                                error_label(ui, &error.to_string());
                            }
                            None => {
                                ui.label(hint(format!(
                                    "最低: {} USDT",
                                    MIN_WITHDRAWAL_USDT.to_grouped_string()
                                )));
                            }
                        }
                    });
                });

                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("↓").size(Typography::SCALE_XL).weak());
                });

                ui.label(RichText::new("轉換至：").font(Typography::body_small()));
                ui.horizontal(|ui| {
                    let mut target = self.request.target();
                    ComboBox::from_id_salt("withdrawal_target_currency")
                        .selected_text(target.label())
                        .width(80.0)
                        .show_ui(ui, |ui| {
                            for option in enum_iterator::all::<FiatTarget>() {
                                ui.selectable_value(&mut target, option, option.label());
                            }
                        });
                    if target != self.request.target() {
                        self.request.set_target(target);
                    }

                    let preview = self
                        .request
                        .fiat_preview()
                        .map(|fiat| fiat.to_grouped_string())
                        .unwrap_or_else(|| "0".to_string());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(RichText::new(preview).font(Typography::heading_medium()).strong());
                    });
                });
                ui.label(hint(format!(
                    "匯率: 1 {} ≈ {} {}",
                    self.request.source(),
                    EXCHANGE_RATES
                        .fiat_rate(self.request.source())
                        .to_grouped_string(),
                    self.request.target()
                )));
                ui.add_space(Spacing::MD);

                ui.horizontal(|ui| {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if StyledButton::primary("確認出金")
                            .enabled(self.request.can_submit())
                            .show(ui)
                            .clicked()
                        {
                            // a failed check leaves the message on the form
                            let _ = self.request.submit();
                        }
                        ui.add_space(Spacing::SM);
                        if StyledButton::secondary("取消").show(ui).clicked() {
                            action = AppAction::CloseModal(ModalKind::Withdrawal);
                        }
                    });
                });
            });

        if !is_open {
            action = AppAction::CloseModal(ModalKind::Withdrawal);
        }
        action
    }

    fn show_success(ui: &mut Ui, fiat: &str) -> AppAction {
        let mut action = AppAction::None;
        egui::Window::new("出金成功")
            .id(egui::Id::new("withdrawal_success"))
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ui.ctx(), |ui| {
                ui.set_min_width(300.0);
                ui.vertical_centered(|ui| {
                    ui.add_space(Spacing::MD);
                    status_badge(ui, "✔", ZoneColors::SUCCESS);
                    ui.add_space(Spacing::SM);
                    ui.label(
                        RichText::new("出金成功！")
                            .font(Typography::heading_medium())
                            .strong(),
                    );
                    ui.label(format!("約 {} TWD 已轉入你的錢包", fiat));
                    ui.add_space(Spacing::MD);
                });
                ui.vertical_centered_justified(|ui| {
                    if StyledButton::primary("完成").full_width().show(ui).clicked() {
                        action = AppAction::CloseModal(ModalKind::Withdrawal);
                    }
                });
            });
        action
    }
}
