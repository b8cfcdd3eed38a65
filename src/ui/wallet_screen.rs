use crate::app::{AppAction, ModalKind};
use crate::backend_task::{BackendTask, TaskResult};
use crate::context::AppContext;
use crate::model::binding::BoundAccount;
use crate::model::currency::CryptoCurrency;
use crate::ui::ScreenLike;
use crate::ui::binding_wizard::BindingWizard;
use crate::ui::components::styled::{StyledButton, StyledCard};
use crate::ui::theme::{Spacing, Typography, ZoneColors};
use crate::ui::withdrawal_modal::WithdrawalModal;
use egui::{Context, RichText, Ui};
use std::sync::Arc;

/// Home screen: balances, binding status and the entry points of both modals.
pub struct WalletScreen {
    pub app_context: Arc<AppContext>,
    pub bound_account: Option<BoundAccount>,
    pub binding_wizard: BindingWizard,
    pub withdrawal_modal: WithdrawalModal,
}

impl WalletScreen {
    pub fn new(app_context: &Arc<AppContext>) -> Self {
        Self {
            app_context: app_context.clone(),
            bound_account: None,
            binding_wizard: BindingWizard::new(),
            withdrawal_modal: WithdrawalModal::new(),
        }
    }

    pub fn open_binding_wizard(&mut self) {
        self.withdrawal_modal.close();
        let scope = self.app_context.task_manager().session_scope();
        self.binding_wizard.open(scope);
    }

    pub fn open_withdrawal(&mut self) {
        self.binding_wizard.close();
        let scope = self.app_context.task_manager().session_scope();
        self.withdrawal_modal
            .open(scope, self.app_context.balances().clone());
    }

    /// Handles the actions that concern this screen and its modals; the rest
    /// is handed back to the app.
    fn handle_action(&mut self, action: AppAction) -> AppAction {
        match action {
            AppAction::OpenBindingWizard => {
                self.open_binding_wizard();
                AppAction::None
            }
            AppAction::OpenWithdrawal | AppAction::GoToWithdrawal => {
                self.open_withdrawal();
                AppAction::None
            }
            AppAction::CloseModal(ModalKind::BindingWizard) => {
                self.binding_wizard.close();
                AppAction::None
            }
            AppAction::CloseModal(ModalKind::Withdrawal) => {
                self.withdrawal_modal.close();
                AppAction::None
            }
            AppAction::OpenTutorial => {
                self.binding_wizard.close();
                AppAction::OpenUrl(self.app_context.tutorial_url().to_string())
            }
            AppAction::WalletBound(account) => {
                tracing::info!(uid = %account.uid, bound_at = %account.bound_at, "wallet bound");
                self.bound_account = Some(account);
                AppAction::None
            }
            other => other,
        }
    }

    fn show_balances(&self, ui: &mut Ui) {
        let dark_mode = ui.ctx().style().visuals.dark_mode;
        let balances = self.app_context.balances();

        StyledCard::new().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                RichText::new("可用餘額")
                    .font(Typography::body_small())
                    .color(ZoneColors::text_secondary(dark_mode)),
            );
            for currency in enum_iterator::all::<CryptoCurrency>() {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(currency.symbol()).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(balances.available(currency).to_grouped_string())
                                .font(Typography::heading_medium()),
                        );
                    });
                });
            }
        });
    }

    fn show_binding_status(&self, ui: &mut Ui) {
        let dark_mode = ui.ctx().style().visuals.dark_mode;
        match &self.bound_account {
            Some(account) => {
                ui.label(
                    RichText::new(format!("已綁定 ZONE UID：{}", account.uid))
                        .color(ZoneColors::SUCCESS),
                );
            }
            None => {
                ui.label(
                    RichText::new("尚未綁定 ZONE 帳號")
                        .color(ZoneColors::text_secondary(dark_mode)),
                );
            }
        }
    }
}

impl ScreenLike for WalletScreen {
    fn ui(&mut self, ctx: &Context) -> AppAction {
        let mut action = AppAction::None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(Spacing::LG);
            ui.vertical_centered(|ui| {
                ui.set_max_width(480.0);
                ui.label(
                    RichText::new("ZoneWallet")
                        .font(Typography::heading_large())
                        .strong(),
                );
                ui.add_space(Spacing::MD);
                self.show_balances(ui);
                ui.add_space(Spacing::MD);
                self.show_binding_status(ui);
                ui.add_space(Spacing::MD);

                ui.horizontal(|ui| {
                    if StyledButton::primary("綁定 ZONE 帳號").show(ui).clicked() {
                        action = AppAction::OpenBindingWizard;
                    }
                    if StyledButton::secondary("出金").show(ui).clicked() {
                        action = AppAction::OpenWithdrawal;
                    }
                });
            });

            action |= self.binding_wizard.show(ui);
            action |= self.withdrawal_modal.show(ui);
        });

        self.handle_action(action)
    }

    fn display_task_result(&mut self, result: TaskResult) -> AppAction {
        let TaskResult {
            session,
            task,
            outcome,
        } = result;
        let action = match &task {
            BackendTask::BindingTask(task) => {
                self.binding_wizard
                    .display_task_result(session, task, outcome)
            }
            BackendTask::WithdrawalTask(task) => {
                self.withdrawal_modal
                    .display_task_result(session, task, outcome)
            }
        };
        self.handle_action(action)
    }
}
