use crate::app::{AppAction, ModalKind};
use crate::backend_task::binding::BindingTask;
use crate::backend_task::{BackendTask, BackendTaskSuccessResult, TaskError};
use crate::model::binding::{BindingSession, BindingStep};
use crate::ui::components::otp_input::OtpInput;
use crate::ui::components::styled::{StyledButton, StyledCard, error_label, status_badge};
use crate::ui::theme::{Shape, Spacing, Typography, ZoneColors};
use crate::utils::tasks::{SessionId, SessionScope};
use egui::{Key, RichText, TextEdit, Ui};
use std::time::Instant;

/// Four-step modal that links the wallet to a ZONE account.
#[derive(Debug, Default)]
pub struct BindingWizard {
    session: BindingSession,
    scope: Option<SessionScope>,
}

impl BindingWizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the wizard on its first step. Anything left from an earlier opening is discarded.
    pub fn open(&mut self, scope: SessionScope) {
        if let Some(previous) = self.scope.replace(scope) {
            previous.cancel();
        }
        self.session.reset();
        tracing::info!("binding wizard opened");
    }

    pub fn close(&mut self) {
        if let Some(scope) = self.scope.take() {
            scope.cancel();
            tracing::info!(step = ?self.session.step(), "binding wizard closed");
        }
        self.session.reset();
    }

    pub fn is_open(&self) -> bool {
        self.scope.is_some()
    }

    pub fn session(&self) -> &BindingSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut BindingSession {
        &mut self.session
    }

    /// Applies a backend result issued by this wizard.
    ///
    /// Results from an earlier opening are dropped.
    pub fn display_task_result(
        &mut self,
        session: SessionId,
        task: &BindingTask,
        outcome: Result<BackendTaskSuccessResult, TaskError>,
    ) -> AppAction {
        if self.scope.as_ref().map(SessionScope::id) != Some(session) {
            tracing::debug!(?session, ?task, "dropping stale binding result");
            return AppAction::None;
        }

        match self.session.apply_result(task, outcome, Instant::now()) {
            Some(account) => AppAction::WalletBound(account),
            None => AppAction::None,
        }
    }

    fn backend_task(&self, task: Option<BindingTask>) -> AppAction {
        match (task, &self.scope) {
            (Some(task), Some(scope)) => {
                AppAction::BackendTask(scope.clone(), BackendTask::BindingTask(task))
            }
            _ => AppAction::None,
        }
    }

    pub fn show(&mut self, ui: &mut Ui) -> AppAction {
        if !self.is_open() {
            return AppAction::None;
        }
        let ctx = ui.ctx().clone();

        let now = Instant::now();
        self.session.tick(now);
        if let Some(delay) = self.session.countdown().time_until_next_tick(now) {
            ctx.request_repaint_after(delay);
        }
        if self.session.is_pending() {
            // keep the spinner moving
            ctx.request_repaint();
        }

        let mut action = AppAction::None;
        egui::Window::new("綁定 ZONE 帳號")
            .id(egui::Id::new("binding_wizard"))
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .default_width(Spacing::MODAL_WIDTH)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(&ctx, |ui| {
                ui.set_min_width(Spacing::MODAL_WIDTH);
                ui.add_space(Spacing::SM);
                action = match self.session.step() {
                    BindingStep::CollectUid => self.show_collect_uid(ui),
                    BindingStep::ConfirmContact => self.show_confirm_contact(ui),
                    BindingStep::EnterOtp => self.show_enter_otp(ui),
                    BindingStep::Success => self.show_success(ui),
                };
                ui.add_space(Spacing::SM);
            });

        if matches!(action, AppAction::None) && ctx.input(|i| i.key_pressed(Key::Escape)) {
            action = AppAction::CloseModal(ModalKind::BindingWizard);
        }
        action
    }

    fn header(ui: &mut Ui, title: &str, description: Option<&str>) {
        let dark_mode = ui.ctx().style().visuals.dark_mode;
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new(title)
                    .font(Typography::heading_large())
                    .strong()
                    .color(ZoneColors::text_primary(dark_mode)),
            );
            if let Some(description) = description {
                ui.label(
                    RichText::new(description)
                        .font(Typography::body())
                        .color(ZoneColors::text_secondary(dark_mode)),
                );
            }
        });
        ui.add_space(Spacing::MD);
    }

    fn show_error(&self, ui: &mut Ui) {
        if let Some(message) = self.session.error_message() {
            ui.vertical_centered(|ui| error_label(ui, message));
        }
    }

    fn show_collect_uid(&mut self, ui: &mut Ui) -> AppAction {
        let mut action = AppAction::None;
        let pending = self.session.is_pending();
        Self::header(ui, "驗證你的帳號", Some("為確保是本人操作，請輸入你的 ZONE UID"));

        egui::Frame::new()
            .fill(ZoneColors::ORANGE)
            .corner_radius(egui::CornerRadius::same(Shape::RADIUS_MD))
            .inner_margin(egui::Margin::same(Spacing::SM as i8))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("👉").color(ZoneColors::WHITE));
                    let link = egui::Button::new(
                        RichText::new("還沒有 UID？先看綁定教學")
                            .color(ZoneColors::WHITE)
                            .strong(),
                    )
                    .frame(false);
                    if ui.add(link).clicked() {
                        action = AppAction::OpenTutorial;
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new("去領獎勵")
                                .font(Typography::caption())
                                .background_color(ZoneColors::RED)
                                .color(ZoneColors::WHITE),
                        );
                    });
                });
            });
        ui.add_space(Spacing::MD);

        ui.label(RichText::new("請輸入你的 ZONE UID").font(Typography::body_small()));
        let mut uid = self.session.uid().to_string();
        let response = ui.add_enabled(
            !pending,
            TextEdit::singleline(&mut uid)
                .hint_text("請輸入 UID")
                .desired_width(ui.available_width()),
        );
        if response.changed() {
            self.session.set_uid(uid);
        }
        let submitted_with_enter =
            response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
        self.show_error(ui);
        ui.add_space(Spacing::MD);

        ui.vertical_centered_justified(|ui| {
            let next = StyledButton::primary("下一步")
                .enabled(!pending)
                .full_width()
                .show(ui);
            if pending {
                ui.add(egui::Spinner::new());
            }
            if next.clicked() || submitted_with_enter {
                let task = self.session.submit_uid();
                action = self.backend_task(task);
            }
            if StyledButton::ghost("取消").full_width().show(ui).clicked() {
                action = AppAction::CloseModal(ModalKind::BindingWizard);
            }
        });
        action
    }

    fn show_confirm_contact(&mut self, ui: &mut Ui) -> AppAction {
        let mut action = AppAction::None;
        let pending = self.session.is_pending();
        Self::header(ui, "確認你的聯絡資訊", None);

        if let Some(contact) = self.session.masked_contact() {
            let dark_mode = ui.ctx().style().visuals.dark_mode;
            StyledCard::new().padding(Spacing::MD).show(ui, |ui| {
                ui.set_width(ui.available_width());
                for (label, value) in [("手機", &contact.phone), ("Email", &contact.email)] {
                    ui.label(
                        RichText::new(label)
                            .font(Typography::caption())
                            .color(ZoneColors::text_secondary(dark_mode)),
                    );
                    ui.label(RichText::new(value).strong());
                    ui.add_space(Spacing::XS);
                }
            });
        }
        ui.add_space(Spacing::SM);
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("若資訊正確，請發送驗證碼")
                    .font(Typography::body_small())
                    .weak(),
            );
        });
        self.show_error(ui);
        ui.add_space(Spacing::MD);

        ui.vertical_centered_justified(|ui| {
            if StyledButton::primary("確認並發送驗證碼")
                .enabled(!pending)
                .full_width()
                .show(ui)
                .clicked()
            {
                let task = self.session.confirm_contact();
                action = self.backend_task(task);
            }
            if pending {
                ui.add(egui::Spinner::new());
            }
            if StyledButton::ghost("這不是我")
                .enabled(!pending)
                .full_width()
                .show(ui)
                .clicked()
            {
                self.session.not_me();
            }
        });
        action
    }

    fn show_enter_otp(&mut self, ui: &mut Ui) -> AppAction {
        let mut action = AppAction::None;
        let pending = self.session.is_pending();
        Self::header(ui, "輸入驗證碼", Some("我們已將 6 位數驗證碼發送至你的手機"));

        let mut code = self.session.otp().to_string();
        if OtpInput::new(&mut code).enabled(!pending).show(ui).changed() {
            self.session.set_otp(&code);
        }
        self.show_error(ui);
        ui.add_space(Spacing::SM);

        ui.horizontal(|ui| {
            ui.label(RichText::new("沒有收到？").font(Typography::body_small()).weak());
            let countdown = self.session.countdown();
            let resend_text = if countdown.is_running() {
                format!("重新發送 ({}s)", countdown.remaining())
            } else {
                "重新發送驗證碼".to_string()
            };
            if StyledButton::ghost(resend_text)
                .enabled(!countdown.is_running())
                .show(ui)
                .clicked()
            {
                let task = self.session.resend(Instant::now());
                action = self.backend_task(task);
            }
        });
        ui.add_space(Spacing::MD);

        ui.vertical_centered_justified(|ui| {
            if StyledButton::primary("確認驗證")
                .enabled(self.session.can_verify())
                .full_width()
                .show(ui)
                .clicked()
            {
                let task = self.session.submit_otp();
                action = self.backend_task(task);
            }
            if pending {
                ui.add(egui::Spinner::new());
            }
        });
        action
    }

    fn show_success(&mut self, ui: &mut Ui) -> AppAction {
        let mut action = AppAction::None;
        ui.vertical_centered(|ui| {
            status_badge(ui, "✔", ZoneColors::SUCCESS);
            ui.add_space(Spacing::SM);
        });
        Self::header(ui, "驗證成功！", Some("你的帳號已成功綁定 ZONE"));

        ui.vertical_centered_justified(|ui| {
            if StyledButton::primary("前往提領").full_width().show(ui).clicked() {
                action = AppAction::GoToWithdrawal;
            }
        });
        action
    }
}
