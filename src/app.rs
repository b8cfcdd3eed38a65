use crate::backend_task::{BackendTask, TaskError, TaskResult};
use crate::config::{Config, ConfigError};
use crate::context::AppContext;
use crate::model::binding::BoundAccount;
use crate::ui::ScreenLike;
use crate::ui::theme::{apply_theme, configure_fonts};
use crate::ui::wallet_screen::WalletScreen;
use crate::utils::egui_mpsc::{EguiMpscAsync, SenderAsync};
use crate::utils::tasks::SessionScope;
use eframe::{App, egui};
use std::ops::BitOrAssign;
use std::sync::Arc;
use tokio::sync::mpsc;

const TASK_RESULT_CHANNEL_SIZE: usize = 64;

pub struct AppState {
    pub app_context: Arc<AppContext>,
    pub wallet_screen: WalletScreen,
    task_result_sender: SenderAsync<TaskResult>,
    task_result_receiver: mpsc::Receiver<TaskResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    BindingWizard,
    Withdrawal,
}

#[derive(Debug)]
pub enum AppAction {
    None,
    OpenBindingWizard,
    OpenWithdrawal,
    CloseModal(ModalKind),
    GoToWithdrawal,
    OpenTutorial,
    WalletBound(BoundAccount),
    BackendTask(SessionScope, BackendTask),
    OpenUrl(String),
}

impl BitOrAssign for AppAction {
    fn bitor_assign(&mut self, rhs: Self) {
        if matches!(rhs, AppAction::None) {
            // If rhs is None, keep the current value.
            return;
        }

        // Otherwise, assign rhs to self.
        *self = rhs;
    }
}

impl AppState {
    /// Loads the configuration and builds the app on the mock service.
    ///
    /// A missing `.env` file is logged and the defaults apply; values that
    /// do not parse are an error.
    pub fn new(egui_ctx: egui::Context) -> Result<Self, ConfigError> {
        Self::from_config(egui_ctx, Config::load()?)
    }

    pub fn from_config(egui_ctx: egui::Context, config: Config) -> Result<Self, ConfigError> {
        let app_context = AppContext::new(config)?;
        Ok(Self::with_context(egui_ctx, app_context))
    }

    pub fn with_context(egui_ctx: egui::Context, app_context: Arc<AppContext>) -> Self {
        apply_theme(&egui_ctx, app_context.config.theme);
        egui_ctx.set_fonts(configure_fonts(app_context.config.cjk_font_path.as_deref()));

        let (task_result_sender, task_result_receiver) =
            mpsc::channel(TASK_RESULT_CHANNEL_SIZE).with_egui_ctx(egui_ctx);

        Self {
            wallet_screen: WalletScreen::new(&app_context),
            app_context,
            task_result_sender,
            task_result_receiver,
        }
    }

    /// Runs a backend task on the task manager; the result is sent back
    /// tagged with the session that issued it.
    pub fn handle_backend_task(&self, scope: SessionScope, task: BackendTask) {
        let app_context = self.app_context.clone();
        let sender = self.task_result_sender.clone();
        tracing::debug!(session = ?scope.id(), ?task, "running backend task");

        self.app_context.task_manager.spawn_sync(async move {
            let outcome = tokio::select! {
                _ = scope.cancelled() => Err(TaskError::Cancelled),
                result = app_context.run_backend_task(task.clone()) => result,
            };
            if let Err(TaskError::Cancelled) = outcome {
                tracing::debug!(session = ?scope.id(), ?task, "backend task cancelled");
                return;
            }
            if sender.is_closed() {
                return;
            }
            let result = TaskResult {
                session: scope.id(),
                task,
                outcome,
            };
            if let Err(e) = sender.send(result).await {
                tracing::warn!(error = %e, "failed to deliver backend task result");
            }
        });
    }

    fn handle_action(&mut self, ctx: &egui::Context, action: AppAction) {
        match action {
            AppAction::None => {}
            AppAction::BackendTask(scope, task) => self.handle_backend_task(scope, task),
            AppAction::OpenUrl(url) => {
                tracing::info!(%url, "opening url");
                ctx.open_url(egui::OpenUrl::new_tab(url));
            }
            other => {
                tracing::warn!(action = ?other, "unhandled app action");
            }
        }
    }
}

impl App for AppState {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(result) = self.task_result_receiver.try_recv() {
            let action = self.wallet_screen.display_task_result(result);
            self.handle_action(ctx, action);
        }

        let action = self.wallet_screen.ui(ctx);
        self.handle_action(ctx, action);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.app_context.task_manager.shutdown() {
            tracing::error!(error = %e, "failed to shut down background tasks");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_balance_is_an_error() {
        let config = Config {
            usdt_balance: "fifty".to_string(),
            ..Config::default()
        };

        let result = AppState::from_config(egui::Context::default(), config);

        assert!(matches!(result, Err(ConfigError::InvalidBalance(_))));
    }

    #[test]
    fn test_default_config_builds_the_app() {
        let app = AppState::from_config(egui::Context::default(), Config::default()).unwrap();

        assert!(!app.wallet_screen.binding_wizard.is_open());
        assert_eq!(app.app_context.balances(), &Config::default().balances().unwrap());
    }
}
