use crate::app::AppAction;
use crate::backend_task::TaskResult;
use egui::Context;

pub mod binding_wizard;
pub mod components;
pub mod theme;
pub mod wallet_screen;
pub mod withdrawal_modal;

pub trait ScreenLike {
    fn ui(&mut self, ctx: &Context) -> AppAction;
    /// Routes the result of a backend task to whatever issued it.
    fn display_task_result(&mut self, _result: TaskResult) -> AppAction {
        AppAction::None
    }
}
