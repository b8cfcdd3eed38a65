use crate::backend_task::binding::BindingTask;
use crate::backend_task::withdrawal::WithdrawalTask;
use crate::context::AppContext;
use crate::model::binding::{BoundAccount, MaskedContact};
use crate::model::withdrawal::WithdrawalReceipt;
use crate::service::ServiceError;
use crate::utils::tasks::SessionId;
use std::sync::Arc;

pub mod binding;
pub mod withdrawal;

#[derive(Debug, Clone, PartialEq)]
pub enum BackendTask {
    BindingTask(BindingTask),
    WithdrawalTask(WithdrawalTask),
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackendTaskSuccessResult {
    MaskedContact(MaskedContact),
    VerificationCodeSent,
    WalletBound(BoundAccount),
    WithdrawalSettled(WithdrawalReceipt),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("操作已取消")]
    Cancelled,
}

/// Outcome of a backend task, routed back to the modal session that issued it.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskResult {
    pub session: SessionId,
    pub task: BackendTask,
    pub outcome: Result<BackendTaskSuccessResult, TaskError>,
}

impl AppContext {
    pub async fn run_backend_task(
        self: &Arc<Self>,
        task: BackendTask,
    ) -> Result<BackendTaskSuccessResult, TaskError> {
        match task {
            BackendTask::BindingTask(binding_task) => self.run_binding_task(binding_task).await,
            BackendTask::WithdrawalTask(withdrawal_task) => {
                self.run_withdrawal_task(withdrawal_task).await
            }
        }
    }
}
