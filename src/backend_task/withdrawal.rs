use super::{BackendTaskSuccessResult, TaskError};
use crate::context::AppContext;
use crate::model::amount::Amount;
use crate::model::currency::CryptoCurrency;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WithdrawalTask {
    Execute {
        currency: CryptoCurrency,
        amount: Amount,
    },
}

impl AppContext {
    pub(super) async fn run_withdrawal_task(
        &self,
        task: WithdrawalTask,
    ) -> Result<BackendTaskSuccessResult, TaskError> {
        match task {
            WithdrawalTask::Execute { currency, amount } => {
                tracing::info!(%amount, %currency, "executing withdrawal");
                let receipt = self.service.execute_withdrawal(currency, &amount).await?;
                tracing::info!(reference = %receipt.reference, "withdrawal settled");
                Ok(BackendTaskSuccessResult::WithdrawalSettled(receipt))
            }
        }
    }
}
