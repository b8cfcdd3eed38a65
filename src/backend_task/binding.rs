use super::{BackendTaskSuccessResult, TaskError};
use crate::context::AppContext;

/// Calls issued by the wallet binding wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingTask {
    LookupUid(String),
    SendVerificationCode(String),
    VerifyAndBind { uid: String, otp: String },
}

impl AppContext {
    pub(super) async fn run_binding_task(
        &self,
        task: BindingTask,
    ) -> Result<BackendTaskSuccessResult, TaskError> {
        match task {
            BindingTask::LookupUid(uid) => {
                tracing::info!(%uid, "looking up ZONE account");
                let contact = self.service.lookup_uid(&uid).await?;
                Ok(BackendTaskSuccessResult::MaskedContact(contact))
            }
            BindingTask::SendVerificationCode(uid) => {
                tracing::info!(%uid, "requesting verification code");
                self.service.send_verification_code(&uid).await?;
                Ok(BackendTaskSuccessResult::VerificationCodeSent)
            }
            BindingTask::VerifyAndBind { uid, otp } => {
                tracing::info!(%uid, "verifying code and binding wallet");
                let account = self.service.verify_and_bind(&uid, &otp).await?;
                Ok(BackendTaskSuccessResult::WalletBound(account))
            }
        }
    }
}
