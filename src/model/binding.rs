use crate::backend_task::binding::BindingTask;
use crate::backend_task::{BackendTaskSuccessResult, TaskError};
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// Minimum number of characters of a ZONE UID.
pub const MIN_UID_LENGTH: usize = 6;
/// Number of digits of a verification code.
pub const OTP_LENGTH: usize = 6;
/// Seconds the user has to wait before another code can be requested.
pub const RESEND_COOLDOWN_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingStep {
    #[default]
    CollectUid,
    ConfirmContact,
    EnterOtp,
    Success,
}

/// Partially obscured contact details registered for a UID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedContact {
    pub phone: String,
    pub email: String,
}

/// A UID successfully bound to this wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundAccount {
    pub uid: String,
    pub bound_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BindingValidationError {
    #[error("請輸入 UID")]
    EmptyUid,
    #[error("UID 格式錯誤")]
    UidTooShort,
    #[error("驗證碼應為 6 位數")]
    OtpLength,
}

pub fn validate_uid(uid: &str) -> Result<(), BindingValidationError> {
    if uid.is_empty() {
        return Err(BindingValidationError::EmptyUid);
    }
    if uid.chars().count() < MIN_UID_LENGTH {
        return Err(BindingValidationError::UidTooShort);
    }
    Ok(())
}

pub fn validate_otp(otp: &str) -> Result<(), BindingValidationError> {
    if otp.len() == OTP_LENGTH && otp.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(BindingValidationError::OtpLength)
    }
}

/// Cooldown before a verification code may be requested again.
///
/// The remaining time is derived from the instant the countdown started, so a
/// slow frame never makes it lose or gain seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResendCountdown {
    started_at: Option<Instant>,
    total_secs: u64,
    remaining_secs: u64,
}

impl ResendCountdown {
    pub fn start(&mut self, secs: u64, now: Instant) {
        self.started_at = Some(now);
        self.total_secs = secs;
        self.remaining_secs = secs;
    }

    pub fn remaining(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.remaining_secs > 0
    }

    /// Recomputes the remaining seconds. Returns true if the value changed.
    pub fn advance(&mut self, now: Instant) -> bool {
        let Some(started_at) = self.started_at else {
            return false;
        };
        let elapsed = now.saturating_duration_since(started_at).as_secs();
        let remaining = self.total_secs.saturating_sub(elapsed);
        if remaining == 0 {
            self.started_at = None;
        }
        let changed = remaining != self.remaining_secs;
        self.remaining_secs = remaining;
        changed
    }

    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    /// Time left until the displayed value next decrements, if running.
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        let started_at = self.started_at?;
        let elapsed = now.saturating_duration_since(started_at);
        let next_tick = Duration::from_secs(elapsed.as_secs() + 1);
        Some(next_tick.saturating_sub(elapsed))
    }
}

/// State of one opening of the binding wizard.
///
/// Handlers that need the remote service return the [BindingTask] to run;
/// its result is fed back with [BindingSession::apply_result].
#[derive(Debug, Clone, Default)]
pub struct BindingSession {
    step: BindingStep,
    uid: String,
    otp: String,
    masked_contact: Option<MaskedContact>,
    countdown: ResendCountdown,
    error_message: Option<String>,
    pending: bool,
}

impl BindingSession {
    pub fn step(&self) -> BindingStep {
        self.step
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn otp(&self) -> &str {
        &self.otp
    }

    pub fn masked_contact(&self) -> Option<&MaskedContact> {
        self.masked_contact.as_ref()
    }

    pub fn countdown(&self) -> &ResendCountdown {
        &self.countdown
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_uid(&mut self, uid: impl Into<String>) {
        self.uid = uid.into();
        self.error_message = None;
    }

    /// Keeps only ASCII digits, at most [OTP_LENGTH] of them.
    pub fn set_otp(&mut self, input: &str) {
        self.otp = input
            .chars()
            .filter(char::is_ascii_digit)
            .take(OTP_LENGTH)
            .collect();
        self.error_message = None;
    }

    pub fn can_verify(&self) -> bool {
        !self.pending && validate_otp(&self.otp).is_ok()
    }

    pub fn submit_uid(&mut self) -> Option<BindingTask> {
        if self.step != BindingStep::CollectUid || self.pending {
            return None;
        }
        if let Err(e) = validate_uid(&self.uid) {
            self.error_message = Some(e.to_string());
            return None;
        }
        self.error_message = None;
        self.pending = true;
        Some(BindingTask::LookupUid(self.uid.clone()))
    }

    pub fn confirm_contact(&mut self) -> Option<BindingTask> {
        if self.step != BindingStep::ConfirmContact || self.pending {
            return None;
        }
        self.error_message = None;
        self.pending = true;
        Some(BindingTask::SendVerificationCode(self.uid.clone()))
    }

    /// The contact details belong to someone else: start over with a new UID.
    pub fn not_me(&mut self) {
        if self.step != BindingStep::ConfirmContact || self.pending {
            return;
        }
        self.step = BindingStep::CollectUid;
        self.uid.clear();
        self.otp.clear();
        self.masked_contact = None;
        self.error_message = None;
    }

    pub fn submit_otp(&mut self) -> Option<BindingTask> {
        if self.step != BindingStep::EnterOtp || self.pending {
            return None;
        }
        if let Err(e) = validate_otp(&self.otp) {
            self.error_message = Some(e.to_string());
            return None;
        }
        self.error_message = None;
        self.pending = true;
        Some(BindingTask::VerifyAndBind {
            uid: self.uid.clone(),
            otp: self.otp.clone(),
        })
    }

    /// Requests another code. No-op while the cooldown is running.
    pub fn resend(&mut self, now: Instant) -> Option<BindingTask> {
        self.countdown.advance(now);
        if self.step != BindingStep::EnterOtp || self.countdown.is_running() {
            return None;
        }
        self.countdown.start(RESEND_COOLDOWN_SECS, now);
        self.error_message = None;
        Some(BindingTask::SendVerificationCode(self.uid.clone()))
    }

    /// Advances the resend countdown. Returns true if it changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.countdown.advance(now)
    }

    /// Applies the outcome of `task`. Returns the bound account once binding completes.
    pub fn apply_result(
        &mut self,
        task: &BindingTask,
        outcome: Result<BackendTaskSuccessResult, TaskError>,
        now: Instant,
    ) -> Option<BoundAccount> {
        let is_resend = matches!(task, BindingTask::SendVerificationCode(_))
            && self.step == BindingStep::EnterOtp;
        if !is_resend {
            self.pending = false;
        }

        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(?task, step = ?self.step, error = %e, "binding call failed");
                if is_resend {
                    self.countdown.cancel();
                }
                self.error_message = Some(e.to_string());
                return None;
            }
        };

        match (self.step, task, result) {
            (
                BindingStep::CollectUid,
                BindingTask::LookupUid(_),
                BackendTaskSuccessResult::MaskedContact(contact),
            ) => {
                self.masked_contact = Some(contact);
                self.step = BindingStep::ConfirmContact;
            }
            (
                BindingStep::ConfirmContact,
                BindingTask::SendVerificationCode(_),
                BackendTaskSuccessResult::VerificationCodeSent,
            ) => {
                self.otp.clear();
                self.countdown.start(RESEND_COOLDOWN_SECS, now);
                self.step = BindingStep::EnterOtp;
            }
            (
                BindingStep::EnterOtp,
                BindingTask::SendVerificationCode(_),
                BackendTaskSuccessResult::VerificationCodeSent,
            ) => {
                tracing::debug!("verification code re-sent");
            }
            (
                BindingStep::EnterOtp,
                BindingTask::VerifyAndBind { .. },
                BackendTaskSuccessResult::WalletBound(account),
            ) => {
                self.countdown.cancel();
                self.step = BindingStep::Success;
                return Some(account);
            }
            (step, task, result) => {
                tracing::warn!(?step, ?task, ?result, "ignoring binding result for another step");
                return None;
            }
        }
        tracing::debug!(step = ?self.step, "binding step changed");
        None
    }
}
