//! Remote ZONE account service.
//!
//! The wallet never talks to the network directly: every lookup, code
//! dispatch, verification and withdrawal goes through [ZoneService]. The
//! application is wired to [mock::MockZoneService] until a real transport
//! exists.

use crate::model::amount::Amount;
use crate::model::binding::{BoundAccount, MaskedContact};
use crate::model::currency::CryptoCurrency;
use crate::model::withdrawal::WithdrawalReceipt;
use futures::future::BoxFuture;
use std::fmt::Debug;

pub mod mock;

/// Failures reported by the remote service.
///
/// The display strings are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("查無此 UID")]
    UidNotFound,
    #[error("UID 格式錯誤")]
    InvalidUid,
    #[error("驗證碼發送失敗，請稍後再試")]
    CodeDispatchFailed,
    #[error("驗證碼錯誤或已過期")]
    VerificationRejected,
    #[error("餘額不足，請重新確認金額")]
    InsufficientFunds,
    #[error("此筆出金暫時無法處理")]
    ComplianceHold,
    #[error("網路連線異常，請稍後再試")]
    Transport { detail: String },
}

/// Async boundary to the account service.
pub trait ZoneService: Send + Sync + Debug {
    /// Resolves a UID to the masked contact details registered for it.
    fn lookup_uid<'a>(&'a self, uid: &'a str) -> BoxFuture<'a, Result<MaskedContact, ServiceError>>;

    /// Asks the service to deliver a one-time passcode to the UID's registered channel.
    fn send_verification_code<'a>(&'a self, uid: &'a str) -> BoxFuture<'a, Result<(), ServiceError>>;

    /// Checks the passcode and binds the UID to this wallet.
    fn verify_and_bind<'a>(
        &'a self,
        uid: &'a str,
        otp: &'a str,
    ) -> BoxFuture<'a, Result<BoundAccount, ServiceError>>;

    fn execute_withdrawal<'a>(
        &'a self,
        currency: CryptoCurrency,
        amount: &'a Amount,
    ) -> BoxFuture<'a, Result<WithdrawalReceipt, ServiceError>>;
}
