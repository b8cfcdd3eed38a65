use super::{ServiceError, ZoneService};
use crate::model::amount::Amount;
use crate::model::binding::{BoundAccount, MaskedContact};
use crate::model::currency::CryptoCurrency;
use crate::model::withdrawal::WithdrawalReceipt;
use chrono::Utc;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

pub const MOCK_MASKED_PHONE: &str = "09xxxxx845";
pub const MOCK_MASKED_EMAIL: &str = "aaron.huxx@gmail.com";

/// Simulated round-trip time of each call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockLatency {
    pub lookup: Duration,
    pub send_code: Duration,
    pub verify: Duration,
    pub withdraw: Duration,
}

impl MockLatency {
    /// No delay at all; used by tests.
    pub const fn zero() -> Self {
        Self {
            lookup: Duration::ZERO,
            send_code: Duration::ZERO,
            verify: Duration::ZERO,
            withdraw: Duration::ZERO,
        }
    }
}

impl Default for MockLatency {
    fn default() -> Self {
        Self {
            lookup: Duration::from_millis(1000),
            send_code: Duration::from_millis(1000),
            verify: Duration::from_millis(1500),
            withdraw: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceCall {
    LookupUid,
    SendVerificationCode,
    VerifyAndBind,
    ExecuteWithdrawal,
}

/// In-process stand-in for the account service.
///
/// Every call sleeps for its configured latency and then succeeds with a fixed
/// payload, unless a failure has been scripted for it with
/// [MockZoneService::fail_with] or [MockZoneService::set_failure].
#[derive(Debug, Default)]
pub struct MockZoneService {
    latency: MockLatency,
    failures: Mutex<HashMap<ServiceCall, ServiceError>>,
}

impl MockZoneService {
    pub fn new(latency: MockLatency) -> Self {
        Self {
            latency,
            failures: Mutex::new(HashMap::new()),
        }
    }

    /// Makes every subsequent `call` fail with `error`.
    pub fn fail_with(self, call: ServiceCall, error: ServiceError) -> Self {
        self.set_failure(call, Some(error));
        self
    }

    /// Scripts (`Some`) or clears (`None`) the failure of `call`.
    pub fn set_failure(&self, call: ServiceCall, error: Option<ServiceError>) {
        let mut failures = self
            .failures
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match error {
            Some(error) => failures.insert(call, error),
            None => failures.remove(&call),
        };
    }

    fn scripted_failure(&self, call: ServiceCall) -> Option<ServiceError> {
        self.failures
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&call)
            .cloned()
    }

    async fn respond<T>(
        &self,
        call: ServiceCall,
        delay: Duration,
        payload: impl FnOnce() -> T,
    ) -> Result<T, ServiceError> {
        tokio::time::sleep(delay).await;
        if let Some(error) = self.scripted_failure(call) {
            tracing::debug!(?call, %error, "mock service returning scripted failure");
            return Err(error);
        }
        tracing::trace!(?call, "mock service call succeeded");
        Ok(payload())
    }
}

impl ZoneService for MockZoneService {
    fn lookup_uid<'a>(&'a self, _uid: &'a str) -> BoxFuture<'a, Result<MaskedContact, ServiceError>> {
        self.respond(ServiceCall::LookupUid, self.latency.lookup, || MaskedContact {
            phone: MOCK_MASKED_PHONE.to_string(),
            email: MOCK_MASKED_EMAIL.to_string(),
        })
        .boxed()
    }

    fn send_verification_code<'a>(&'a self, _uid: &'a str) -> BoxFuture<'a, Result<(), ServiceError>> {
        self.respond(
            ServiceCall::SendVerificationCode,
            self.latency.send_code,
            || (),
        )
        .boxed()
    }

    fn verify_and_bind<'a>(
        &'a self,
        uid: &'a str,
        _otp: &'a str,
    ) -> BoxFuture<'a, Result<BoundAccount, ServiceError>> {
        self.respond(ServiceCall::VerifyAndBind, self.latency.verify, || {
            BoundAccount {
                uid: uid.to_string(),
                bound_at: Utc::now(),
            }
        })
        .boxed()
    }

    fn execute_withdrawal<'a>(
        &'a self,
        currency: CryptoCurrency,
        amount: &'a Amount,
    ) -> BoxFuture<'a, Result<WithdrawalReceipt, ServiceError>> {
        self.respond(ServiceCall::ExecuteWithdrawal, self.latency.withdraw, move || {
            WithdrawalReceipt {
                reference: hex::encode(rand::random::<[u8; 8]>()),
                currency,
                amount: amount.clone(),
                settled_at: Utc::now(),
            }
        })
        .boxed()
    }
}
