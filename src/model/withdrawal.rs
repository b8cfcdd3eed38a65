use crate::backend_task::withdrawal::WithdrawalTask;
use crate::backend_task::{BackendTaskSuccessResult, TaskError};
use crate::model::amount::{Amount, AmountError};
use crate::model::balances::Balances;
use crate::model::currency::{CryptoCurrency, EXCHANGE_RATES, FiatTarget};
use chrono::{DateTime, Utc};

/// Smallest withdrawal accepted, expressed in USDT.
pub const MIN_WITHDRAWAL_USDT: Amount = Amount::new(10_000_000, 6);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WithdrawalValidationError {
    #[error("請輸入有效數字")]
    NotANumber,
    #[error("請輸入有效金額")]
    InvalidAmount,
    #[error("金額超過可用餘額")]
    ExceedsBalance,
    #[error("出金金額需至少 10 USDT 等值")]
    BelowMinimum,
}

/// Proof of a settled withdrawal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalReceipt {
    pub reference: String,
    pub currency: CryptoCurrency,
    pub amount: Amount,
    pub settled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WithdrawalPhase {
    #[default]
    Editing,
    /// Validated amount waiting for the user's confirmation. `error` holds
    /// the message of a failed previous attempt.
    Confirming {
        amount: Amount,
        fiat: Amount,
        error: Option<String>,
    },
    Submitting {
        amount: Amount,
        fiat: Amount,
    },
    Success {
        receipt: WithdrawalReceipt,
        fiat: Amount,
    },
}

/// State of one opening of the withdrawal form.
#[derive(Debug, Clone)]
pub struct WithdrawalRequest {
    source: CryptoCurrency,
    amount_input: String,
    target: FiatTarget,
    validation_error: Option<WithdrawalValidationError>,
    phase: WithdrawalPhase,
    balances: Balances,
}

impl WithdrawalRequest {
    pub fn new(balances: Balances) -> Self {
        Self {
            source: CryptoCurrency::default(),
            amount_input: String::new(),
            target: FiatTarget::default(),
            validation_error: None,
            phase: WithdrawalPhase::Editing,
            balances,
        }
    }

    /// Starts over with a fresh balances snapshot. The currency selection is kept.
    pub fn reset(&mut self, balances: Balances) {
        self.amount_input.clear();
        self.validation_error = None;
        self.phase = WithdrawalPhase::Editing;
        self.balances = balances;
    }

    pub fn source(&self) -> CryptoCurrency {
        self.source
    }

    pub fn target(&self) -> FiatTarget {
        self.target
    }

    pub fn amount_input(&self) -> &str {
        &self.amount_input
    }

    pub fn validation_error(&self) -> Option<WithdrawalValidationError> {
        self.validation_error
    }

    pub fn phase(&self) -> &WithdrawalPhase {
        &self.phase
    }

    pub fn balances(&self) -> &Balances {
        &self.balances
    }

    pub fn available(&self) -> &Amount {
        self.balances.available(self.source)
    }

    pub fn set_source(&mut self, currency: CryptoCurrency) {
        self.source = currency;
        self.recheck_input();
    }

    pub fn set_target(&mut self, target: FiatTarget) {
        self.target = target;
        self.recheck_input();
    }

    pub fn set_amount(&mut self, input: impl Into<String>) {
        self.amount_input = input.into();
        self.recheck_input();
    }

    fn recheck_input(&mut self) {
        self.validation_error = None;
        let input = self.amount_input.trim();
        if !input.is_empty() && !is_numeric_input(input, self.source) {
            self.validation_error = Some(WithdrawalValidationError::NotANumber);
        }
    }

    pub fn can_submit(&self) -> bool {
        self.phase == WithdrawalPhase::Editing
            && !self.amount_input.trim().is_empty()
            && self.validation_error.is_none()
    }

    /// Checks the entered amount, reporting the first failing rule.
    pub fn validate(&self) -> Result<Amount, WithdrawalValidationError> {
        let amount = self
            .source
            .parse_amount_rounded_down(&self.amount_input)
            .map_err(|_| WithdrawalValidationError::InvalidAmount)?;
        if amount.is_zero() {
            return Err(WithdrawalValidationError::InvalidAmount);
        }

        if amount > *self.available() {
            return Err(WithdrawalValidationError::ExceedsBalance);
        }

        let usdt_value = EXCHANGE_RATES
            .usdt_equivalent(&amount, self.source)
            .map_err(|_| WithdrawalValidationError::InvalidAmount)?;
        if usdt_value < MIN_WITHDRAWAL_USDT {
            return Err(WithdrawalValidationError::BelowMinimum);
        }

        Ok(amount)
    }

    /// Validates the form and moves to the confirmation step.
    pub fn submit(&mut self) -> Result<(), WithdrawalValidationError> {
        if self.phase != WithdrawalPhase::Editing {
            return Ok(());
        }
        let validated = self.validate().and_then(|amount| {
            EXCHANGE_RATES
                .fiat_equivalent(&amount, self.source)
                .map(|fiat| (amount, fiat))
                .map_err(|_| WithdrawalValidationError::InvalidAmount)
        });

        match validated {
            Ok((amount, fiat)) => {
                tracing::debug!(%amount, %fiat, "withdrawal awaiting confirmation");
                self.phase = WithdrawalPhase::Confirming {
                    amount,
                    fiat,
                    error: None,
                };
                Ok(())
            }
            Err(e) => {
                self.validation_error = Some(e);
                Err(e)
            }
        }
    }

    /// Back to editing with the entered amount preserved.
    pub fn cancel_confirmation(&mut self) {
        if matches!(self.phase, WithdrawalPhase::Confirming { .. }) {
            self.phase = WithdrawalPhase::Editing;
        }
    }

    pub fn confirm(&mut self) -> Option<WithdrawalTask> {
        let WithdrawalPhase::Confirming { amount, fiat, .. } = &self.phase else {
            return None;
        };
        let task = WithdrawalTask::Execute {
            currency: self.source,
            amount: amount.clone(),
        };
        self.phase = WithdrawalPhase::Submitting {
            amount: amount.clone(),
            fiat: fiat.clone(),
        };
        Some(task)
    }

    pub fn apply_result(&mut self, outcome: Result<BackendTaskSuccessResult, TaskError>) {
        let WithdrawalPhase::Submitting { amount, fiat } = &self.phase else {
            tracing::warn!(phase = ?self.phase, "withdrawal result arrived outside of submission");
            return;
        };

        match outcome {
            Ok(BackendTaskSuccessResult::WithdrawalSettled(receipt)) => {
                self.phase = WithdrawalPhase::Success {
                    receipt,
                    fiat: fiat.clone(),
                };
            }
            Ok(other) => {
                tracing::warn!(result = ?other, "unexpected result for withdrawal");
            }
            Err(e) => {
                tracing::warn!(error = %e, "withdrawal failed");
                self.phase = WithdrawalPhase::Confirming {
                    amount: amount.clone(),
                    fiat: fiat.clone(),
                    error: Some(e.to_string()),
                };
            }
        }
    }

    /// Fiat value of the entered amount, or `None` if it cannot be parsed yet.
    pub fn fiat_preview(&self) -> Option<Amount> {
        let amount = self.source.parse_amount_rounded_down(&self.amount_input).ok()?;
        EXCHANGE_RATES.fiat_equivalent(&amount, self.source).ok()
    }
}

/// Whether `input` reads as a number while it is being typed.
///
/// A leading minus is accepted here and rejected on submit. Digits past the
/// currency's precision are floored away, as on submit.
fn is_numeric_input(input: &str, currency: CryptoCurrency) -> bool {
    let unsigned = input.strip_prefix('-').unwrap_or(input);
    match Amount::parse_rounded_down(unsigned, currency.decimal_places()) {
        Ok(_) | Err(AmountError::TooManyDecimals(_) | AmountError::Overflow) => true,
        Err(AmountError::Empty | AmountError::NotANumber) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ServiceError;

    fn request() -> WithdrawalRequest {
        WithdrawalRequest::new(Balances::parse("50", "0.01").unwrap())
    }

    fn receipt(amount: &Amount) -> WithdrawalReceipt {
        WithdrawalReceipt {
            reference: "00ff00ff00ff00ff".to_string(),
            currency: CryptoCurrency::Usdt,
            amount: amount.clone(),
            settled_at: Utc::now(),
        }
    }

    #[test]
    fn test_below_minimum() {
        let mut request = request();
        request.set_amount("5");
        assert!(request.can_submit());

        assert_eq!(request.submit(), Err(WithdrawalValidationError::BelowMinimum));
        assert_eq!(request.phase(), &WithdrawalPhase::Editing);
        assert_eq!(
            request.validation_error().map(|e| e.to_string()),
            Some("出金金額需至少 10 USDT 等值".to_string())
        );
        assert!(!request.can_submit());
    }

    #[test]
    fn test_valid_amount_reaches_confirmation() {
        let mut request = request();
        request.set_amount("20");

        request.submit().unwrap();

        let WithdrawalPhase::Confirming { amount, fiat, error } = request.phase() else {
            panic!("expected confirmation, got {:?}", request.phase());
        };
        assert_eq!(amount.to_string(), "20 USDT");
        assert_eq!(fiat.to_grouped_string(), "626");
        assert_eq!(error, &None);
    }

    #[test]
    fn test_validation_precedence() {
        let mut request = request();

        for input in ["0", "-5", "abc", "1e3", "0.0000001"] {
            request.set_amount(input);
            assert_eq!(
                request.validate(),
                Err(WithdrawalValidationError::InvalidAmount),
                "input {input:?}"
            );
        }

        // over the balance and under the minimum at once: balance wins
        request.set_source(CryptoCurrency::Wbtc);
        request.set_amount("0.02");
        assert_eq!(request.validate(), Err(WithdrawalValidationError::ExceedsBalance));

        request.set_amount("0.0001");
        assert_eq!(request.validate(), Err(WithdrawalValidationError::BelowMinimum));

        request.set_amount("0.001");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_excess_precision_is_floored() {
        let mut request = request();
        request.set_amount("20.0000001");
        assert_eq!(request.validation_error(), None);
        assert!(request.can_submit());
        assert_eq!(request.fiat_preview().map(|fiat| fiat.value()), Some(626));

        request.submit().unwrap();

        let WithdrawalPhase::Confirming { amount, fiat, .. } = request.phase() else {
            panic!("expected confirmation, got {:?}", request.phase());
        };
        assert_eq!(amount.to_string(), "20 USDT");
        assert_eq!(fiat.to_grouped_string(), "626");
    }

    #[test]
    fn test_edit_time_number_check() {
        let mut request = request();

        request.set_amount("12a");
        assert_eq!(request.validation_error(), Some(WithdrawalValidationError::NotANumber));
        assert!(!request.can_submit());

        request.set_amount("12.");
        assert_eq!(request.validation_error(), None);

        request.set_amount("-");
        assert_eq!(request.validation_error(), Some(WithdrawalValidationError::NotANumber));

        request.set_amount("");
        assert_eq!(request.validation_error(), None);
        assert!(!request.can_submit());
    }

    #[test]
    fn test_cancel_preserves_input() {
        let mut request = request();
        request.set_amount("20");
        request.submit().unwrap();

        request.cancel_confirmation();

        assert_eq!(request.phase(), &WithdrawalPhase::Editing);
        assert_eq!(request.amount_input(), "20");
    }

    #[test]
    fn test_confirm_and_settle() {
        let mut request = request();
        request.set_amount("20");
        request.submit().unwrap();

        let task = request.confirm().unwrap();
        let WithdrawalTask::Execute { currency, amount } = &task;
        assert_eq!(*currency, CryptoCurrency::Usdt);
        assert!(matches!(request.phase(), WithdrawalPhase::Submitting { .. }));
        assert_eq!(request.confirm(), None);

        request.apply_result(Ok(BackendTaskSuccessResult::WithdrawalSettled(receipt(amount))));

        let WithdrawalPhase::Success { fiat, .. } = request.phase() else {
            panic!("expected success, got {:?}", request.phase());
        };
        assert_eq!(fiat.value(), 626);
    }

    #[test]
    fn test_failed_withdrawal_returns_to_confirmation() {
        let mut request = request();
        request.set_amount("20");
        request.submit().unwrap();
        request.confirm().unwrap();

        request.apply_result(Err(TaskError::Service(ServiceError::InsufficientFunds)));

        let WithdrawalPhase::Confirming { error, .. } = request.phase() else {
            panic!("expected confirmation, got {:?}", request.phase());
        };
        assert_eq!(error.as_deref(), Some("餘額不足，請重新確認金額"));
    }

    #[test]
    fn test_reset_keeps_currency_selection() {
        let mut request = request();
        request.set_source(CryptoCurrency::Wbtc);
        request.set_target(FiatTarget::Other);
        request.set_amount("0.001");
        request.submit().unwrap();

        request.reset(Balances::parse("80", "0").unwrap());

        assert_eq!(request.phase(), &WithdrawalPhase::Editing);
        assert_eq!(request.amount_input(), "");
        assert_eq!(request.source(), CryptoCurrency::Wbtc);
        assert_eq!(request.target(), FiatTarget::Other);
        assert!(request.available().is_zero());
    }

    #[test]
    fn test_fiat_preview() {
        let mut request = request();
        assert_eq!(request.fiat_preview(), None);

        request.set_amount("100");
        assert_eq!(request.fiat_preview().map(|f| f.value()), Some(3130));

        request.set_source(CryptoCurrency::Wbtc);
        request.set_amount("0.01");
        assert_eq!(
            request.fiat_preview().map(|f| f.to_grouped_string()),
            Some("28,500".to_string())
        );
    }
}
