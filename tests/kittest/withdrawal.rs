use crate::zone_harness::ZoneHarness;
use std::time::Duration;
use zone_wallet_tool::model::withdrawal::{WithdrawalPhase, WithdrawalValidationError};
use zone_wallet_tool::service::ServiceError;
use zone_wallet_tool::service::mock::{MockLatency, MockZoneService, ServiceCall};

const TIMEOUT: Duration = Duration::from_secs(5);

fn open_with_amount(harness: &mut ZoneHarness<'_>, amount: &str) {
    harness.click_by_label("出金");
    assert!(harness.state().wallet_screen.withdrawal_modal.is_open());
    assert!(harness.has_label("出金操作"));

    harness
        .state_mut()
        .wallet_screen
        .withdrawal_modal
        .request_mut()
        .set_amount(amount);
    harness.step();
}

/// An amount below the minimum stays on the form with an error message.
#[test]
fn test_amount_below_minimum() {
    let mut harness = ZoneHarness::new();
    open_with_amount(&mut harness, "5");

    harness.click_by_label("確認出金");

    let request = harness.state().wallet_screen.withdrawal_modal.request();
    assert_eq!(request.phase(), &WithdrawalPhase::Editing);
    assert_eq!(
        request.validation_error(),
        Some(WithdrawalValidationError::BelowMinimum)
    );
    assert!(harness.has_label(&WithdrawalValidationError::BelowMinimum.to_string()));
}

/// Text that is not a number is flagged while typing and cannot be submitted.
#[test]
fn test_non_numeric_amount() {
    let mut harness = ZoneHarness::new();
    open_with_amount(&mut harness, "abc");

    assert!(harness.has_label(&WithdrawalValidationError::NotANumber.to_string()));
    assert!(
        !harness
            .state()
            .wallet_screen
            .withdrawal_modal
            .request()
            .can_submit()
    );
}

/// When I withdraw 20 USDT and confirm,
/// Then I see the TWD estimate and, after settlement, the success message.
#[test]
fn test_withdraw_usdt() {
    let mut harness = ZoneHarness::new();
    open_with_amount(&mut harness, "20");
    assert!(harness.has_label("626"));

    harness.click_by_label("確認出金");
    assert!(harness.has_label("確認提取 20 USDT 至你的 ZoneWallet 嗎？"));
    assert!(harness.has_label("預計收到：626 TWD"));

    harness.click_by_label("確認");
    harness
        .wait_for_label("出金成功！", TIMEOUT)
        .expect("withdrawal settled");
    assert!(harness.has_label("約 626 TWD 已轉入你的錢包"));

    harness.click_by_label("完成");
    assert!(!harness.state().wallet_screen.withdrawal_modal.is_open());
}

/// Cancelling the confirmation returns to the form with the amount kept.
#[test]
fn test_cancel_confirmation_keeps_amount() {
    let mut harness = ZoneHarness::new();
    open_with_amount(&mut harness, "20");

    harness.click_by_label("確認出金");
    harness.click_by_label("取消");

    let request = harness.state().wallet_screen.withdrawal_modal.request();
    assert_eq!(request.phase(), &WithdrawalPhase::Editing);
    assert_eq!(request.amount_input(), "20");
    assert!(harness.has_label("出金操作"));
}

/// A rejected withdrawal keeps the confirmation open and shows the reason.
#[test]
fn test_rejected_withdrawal_shows_error() {
    let service = MockZoneService::new(MockLatency::zero())
        .fail_with(ServiceCall::ExecuteWithdrawal, ServiceError::ComplianceHold);
    let mut harness = ZoneHarness::with_service(service);
    open_with_amount(&mut harness, "20");

    harness.click_by_label("確認出金");
    harness.click_by_label("確認");
    harness
        .wait_for_label(&ServiceError::ComplianceHold.to_string(), TIMEOUT)
        .expect("withdrawal error");

    let request = harness.state().wallet_screen.withdrawal_modal.request();
    assert!(matches!(
        request.phase(),
        WithdrawalPhase::Confirming { error: Some(_), .. }
    ));
}
