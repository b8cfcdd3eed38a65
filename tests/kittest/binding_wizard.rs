use crate::zone_harness::ZoneHarness;
use std::time::Duration;
use zone_wallet_tool::model::binding::BindingStep;
use zone_wallet_tool::service::ServiceError;
use zone_wallet_tool::service::mock::{
    MOCK_MASKED_PHONE, MockLatency, MockZoneService, ServiceCall,
};

const TIMEOUT: Duration = Duration::from_secs(5);

/// When I open the binding wizard and enter a valid UID,
/// When I confirm my contact details and enter the code I received,
/// Then the wallet screen shows the bound UID.
#[test]
fn test_bind_account() {
    let mut harness = ZoneHarness::new();

    harness.click_by_label("綁定 ZONE 帳號");
    assert!(harness.state().wallet_screen.binding_wizard.is_open());
    assert!(harness.has_label("驗證你的帳號"));

    harness
        .state_mut()
        .wallet_screen
        .binding_wizard
        .session_mut()
        .set_uid("ABC1234567".to_string());
    harness.step();
    harness.click_by_label("下一步");

    harness
        .wait_for_label("確認你的聯絡資訊", TIMEOUT)
        .expect("contact step");
    assert!(harness.has_label(MOCK_MASKED_PHONE));

    harness.click_by_label("確認並發送驗證碼");
    harness
        .wait_for_label("輸入驗證碼", TIMEOUT)
        .expect("code step");
    assert!(harness.has_label_containing("重新發送 ("));

    harness
        .state_mut()
        .wallet_screen
        .binding_wizard
        .session_mut()
        .set_otp("123456");
    harness.step();
    harness.click_by_label("確認驗證");

    harness
        .wait_for_label("驗證成功！", TIMEOUT)
        .expect("success step");
    harness.click_by_label("前往提領");

    assert!(!harness.state().wallet_screen.binding_wizard.is_open());
    assert!(harness.state().wallet_screen.withdrawal_modal.is_open());
    let bound = harness
        .state()
        .wallet_screen
        .bound_account
        .as_ref()
        .map(|account| account.uid.clone());
    assert_eq!(bound.as_deref(), Some("ABC1234567"));
    assert!(harness.has_label("已綁定 ZONE UID：ABC1234567"));
}

/// A UID that is too short never reaches the service.
#[test]
fn test_short_uid_is_rejected() {
    let mut harness = ZoneHarness::new();

    harness.click_by_label("綁定 ZONE 帳號");
    harness
        .state_mut()
        .wallet_screen
        .binding_wizard
        .session_mut()
        .set_uid("ABC".to_string());
    harness.step();
    harness.click_by_label("下一步");

    let session = harness.state().wallet_screen.binding_wizard.session();
    assert_eq!(session.step(), BindingStep::CollectUid);
    assert!(!session.is_pending());
    assert!(session.error_message().is_some());
}

/// When the service does not know the UID, the wizard stays on the first step
/// and shows the service's message.
#[test]
fn test_unknown_uid_shows_error() {
    let service = MockZoneService::new(MockLatency::zero())
        .fail_with(ServiceCall::LookupUid, ServiceError::UidNotFound);
    let mut harness = ZoneHarness::with_service(service);

    harness.click_by_label("綁定 ZONE 帳號");
    harness
        .state_mut()
        .wallet_screen
        .binding_wizard
        .session_mut()
        .set_uid("ABC1234567".to_string());
    harness.step();
    harness.click_by_label("下一步");

    harness
        .wait_for_label(&ServiceError::UidNotFound.to_string(), TIMEOUT)
        .expect("lookup error");
    let session = harness.state().wallet_screen.binding_wizard.session();
    assert_eq!(session.step(), BindingStep::CollectUid);
    assert!(!session.is_pending());
}

/// "This is not me" goes back to an empty UID step.
#[test]
fn test_not_me_returns_to_uid() {
    let mut harness = ZoneHarness::new();

    harness.click_by_label("綁定 ZONE 帳號");
    harness
        .state_mut()
        .wallet_screen
        .binding_wizard
        .session_mut()
        .set_uid("ABC1234567".to_string());
    harness.step();
    harness.click_by_label("下一步");
    harness
        .wait_for_label("確認你的聯絡資訊", TIMEOUT)
        .expect("contact step");

    harness.click_by_label("這不是我");

    let session = harness.state().wallet_screen.binding_wizard.session();
    assert_eq!(session.step(), BindingStep::CollectUid);
    assert!(session.uid().is_empty());
    assert!(session.masked_contact().is_none());
    assert!(harness.has_label("驗證你的帳號"));
}

/// Cancelling closes the wizard; opening it again starts from scratch.
#[test]
fn test_cancel_resets_wizard() {
    let mut harness = ZoneHarness::new();

    harness.click_by_label("綁定 ZONE 帳號");
    harness
        .state_mut()
        .wallet_screen
        .binding_wizard
        .session_mut()
        .set_uid("ABC1234567".to_string());
    harness.step();
    harness.click_by_label("取消");
    assert!(!harness.state().wallet_screen.binding_wizard.is_open());

    harness.click_by_label("綁定 ZONE 帳號");
    let session = harness.state().wallet_screen.binding_wizard.session();
    assert_eq!(session.step(), BindingStep::CollectUid);
    assert!(session.uid().is_empty());
}
