use crate::zone_harness::ZoneHarness;

/// The app starts on the wallet screen with both modals closed.
#[test]
fn test_app_startup() {
    let mut harness = ZoneHarness::new();
    harness.step();

    assert!(harness.has_label("尚未綁定 ZONE 帳號"));
    assert!(harness.has_label("綁定 ZONE 帳號"));
    assert!(harness.has_label("出金"));
    assert!(!harness.state().wallet_screen.binding_wizard.is_open());
    assert!(!harness.state().wallet_screen.withdrawal_modal.is_open());
}
