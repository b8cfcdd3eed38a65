use egui_kittest::Harness;
use egui_kittest::kittest::Queryable;
use std::sync::{Arc, Once};
use std::time::{Duration, Instant};
use zone_wallet_tool::app::AppState;
use zone_wallet_tool::config::Config;
use zone_wallet_tool::context::AppContext;
use zone_wallet_tool::service::mock::{MockLatency, MockZoneService};
use zone_wallet_tool::ui::theme::ThemeMode;

static LOGGING: Once = Once::new();

/// Test helper for driving the Zone Wallet Tool app through egui_kittest.
///
/// The app runs on a mock service without latency; backend tasks run on the
/// harness' own Tokio runtime.
pub struct ZoneHarness<'a> {
    pub kittest: Harness<'a, AppState>,
    // Dropped after the harness, so pending tasks can still be spawned on exit.
    _guard: tokio::runtime::EnterGuard<'static>,
}

impl ZoneHarness<'_> {
    pub fn new() -> Self {
        Self::with_service(MockZoneService::new(MockLatency::zero()))
    }

    pub fn with_service(service: MockZoneService) -> Self {
        Self::setup_logging();

        let runtime: &'static tokio::runtime::Runtime = Box::leak(Box::new(
            tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .expect("Failed to create Tokio runtime"),
        ));
        let guard = runtime.enter();

        let config = Config {
            theme: ThemeMode::Light,
            ..Config::default()
        };
        let app_context =
            AppContext::with_service(config, Arc::new(service)).expect("default config is valid");

        let mut kittest = Harness::builder()
            .with_size(egui::vec2(800.0, 700.0))
            .with_max_steps(100)
            .build_eframe(|ctx| AppState::with_context(ctx.egui_ctx.clone(), app_context));
        kittest.step();

        Self {
            kittest,
            _guard: guard,
        }
    }

    fn setup_logging() {
        LOGGING.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter("error,zone_wallet_tool=debug")
                .with_test_writer()
                .try_init();
        });
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        self.kittest.state_mut()
    }

    pub fn state(&self) -> &AppState {
        self.kittest.state()
    }

    pub fn step(&mut self) {
        self.kittest.step();
    }

    /// Clicks the node labelled `label` once the UI has settled.
    ///
    /// Freshly opened windows fade in and ignore input until they are fully shown.
    pub fn click_by_label(&mut self, label: &str) {
        self.kittest.run();
        self.kittest.get_by_label(label).click();
        self.kittest.step();
        self.kittest.step();
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.kittest.query_by_label(label).is_some()
    }

    pub fn has_label_containing(&self, text: &str) -> bool {
        self.kittest.query_by_label_contains(text).is_some()
    }

    /// Steps the app until a node labelled `label` shows up.
    pub fn wait_for_label(&mut self, label: &str, timeout: Duration) -> Result<(), String> {
        self.wait_until(timeout, |harness| harness.has_label(label))
            .map_err(|_| format!("label {label:?} did not appear within {timeout:?}"))
    }

    /// Steps the app until `condition` holds; backend results arrive asynchronously.
    pub fn wait_until<F>(&mut self, timeout: Duration, condition: F) -> Result<(), ()>
    where
        F: Fn(&Self) -> bool,
    {
        let deadline = Instant::now() + timeout;
        loop {
            self.kittest.step();
            if condition(self) {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(());
            }
            std::thread::sleep(Duration::from_millis(10));
        }
    }
}
