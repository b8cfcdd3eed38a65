use std::env;
use zone_wallet_tool::app::AppState;
use zone_wallet_tool::app_dir::{
    app_user_data_dir_path, create_app_user_data_directory_if_not_exists,
    write_default_env_file_if_not_exists,
};
use zone_wallet_tool::logging::initialize_logger;

fn main() -> eframe::Result<()> {
    create_app_user_data_directory_if_not_exists()
        .expect("Failed to create app user_data directory");
    let app_data_dir =
        app_user_data_dir_path().expect("Failed to get app user_data directory path");
    initialize_logger(&app_data_dir.join("zone-wallet-tool.log"))
        .expect("Failed to initialize logger");
    if let Err(e) = write_default_env_file_if_not_exists() {
        tracing::warn!(error = %e, "could not write default .env file");
    }

    // Initialize the Tokio runtime
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .expect("multi-threading runtime cannot be initialized");
    let _guard = runtime.enter();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 640.0])
            .with_min_inner_size([420.0, 560.0]),
        persist_window: true, // Persist window size and position
        centered: true,       // Center window on startup if not maximized
        persistence_path: Some(app_data_dir.join("app.ron")),
        ..Default::default()
    };
    let version = env!("CARGO_PKG_VERSION");
    eframe::run_native(
        &format!("Zone Wallet Tool v{}", version),
        native_options,
        Box::new(|cc| Ok(Box::new(AppState::new(cc.egui_ctx.clone())?))),
    )
}
