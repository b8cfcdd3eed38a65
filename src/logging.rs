use std::panic;
use std::path::Path;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Logs to `log_path`, at `info` unless `RUST_LOG` says otherwise.
pub fn initialize_logger(log_path: &Path) -> Result<(), std::io::Error> {
    let log_file = std::fs::File::create(log_path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).map_err(std::io::Error::other)?;

    // Log panics
    let default_panic_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let payload = panic_info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("unknown");

        let location = panic_info
            .location()
            .unwrap_or_else(|| panic::Location::caller());

        error!(
            location = tracing::field::display(location),
            "Panic occurred: {}", message
        );

        default_panic_hook(panic_info);
    }));

    tracing::info!(path = ?log_path, "Logger initialized successfully");
    Ok(())
}
