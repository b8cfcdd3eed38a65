use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

const QUALIFIER: &str = ""; // Typically empty on macOS and Linux
const ORGANIZATION: &str = "";
const APPLICATION: &str = "Zone-Wallet-Tool";

/// Written to the data directory on first start so users can see what can be tuned.
const DEFAULT_ENV_FILE: &str = "\
# Simulated service latency, in milliseconds
ZONE_LOOKUP_DELAY_MS=1000
ZONE_SEND_CODE_DELAY_MS=1000
ZONE_VERIFY_DELAY_MS=1500
ZONE_WITHDRAW_DELAY_MS=1000

# Demo balances
ZONE_USDT_BALANCE=50
ZONE_WBTC_BALANCE=0.01

ZONE_TUTORIAL_URL=https://zone.example/tasks
# light, dark or system
ZONE_THEME=system
# ZONE_CJK_FONT_PATH=/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc
";

pub fn app_user_data_dir_path() -> Result<PathBuf, std::io::Error> {
    let proj_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Failed to determine project directories",
        )
    })?;
    Ok(proj_dirs.config_dir().to_path_buf())
}

pub fn create_app_user_data_directory_if_not_exists() -> Result<(), std::io::Error> {
    let app_data_dir = app_user_data_dir_path()?;
    fs::create_dir_all(&app_data_dir)?;

    // Verify directory permissions
    let metadata = fs::metadata(&app_data_dir)?;
    if !metadata.is_dir() {
        return Err(std::io::Error::other("Created path is not a directory"));
    }
    Ok(())
}

pub fn app_user_data_file_path(filename: &str) -> Result<PathBuf, std::io::Error> {
    if filename.is_empty() || filename.contains(std::path::is_separator) {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Invalid filename",
        ));
    }
    let app_data_dir = app_user_data_dir_path()?;
    Ok(app_data_dir.join(filename))
}

pub fn write_default_env_file_if_not_exists() -> Result<(), std::io::Error> {
    let env_file = app_user_data_file_path(".env")?;
    if !env_file.is_file() {
        fs::write(&env_file, DEFAULT_ENV_FILE)?;
        tracing::info!(path = ?env_file, "Created default .env file");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_path_rejects_separators() {
        assert!(app_user_data_file_path("").is_err());
        assert!(app_user_data_file_path("logs/zone.log").is_err());
    }

    #[test]
    fn test_default_env_file_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, DEFAULT_ENV_FILE).unwrap();

        let config = crate::config::Config::from_env_file(&path).unwrap();
        assert_eq!(config, crate::config::Config::default());
    }
}
