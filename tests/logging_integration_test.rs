//! Integration tests for logging functionality
//!
//! The global subscriber can only be installed once per process, so a
//! single test owns `init_logging` with file output enabled.

use bizzsummit::config::{parse_config, LoggingConfig};
use bizzsummit::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
    assert!(!config.json_console);
}

#[test]
fn test_invalid_level_is_rejected_before_install() {
    let result = init_logging("verbose", &LoggingConfig::default());
    let err = result.err().unwrap();
    assert!(err.to_string().contains("Invalid log level"));
}

#[test]
fn test_logging_rotation_types() {
    for rotation in ["daily", "hourly", "never"] {
        let toml = format!(
            r#"
[auth]
enabled = false

[logging]
local_rotation = "{rotation}"
"#
        );
        let config = parse_config(&toml).unwrap();
        assert_eq!(config.logging.local_rotation, rotation);
    }

    let err = parse_config(
        r#"
[auth]
enabled = false

[logging]
local_rotation = "size"
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("local_rotation"));
}

#[test]
fn test_file_logging_creates_directory_and_file() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");
    assert!(!log_path.exists());

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
        json_console: true,
    };

    let guard = init_logging("debug", &config).unwrap();
    bizzsummit::log_provision_outcome!("bookings", "BizzSummit", "Bookings", true, 1);
    drop(guard);

    assert!(log_path.is_dir());
    assert!(log_path.join("bizzsummit.log").exists());
}
