//! Config file loading

use std::io::Write;

use tempfile::NamedTempFile;
use uartlink_host::{ConfigError, HostConfig, Overrides};
use uartlink_protocol::DecodeConfig;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = write_config(
        r#"
        [uart]
        baudrate = 9600
        data_bits = "seven"

        [decode]
        min_frame_len = 4
        "#,
    );

    let config = HostConfig::load(file.path()).unwrap();
    assert_eq!(config.uart.baudrate, 9600);
    assert_eq!(config.decode_config(), DecodeConfig::legacy());
    assert!(config.link.echo);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = HostConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_malformed_toml() {
    let file = write_config("[uart\nbaudrate = ");
    let err = HostConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_wrong_value_type() {
    let file = write_config("[link]\necho = \"yes\"\n");
    assert!(HostConfig::load(file.path()).is_err());
}

#[test]
fn test_resolve_file_then_switches() {
    let file = write_config(
        r#"
        [uart]
        baudrate = 57600

        [link]
        echo = true
        "#,
    );

    let config = HostConfig::resolve(
        Some(file.path()),
        Overrides {
            legacy_min_len: false,
            no_echo: true,
        },
    )
    .unwrap();
    assert_eq!(config.uart.baudrate, 57600);
    assert_eq!(config.decode_config(), DecodeConfig::default());
    assert!(!config.link.echo);

    let config = HostConfig::resolve(
        Some(file.path()),
        Overrides {
            legacy_min_len: true,
            no_echo: false,
        },
    )
    .unwrap();
    assert_eq!(config.decode_config(), DecodeConfig::legacy());
    assert!(config.link.echo);
}

#[test]
fn test_resolve_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    let err = HostConfig::resolve(Some(&missing), Overrides::default()).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
