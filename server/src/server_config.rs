use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::games::tictactoe::{
    DEFAULT_COMPUTER_MOVE_DELAY, DEFAULT_ROUND_RESET_DELAY, TicTacToeSessionSettings,
};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "tictactoe_server_config.yaml";
const MAX_DELAY_MS: u64 = 60_000;

fn default_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(
    path: Option<&Path>,
) -> ConfigManager<FileContentConfigProvider, ServerConfig, YamlConfigSerializer> {
    match path {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(default_config_path()),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub listen_address: String,
    #[serde(default)]
    pub static_files_path: Option<String>,
    #[serde(default)]
    pub seed: Option<u64>,
    pub computer_move_delay_ms: u64,
    pub round_reset_delay_ms: u64,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        self.listen_address
            .parse()
            .map_err(|e| format!("Invalid listen address '{}': {}", self.listen_address, e))
    }

    pub fn session_settings(&self) -> TicTacToeSessionSettings {
        TicTacToeSessionSettings {
            computer_move_delay: Duration::from_millis(self.computer_move_delay_ms),
            round_reset_delay: Duration::from_millis(self.round_reset_delay_ms),
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        self.socket_addr()?;
        if self.computer_move_delay_ms > MAX_DELAY_MS {
            return Err(format!(
                "Computer move delay must be at most {} ms, got {}",
                MAX_DELAY_MS, self.computer_move_delay_ms
            ));
        }
        if self.round_reset_delay_ms == 0 || self.round_reset_delay_ms > MAX_DELAY_MS {
            return Err(format!(
                "Round reset delay must be between 1 and {} ms, got {}",
                MAX_DELAY_MS, self.round_reset_delay_ms
            ));
        }
        if let Some(path) = &self.static_files_path
            && path.trim().is_empty()
        {
            return Err("Static files path must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: "0.0.0.0:5000".to_string(),
            static_files_path: None,
            seed: None,
            computer_move_delay_ms: DEFAULT_COMPUTER_MOVE_DELAY.as_millis() as u64,
            round_reset_delay_ms: DEFAULT_ROUND_RESET_DELAY.as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::{ConfigContentProvider, ConfigSerializer};

    fn get_temp_file_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_tictactoe_server_config_{}.yaml", random_number));
        path
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ServerConfig::default().validate().is_ok());
        assert_eq!(
            ServerConfig::default().session_settings(),
            TicTacToeSessionSettings::default()
        );
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = ServerConfig::default();
        let serializer = YamlConfigSerializer::new();
        let serialized = serializer.serialize(&default_config).unwrap();
        let deserialized: ServerConfig = serializer.deserialize(&serialized).unwrap();
        assert_eq!(default_config, deserialized);
    }

    #[test]
    fn test_config_can_be_saved_and_loaded_through_manager() {
        let config = ServerConfig {
            seed: Some(42),
            static_files_path: Some("ui".to_string()),
            ..ServerConfig::default()
        };
        let file_path = get_temp_file_path();
        let manager: ConfigManager<_, ServerConfig, _> =
            ConfigManager::new(FileContentConfigProvider::new(&file_path), YamlConfigSerializer::new());

        manager.set_config(&config).unwrap();
        assert_eq!(manager.get_config().unwrap(), config);

        let fresh: ConfigManager<_, ServerConfig, _> = ConfigManager::from_yaml_file(&file_path);
        assert_eq!(fresh.get_config().unwrap(), config);

        let _ = std::fs::remove_file(&file_path);
    }

    #[test]
    fn test_config_file_does_not_exist_returns_default_config() {
        let manager = get_config_manager(Some(Path::new("this_file_does_not_exist.yaml")));
        assert_eq!(manager.get_config().unwrap(), ServerConfig::default());
    }

    #[test]
    fn test_optional_fields_may_be_omitted() {
        let yaml = "listen_address: 127.0.0.1:8080\ncomputer_move_delay_ms: 100\nround_reset_delay_ms: 200\n";
        let serializer = YamlConfigSerializer::new();
        let config: ServerConfig = serializer.deserialize(yaml).unwrap();
        assert_eq!(config.seed, None);
        assert_eq!(config.static_files_path, None);
        assert_eq!(config.session_settings().computer_move_delay, Duration::from_millis(100));
    }

    #[test]
    fn test_invalid_configs_are_rejected() {
        let bad_address = ServerConfig {
            listen_address: "not an address".to_string(),
            ..ServerConfig::default()
        };
        assert!(bad_address.validate().is_err());

        let zero_reset = ServerConfig {
            round_reset_delay_ms: 0,
            ..ServerConfig::default()
        };
        assert!(zero_reset.validate().is_err());

        let huge_delay = ServerConfig {
            computer_move_delay_ms: MAX_DELAY_MS + 1,
            ..ServerConfig::default()
        };
        assert!(huge_delay.validate().is_err());

        let blank_static = ServerConfig {
            static_files_path: Some("  ".to_string()),
            ..ServerConfig::default()
        };
        assert!(blank_static.validate().is_err());
    }

    #[test]
    fn test_invalid_file_content_is_reported() {
        let file_path = get_temp_file_path();
        let provider = FileContentConfigProvider::new(&file_path);
        provider
            .set_config_content("listen_address: nowhere\ncomputer_move_delay_ms: 1\nround_reset_delay_ms: 1\n")
            .unwrap();
        let manager: ConfigManager<_, ServerConfig, _> = ConfigManager::from_yaml_file(&file_path);
        let error = manager.get_config().unwrap_err();
        assert!(error.contains("Config validation error"), "{}", error);
        let _ = std::fs::remove_file(&file_path);
    }
}
