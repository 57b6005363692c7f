use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use routerchat::config::OpenRouterConfig;
use routerchat::credentials::ApiKey;
use routerchat::providers::OpenRouterProvider;

/// Test key sent as the bearer credential to mock servers
#[allow(dead_code)]
pub const TEST_KEY: &str = "sk-or-test-key";

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Provider config pointed at a mock server
#[allow(dead_code)]
pub fn mock_config(api_base: &str) -> OpenRouterConfig {
    OpenRouterConfig {
        api_base: api_base.to_string(),
        ..Default::default()
    }
}

/// OpenRouter provider pointed at a mock server
#[allow(dead_code)]
pub fn mock_provider(config: OpenRouterConfig) -> OpenRouterProvider {
    let key = ApiKey::new(TEST_KEY).expect("test key is not blank");
    OpenRouterProvider::new(config, key).expect("failed to create provider")
}
