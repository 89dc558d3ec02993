use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{DEFAULT_AREA_ID, DEFAULT_COMPRESS_MAX_WIDTH, DEFAULT_COMPRESS_QUALITY};

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

fn default_compress_max_width() -> u32 {
    DEFAULT_COMPRESS_MAX_WIDTH
}

fn default_compress_quality() -> u8 {
    DEFAULT_COMPRESS_QUALITY
}

fn default_area() -> String {
    DEFAULT_AREA_ID.to_string()
}

/// Application configuration persisted to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfigData {
    /// Audit document; platform data dir when unset
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Where flattened exports go
    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    /// Where compressed photos are kept
    #[serde(default)]
    pub photo_dir: Option<PathBuf>,

    /// Added photos wider than this are downscaled
    #[serde(default = "default_compress_max_width")]
    pub compress_max_width: u32,

    /// JPEG quality for compressed photos
    #[serde(default = "default_compress_quality")]
    pub compress_quality: u8,

    /// Area new photos are filed under
    #[serde(default = "default_area")]
    pub default_area: String,

    #[serde(default)]
    pub technician_name: String,
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            store_path: None,
            export_dir: None,
            photo_dir: None,
            compress_max_width: default_compress_max_width(),
            compress_quality: default_compress_quality(),
            default_area: default_area(),
            technician_name: String::new(),
        }
    }
}

impl AppConfigData {
    pub fn store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(crate::paths::default_store_file)
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(crate::paths::default_export_dir)
    }

    pub fn photo_dir(&self) -> PathBuf {
        self.photo_dir
            .clone()
            .unwrap_or_else(crate::paths::default_photo_dir)
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: get_config_path(),
            dirty: false,
        }
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to change where exports are written
#[derive(Message)]
pub struct SetExportDirRequest {
    pub path: PathBuf,
}

/// Get the path to the config file (platform-appropriate location)
fn get_config_path() -> PathBuf {
    crate::paths::config_file()
}

/// Result of loading config from disk
struct LoadConfigResult {
    data: AppConfigData,
    /// Error message if config was reset to defaults due to an error
    reset_reason: Option<String>,
}

fn parse_config(json: &str) -> Result<AppConfigData, serde_json::Error> {
    serde_json::from_str(json)
}

/// Load configuration from disk
fn load_config(config_path: &std::path::Path) -> LoadConfigResult {
    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(config_path) {
            Ok(json) => match parse_config(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", config_path);
                    (data, None)
                }
                Err(e) => {
                    warn!("Failed to parse config file: {}", e);
                    (
                        AppConfigData::default(),
                        Some(format!("Configuration file was corrupted: {}", e)),
                    )
                }
            },
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (AppConfigData::default(), None)
    };

    LoadConfigResult { data, reset_reason }
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    if let Err(e) = crate::paths::ensure_directories() {
        warn!("Failed to create data directories: {}", e);
    }

    let result = load_config(&config.config_path);
    config.data = result.data;
    config.dirty = false;

    // Set notification if config was reset due to an error
    if let Some(reason) = result.reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

fn set_export_dir_system(
    mut events: MessageReader<SetExportDirRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.export_dir = Some(event.path.clone());
        config.dirty = true;
        save_events.write(SaveConfigRequest);
        info!("Exports will be written to {:?}", event.path);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<SetExportDirRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    set_export_dir_system.run_if(on_message::<SetExportDirRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_data_default() {
        let data = AppConfigData::default();
        assert!(data.store_path.is_none());
        assert_eq!(data.compress_max_width, 1200);
        assert_eq!(data.compress_quality, 82);
        assert_eq!(data.default_area, "general");
        assert!(data.technician_name.is_empty());
    }

    #[test]
    fn test_app_config_data_serialization() {
        let data = AppConfigData {
            store_path: Some(PathBuf::from("/audits/smith.json")),
            export_dir: Some(PathBuf::from("/exports")),
            photo_dir: None,
            compress_max_width: 800,
            compress_quality: 70,
            default_area: "toilet".to_string(),
            technician_name: "Sam".to_string(),
        };

        let json = serde_json::to_string(&data).unwrap();
        let parsed: AppConfigData = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, data);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed = parse_config(r#"{"technician_name": "Sam"}"#).unwrap();
        assert_eq!(parsed.technician_name, "Sam");
        assert_eq!(parsed.compress_max_width, DEFAULT_COMPRESS_MAX_WIDTH);
        assert_eq!(parsed.default_area, DEFAULT_AREA_ID);
    }

    #[test]
    fn test_unset_dirs_fall_back_to_data_dir() {
        let data = AppConfigData::default();
        assert_eq!(data.photo_dir(), crate::paths::default_photo_dir());
        assert_eq!(data.store_path(), crate::paths::default_store_file());

        let custom = AppConfigData {
            export_dir: Some(PathBuf::from("/tmp/out")),
            ..Default::default()
        };
        assert_eq!(custom.export_dir(), PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_corrupt_config_resets_with_reason() {
        let path = std::env::temp_dir().join(format!("eyeagle-config-{}.json", uuid::Uuid::now_v7()));
        std::fs::write(&path, "{ broken").unwrap();

        let result = load_config(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(result.data, AppConfigData::default());
        assert!(result.reset_reason.unwrap().contains("corrupted"));
    }

    #[test]
    fn test_missing_config_uses_defaults_silently() {
        let path = std::env::temp_dir().join(format!("eyeagle-config-{}.json", uuid::Uuid::now_v7()));
        let result = load_config(&path);
        assert_eq!(result.data, AppConfigData::default());
        assert!(result.reset_reason.is_none());
    }
}
