use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::angle::DEFAULT_MAX_YAW_DEG;
use crate::error::CatalogError;
use crate::joint::JointSpec;
use crate::pose::DEFAULT_VISIBILITY_THRESHOLD;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub log: LogConfig,
    /// 組み込みカタログに追加する関節定義
    #[serde(default)]
    pub joints: Vec<JointSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// この値を超える信頼度のランドマークのみ可視
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f32,
    /// ヨー比率 1.0 に対応する角度（度）
    #[serde(default = "default_max_yaw_deg")]
    pub max_yaw_deg: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 画面幅（ピクセル）
    #[serde(default = "default_width")]
    pub width: u32,
    /// 画面高さ（ピクセル）
    #[serde(default = "default_height")]
    pub height: u32,
    /// 起動時に選択する関節ID
    #[serde(default = "default_joint")]
    pub default_joint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_output")]
    pub output_path: String,
    #[serde(default)]
    pub patient_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// RUST_LOG 未設定時のフィルタ
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_visibility_threshold() -> f32 { DEFAULT_VISIBILITY_THRESHOLD }
fn default_max_yaw_deg() -> f32 { DEFAULT_MAX_YAW_DEG }
fn default_width() -> u32 { 640 }
fn default_height() -> u32 { 480 }
fn default_joint() -> String { "leftElbow".to_string() }
fn default_report_output() -> String { "session_report.json".to_string() }
fn default_log_level() -> String { "info".to_string() }

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: default_visibility_threshold(),
            max_yaw_deg: default_max_yaw_deg(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), CatalogError> {
        let threshold = self.visibility_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(CatalogError::EngineSetting {
                field: "visibility_threshold",
                value: threshold,
                expected: "a value in [0, 1]",
            });
        }
        if !self.max_yaw_deg.is_finite() || self.max_yaw_deg <= 0.0 {
            return Err(CatalogError::EngineSetting {
                field: "max_yaw_deg",
                value: self.max_yaw_deg,
                expected: "a finite positive angle",
            });
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            default_joint: default_joint(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: default_report_output(),
            patient_name: String::new(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config
            .engine
            .validate()
            .with_context(|| format!("Invalid [engine] section in {}", path.display()))?;
        Ok(config)
    }

    /// ファイルがなければデフォルト設定。壊れた設定はエラー
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
