use crate::error::{LabError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const LATENCY_ENV: &str = "MONKEY_LAB_LATENCY_MS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 模擬推論の待ち時間（ミリ秒）
    pub simulated_latency_ms: u64,
    /// プレビュー用一時ファイルの置き場所
    pub preview_dir: Option<PathBuf>,
    /// 固定シード（再現用）
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulated_latency_ms: monkey_lab_common::SIMULATED_LATENCY.as_millis() as u64,
            preview_dir: None,
            seed: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| LabError::Config("홈 디렉터리를 찾을 수 없어요".into()))?;
        Ok(home.join(".config").join("monkey-lab").join("config.json"))
    }

    /// 待ち時間（環境変数を優先）
    pub fn latency(&self) -> Result<Duration> {
        match std::env::var(LATENCY_ENV) {
            Ok(value) => {
                let ms: u64 = value.trim().parse().map_err(|_| {
                    LabError::Config(format!("{} 값이 숫자가 아니에요: {}", LATENCY_ENV, value))
                })?;
                Ok(Duration::from_millis(ms))
            }
            Err(_) => Ok(Duration::from_millis(self.simulated_latency_ms)),
        }
    }

    pub fn preview_dir(&self) -> PathBuf {
        self.preview_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("monkey-lab-previews"))
    }
}
