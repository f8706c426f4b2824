//! スマートイコール設定
//!
//! 代入演算子とトリガーキーの組、設定ファイルの読み込み、有効化時の設定スタック

use crate::error::{ConfigError, Result, SmartEqualsError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 既定の代入演算子（前後に空白を含む）
pub const DEFAULT_ASSIGNMENT_TOKEN: &str = " <- ";
/// 既定のトリガーキー
pub const DEFAULT_TRIGGER_KEY: char = '=';

const CONFIG_DIR_NAME: &str = "altre";
const CONFIG_FILE_NAME: &str = "smart-equals.json";

/// 代入演算子とトリガーキーの組
///
/// 代入演算子は空であってはならない。構築時に検証されるため、
/// この型の値は常に有効な設定を表す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct SmartEqualsConfig {
    assignment_token: String,
    trigger_key: char,
}

#[derive(Deserialize)]
struct RawConfig {
    #[serde(default = "default_token")]
    assignment_token: String,
    #[serde(default = "default_trigger_key")]
    trigger_key: char,
}

fn default_token() -> String {
    DEFAULT_ASSIGNMENT_TOKEN.to_string()
}

fn default_trigger_key() -> char {
    DEFAULT_TRIGGER_KEY
}

impl TryFrom<RawConfig> for SmartEqualsConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> std::result::Result<Self, Self::Error> {
        Self::new(raw.assignment_token, raw.trigger_key)
    }
}

impl SmartEqualsConfig {
    /// 検証付きで設定を作成
    pub fn new(
        assignment_token: impl Into<String>,
        trigger_key: char,
    ) -> std::result::Result<Self, ConfigError> {
        let assignment_token = assignment_token.into();
        if assignment_token.is_empty() {
            return Err(ConfigError::EmptyAssignmentToken);
        }
        if trigger_key.is_whitespace() || trigger_key.is_control() {
            return Err(ConfigError::InvalidTriggerKey { key: trigger_key });
        }
        Ok(Self {
            assignment_token,
            trigger_key,
        })
    }

    pub fn assignment_token(&self) -> &str {
        &self.assignment_token
    }

    pub fn trigger_key(&self) -> char {
        self.trigger_key
    }

    /// 代入演算子の文字数（先読み・後読みの長さ）
    pub fn token_len(&self) -> usize {
        self.assignment_token.chars().count()
    }

    /// 先頭の空白1文字を取り除いた設定を返す
    ///
    /// 空白のみの演算子（`" "`）は空になるため、そのまま残す。
    pub fn with_leading_space_stripped(&self) -> Self {
        match self.assignment_token.strip_prefix(' ') {
            Some(rest) if !rest.is_empty() => Self {
                assignment_token: rest.to_string(),
                trigger_key: self.trigger_key,
            },
            _ => self.clone(),
        }
    }

    /// トリガーキーを差し替えた設定を返す
    pub fn with_trigger_key(&self, trigger_key: char) -> std::result::Result<Self, ConfigError> {
        Self::new(self.assignment_token.clone(), trigger_key)
    }

    /// JSON設定ファイルから読み込む
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            SmartEqualsError::from(ConfigError::InvalidFile {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?;
        log::debug!(
            "loaded smart-equals config from {}: token={:?} key={:?}",
            path.display(),
            config.assignment_token,
            config.trigger_key
        );
        Ok(config)
    }

    /// 設定ファイルを読み込む。ファイルが無ければ既定値
    ///
    /// `path` が `None` の場合は既定の設定パスを使う。`~` と環境変数は展開される。
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        let resolved = match path {
            Some(path) => Some(expand_path(path)?),
            None => default_config_path(),
        };

        match resolved {
            Some(path) if path.is_file() => Self::load_from_path(&path),
            Some(path) => {
                log::debug!("no smart-equals config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => {
                log::warn!("config directory unavailable, using default smart-equals config");
                Ok(Self::default())
            }
        }
    }

    /// JSON設定ファイルへ書き出す
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            SmartEqualsError::from(ConfigError::InvalidFile {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl Default for SmartEqualsConfig {
    fn default() -> Self {
        Self {
            assignment_token: DEFAULT_ASSIGNMENT_TOKEN.to_string(),
            trigger_key: DEFAULT_TRIGGER_KEY,
        }
    }
}

/// 既定の設定ファイルパス（`<config_dir>/altre/smart-equals.json`）
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// `~` と環境変数を展開
pub fn expand_path(path: &str) -> Result<PathBuf> {
    match shellexpand::full(path) {
        Ok(expanded) => Ok(PathBuf::from(expanded.as_ref())),
        Err(e) => Err(ConfigError::PathExpansion {
            path: path.to_string(),
            message: e.to_string(),
        }
        .into()),
    }
}

/// 設定スタック
///
/// 基底の設定は取り除けない。モードの有効化で積み、無効化で降ろす。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStack {
    base: SmartEqualsConfig,
    overrides: Vec<SmartEqualsConfig>,
}

impl ConfigStack {
    pub fn new(base: SmartEqualsConfig) -> Self {
        Self {
            base,
            overrides: Vec::new(),
        }
    }

    /// 現在有効な設定
    pub fn current(&self) -> &SmartEqualsConfig {
        self.overrides.last().unwrap_or(&self.base)
    }

    pub fn push(&mut self, config: SmartEqualsConfig) {
        self.overrides.push(config);
    }

    /// 最上段の設定を降ろす。基底のみの場合は `None`
    pub fn pop(&mut self) -> Option<SmartEqualsConfig> {
        self.overrides.pop()
    }

    /// 積まれている設定の数（基底を含む）
    pub fn depth(&self) -> usize {
        self.overrides.len() + 1
    }
}

impl Default for ConfigStack {
    fn default() -> Self {
        Self::new(SmartEqualsConfig::default())
    }
}
