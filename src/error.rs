//! エラーハンドリング
//!
//! smart-equals 全体で使用されるエラー型を定義
//! 判定処理そのものは失敗しない。失敗し得るのは設定とホスト側のバッファ操作のみ

use thiserror::Error;

/// クレート全体のエラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SmartEqualsError {
    /// 設定エラー
    #[error("Configuration error")]
    Config(#[from] ConfigError),

    /// バッファ操作エラー
    #[error("Buffer operation failed")]
    Buffer(#[from] BufferError),

    /// 入出力エラー
    #[error("IO error: {message}")]
    Io { message: String },
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Assignment token must not be empty")]
    EmptyAssignmentToken,

    #[error("Invalid trigger key: {key:?}")]
    InvalidTriggerKey { key: char },

    #[error("Invalid configuration file {path}: {message}")]
    InvalidFile { path: String, message: String },

    #[error("Cannot expand path {path}: {message}")]
    PathExpansion { path: String, message: String },
}

/// バッファ操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("Invalid cursor position: {position}")]
    InvalidCursorPosition { position: usize },

    #[error("Cannot delete {requested} chars before cursor, only {available} in editable region")]
    RegionStart { requested: usize, available: usize },
}

impl SmartEqualsError {
    /// ユーザー向けの短いメッセージ
    pub fn user_message(&self) -> String {
        match self {
            SmartEqualsError::Config(ConfigError::EmptyAssignmentToken) => {
                "代入演算子が空です".to_string()
            }
            SmartEqualsError::Config(ConfigError::InvalidTriggerKey { key }) => {
                format!("トリガーキーとして使用できません: {:?}", key)
            }
            SmartEqualsError::Config(ConfigError::InvalidFile { path, .. }) => {
                format!("設定ファイルを読み込めません: {}", path)
            }
            SmartEqualsError::Buffer(BufferError::RegionStart { .. }) => {
                "編集可能領域の先頭です".to_string()
            }
            _ => format!("エラーが発生しました: {}", self),
        }
    }
}

impl From<std::io::Error> for SmartEqualsError {
    fn from(error: std::io::Error) -> Self {
        SmartEqualsError::Io { message: error.to_string() }
    }
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, SmartEqualsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_into_top_level() {
        let error: SmartEqualsError = ConfigError::EmptyAssignmentToken.into();
        assert_eq!(error, SmartEqualsError::Config(ConfigError::EmptyAssignmentToken));
        assert!(error.user_message().contains("代入演算子"));
    }

    #[test]
    fn io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        match SmartEqualsError::from(io) {
            SmartEqualsError::Io { message } => assert!(message.contains("missing")),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }
}
