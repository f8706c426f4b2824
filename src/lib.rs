//! smart-equals - altre用スマートイコールキー
//!
//! `=` キーの押下を文脈に応じて `=`、`==`、代入演算子のいずれかに解決する

// コアモジュール
pub mod config;
pub mod error;
pub mod mode;

// 判定層
pub mod resolver;

// ホスト層
pub mod buffer;
pub mod host;
pub mod syntax;

// 入力層
pub mod input;

// 公開API
pub use buffer::TextBuffer;
pub use config::{ConfigStack, SmartEqualsConfig};
pub use error::{BufferError, ConfigError, Result, SmartEqualsError};
pub use host::{handle_trigger, EditorHost};
pub use mode::SmartEqualsMode;
pub use resolver::{resolve, CursorContext, EditAction, EditOp};
pub use syntax::Language;
