//! 構文支援モジュール
//!
//! 文字列・コメント判定と言語判定

pub mod language;
pub mod scanner;

pub use language::{Language, LanguageDetector};
pub use scanner::{inside_string_or_comment, LexState};
