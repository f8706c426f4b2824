//! 入力処理モジュール
//!
//! キーイベントからスマートイコールの動作への変換

pub mod keybinding;

pub use keybinding::{Action, Key, KeyCode, KeyModifiers, KeyProcessResult, SmartEqualsKeyMap};
