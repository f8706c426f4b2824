//! キーバインド
//!
//! crossterm のキーイベントをスマートイコールの動作に変換する。
//! `C-q` に続くトリガーキーは上書き指定付きで処理され、`=` がそのまま入る

use crate::error::Result;
use crate::host::EditorHost;
use crate::mode::SmartEqualsMode;
use crate::resolver::EditAction;
use crossterm::event::{KeyCode as CrosstermKeyCode, KeyEvent, KeyModifiers as CrosstermModifiers};

/// キー入力の内部表現
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    /// 修飾キー
    pub modifiers: KeyModifiers,
    /// 基本キー
    pub code: KeyCode,
}

/// 修飾キーの組み合わせ
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

/// 基本キーコード
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Tab,
    Esc,
    Unknown,
}

impl Key {
    /// 修飾なしの文字キー
    pub fn plain(ch: char) -> Self {
        Self {
            modifiers: KeyModifiers::default(),
            code: KeyCode::Char(ch),
        }
    }

    pub fn ctrl(ch: char) -> Self {
        Self {
            modifiers: KeyModifiers { ctrl: true, alt: false, shift: false },
            code: KeyCode::Char(ch),
        }
    }

    /// C-q（クォート挿入）
    pub fn ctrl_q() -> Self {
        Self::ctrl('q')
    }

    /// C-g（キャンセル）
    pub fn ctrl_g() -> Self {
        Self::ctrl('g')
    }

    /// 挿入可能な文字かどうかを判定
    pub fn is_insertable_char(&self) -> bool {
        matches!(self.code, KeyCode::Char(_)) && !self.modifiers.ctrl && !self.modifiers.alt
    }

    /// 挿入可能な文字キーなら文字を返す
    pub fn insertable_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(ch) if self.is_insertable_char() => Some(ch),
            _ => None,
        }
    }
}

/// crossterm統合
impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        let modifiers = KeyModifiers {
            ctrl: event.modifiers.contains(CrosstermModifiers::CONTROL),
            alt: event.modifiers.contains(CrosstermModifiers::ALT),
            shift: event.modifiers.contains(CrosstermModifiers::SHIFT),
        };

        let code = match event.code {
            CrosstermKeyCode::Char(c) => KeyCode::Char(c),
            CrosstermKeyCode::Enter => KeyCode::Enter,
            CrosstermKeyCode::Backspace => KeyCode::Backspace,
            CrosstermKeyCode::Tab => KeyCode::Tab,
            CrosstermKeyCode::Esc => KeyCode::Esc,
            _ => KeyCode::Unknown,
        };

        Key { modifiers, code }
    }
}

/// アクション定義
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// トリガーキー（raw: 上書き指定）
    SmartEquals { raw: bool },
    /// 文字挿入
    InsertChar(char),
    /// キーボードキャンセル
    KeyboardQuit,
}

/// キー処理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyProcessResult {
    /// アクション確定
    Action(Action),
    /// プレフィックス入力中
    PartialMatch,
    /// 該当なし
    NoMatch,
}

/// 部分マッチ状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum PartialMatchState {
    #[default]
    None,
    QuotedInsert,
}

/// スマートイコール用キーマップ
///
/// トリガーキーは保持しない。呼び出し側が現在のモードから渡す。
#[derive(Debug, Clone, Default)]
pub struct SmartEqualsKeyMap {
    partial_match_state: PartialMatchState,
}

impl SmartEqualsKeyMap {
    /// 新しいキーマップを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// モードが有効ならそのトリガーキー、無効なら `None`
    pub fn trigger_key_for(mode: &SmartEqualsMode) -> Option<char> {
        if mode.is_enabled() {
            Some(mode.active_config().trigger_key())
        } else {
            None
        }
    }

    /// キー入力を処理してアクションを返す
    ///
    /// `trigger_key` が `None` の場合、どの文字もそのまま挿入される。
    pub fn process_key(&mut self, key: Key, trigger_key: Option<char>) -> KeyProcessResult {
        if matches!(key.code, KeyCode::Unknown) {
            return KeyProcessResult::NoMatch;
        }

        match self.partial_match_state {
            PartialMatchState::None => self.process_initial_key(key, trigger_key),
            PartialMatchState::QuotedInsert => self.process_quoted_key(key, trigger_key),
        }
    }

    fn process_initial_key(&mut self, key: Key, trigger_key: Option<char>) -> KeyProcessResult {
        if key == Key::ctrl_q() {
            self.partial_match_state = PartialMatchState::QuotedInsert;
            return KeyProcessResult::PartialMatch;
        }

        match key.insertable_char() {
            Some(ch) if Some(ch) == trigger_key => {
                KeyProcessResult::Action(Action::SmartEquals { raw: false })
            }
            Some(ch) => KeyProcessResult::Action(Action::InsertChar(ch)),
            None => KeyProcessResult::NoMatch,
        }
    }

    fn process_quoted_key(&mut self, key: Key, trigger_key: Option<char>) -> KeyProcessResult {
        // 状態をリセット
        self.partial_match_state = PartialMatchState::None;

        if key == Key::ctrl_g() {
            return KeyProcessResult::Action(Action::KeyboardQuit);
        }

        match key.insertable_char() {
            Some(ch) if Some(ch) == trigger_key => {
                KeyProcessResult::Action(Action::SmartEquals { raw: true })
            }
            Some(ch) => KeyProcessResult::Action(Action::InsertChar(ch)),
            None => KeyProcessResult::NoMatch,
        }
    }

    /// 部分マッチ状態のリセット
    pub fn reset_partial_match(&mut self) {
        self.partial_match_state = PartialMatchState::None;
    }

    /// 現在の部分マッチ状態を取得
    pub fn is_partial_match(&self) -> bool {
        !matches!(self.partial_match_state, PartialMatchState::None)
    }

    /// 現在のプレフィックス表示
    pub fn current_prefix_label(&self) -> Option<&'static str> {
        match self.partial_match_state {
            PartialMatchState::QuotedInsert => Some("C-q"),
            PartialMatchState::None => None,
        }
    }

    /// crosstermのイベントを処理
    pub fn process_key_event(
        &mut self,
        event: KeyEvent,
        trigger_key: Option<char>,
    ) -> KeyProcessResult {
        let key: Key = event.into();
        self.process_key(key, trigger_key)
    }

    /// キーイベントを処理し、必要ならホストへ編集を適用する
    ///
    /// トリガーキーはその時点のモードから決める。モードが無効なら
    /// すべての文字をそのまま挿入する。編集が行われなかった場合は `None`。
    pub fn dispatch<H: EditorHost + ?Sized>(
        &mut self,
        event: KeyEvent,
        mode: &SmartEqualsMode,
        host: &mut H,
    ) -> Result<Option<EditAction>> {
        match self.process_key_event(event, Self::trigger_key_for(mode)) {
            KeyProcessResult::Action(Action::SmartEquals { raw }) => {
                mode.handle_trigger(host, raw).map(Some)
            }
            KeyProcessResult::Action(Action::InsertChar(ch)) => {
                let action = EditAction::insert(ch);
                action.apply_to(host)?;
                Ok(Some(action))
            }
            KeyProcessResult::Action(Action::KeyboardQuit)
            | KeyProcessResult::PartialMatch
            | KeyProcessResult::NoMatch => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_conversion_from_crossterm() {
        let event = KeyEvent::new(CrosstermKeyCode::Char('q'), CrosstermModifiers::CONTROL);
        let key: Key = event.into();
        assert_eq!(key, Key::ctrl_q());

        let event = KeyEvent::new(CrosstermKeyCode::F(1), CrosstermModifiers::NONE);
        let key: Key = event.into();
        assert_eq!(key.code, KeyCode::Unknown);
    }

    const EQUALS: Option<char> = Some('=');

    #[test]
    fn test_trigger_key_maps_to_smart_equals() {
        let mut keymap = SmartEqualsKeyMap::new();
        assert_eq!(
            keymap.process_key(Key::plain('='), EQUALS),
            KeyProcessResult::Action(Action::SmartEquals { raw: false })
        );
        assert_eq!(
            keymap.process_key(Key::plain('x'), EQUALS),
            KeyProcessResult::Action(Action::InsertChar('x'))
        );
    }

    #[test]
    fn test_quoted_insert_sets_raw() {
        let mut keymap = SmartEqualsKeyMap::new();
        assert_eq!(keymap.process_key(Key::ctrl_q(), EQUALS), KeyProcessResult::PartialMatch);
        assert!(keymap.is_partial_match());
        assert_eq!(keymap.current_prefix_label(), Some("C-q"));

        assert_eq!(
            keymap.process_key(Key::plain('='), EQUALS),
            KeyProcessResult::Action(Action::SmartEquals { raw: true })
        );
        assert!(!keymap.is_partial_match());

        // プレフィックスは1回で消費される
        assert_eq!(
            keymap.process_key(Key::plain('='), EQUALS),
            KeyProcessResult::Action(Action::SmartEquals { raw: false })
        );
    }

    #[test]
    fn test_ctrl_g_cancels_prefix() {
        let mut keymap = SmartEqualsKeyMap::new();
        keymap.process_key(Key::ctrl_q(), EQUALS);
        assert_eq!(
            keymap.process_key(Key::ctrl_g(), EQUALS),
            KeyProcessResult::Action(Action::KeyboardQuit)
        );
        assert!(!keymap.is_partial_match());
    }

    #[test]
    fn test_modified_trigger_key_is_not_trigger() {
        let mut keymap = SmartEqualsKeyMap::new();
        let alt_equals = Key {
            modifiers: KeyModifiers { ctrl: false, alt: true, shift: false },
            code: KeyCode::Char('='),
        };
        assert_eq!(keymap.process_key(alt_equals, EQUALS), KeyProcessResult::NoMatch);
    }

    #[test]
    fn test_trigger_key_follows_argument() {
        let mut keymap = SmartEqualsKeyMap::new();
        assert_eq!(
            keymap.process_key(Key::plain('='), Some('_')),
            KeyProcessResult::Action(Action::InsertChar('='))
        );
        assert_eq!(
            keymap.process_key(Key::plain('='), None),
            KeyProcessResult::Action(Action::InsertChar('='))
        );
    }

    #[test]
    fn test_trigger_key_comes_from_mode_state() {
        let mut mode = SmartEqualsMode::new(
            crate::config::SmartEqualsConfig::new(" <- ", '_').unwrap(),
        );
        assert_eq!(SmartEqualsKeyMap::trigger_key_for(&mode), None);

        mode.enable();
        assert_eq!(SmartEqualsKeyMap::trigger_key_for(&mode), Some('='));

        mode.disable();
        assert_eq!(SmartEqualsKeyMap::trigger_key_for(&mode), None);
    }
}
