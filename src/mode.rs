//! スマートイコールモード
//!
//! 有効化時に現在の設定を退避し、`=` をトリガーキーとする設定を積む。
//! 無効化で退避した設定へ正確に戻す

use crate::config::{ConfigStack, SmartEqualsConfig, DEFAULT_TRIGGER_KEY};
use crate::error::Result;
use crate::host::{handle_trigger, EditorHost};
use crate::resolver::EditAction;

/// モードの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeState {
    Disabled,
    Enabled,
}

/// 有効・無効を切り替えるスマートイコールモード
#[derive(Debug, Clone)]
pub struct SmartEqualsMode {
    state: ModeState,
    configs: ConfigStack,
}

impl SmartEqualsMode {
    /// 無効状態のモードを作成
    pub fn new(base: SmartEqualsConfig) -> Self {
        Self {
            state: ModeState::Disabled,
            configs: ConfigStack::new(base),
        }
    }

    pub fn state(&self) -> ModeState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state == ModeState::Enabled
    }

    /// 現在有効な設定
    pub fn active_config(&self) -> &SmartEqualsConfig {
        self.configs.current()
    }

    /// 有効化
    ///
    /// 代入演算子の先頭の空白を1つ取り除き、トリガーキーを `=` にする。
    /// 既に有効なら何もしない。
    pub fn enable(&mut self) {
        if self.is_enabled() {
            return;
        }
        let previous = self.configs.current();
        let stripped = previous.with_leading_space_stripped();
        let enabled = stripped
            .with_trigger_key(DEFAULT_TRIGGER_KEY)
            .unwrap_or(stripped);
        log::debug!(
            "smart-equals enabled: token {:?} -> {:?}",
            previous.assignment_token(),
            enabled.assignment_token()
        );
        self.configs.push(enabled);
        self.state = ModeState::Enabled;
    }

    /// 無効化。退避していた設定へ戻す
    pub fn disable(&mut self) {
        if !self.is_enabled() {
            return;
        }
        self.configs.pop();
        self.state = ModeState::Disabled;
        log::debug!(
            "smart-equals disabled: token restored to {:?}",
            self.configs.current().assignment_token()
        );
    }

    /// 有効・無効を反転し、反転後に有効かを返す
    pub fn toggle(&mut self) -> bool {
        if self.is_enabled() {
            self.disable();
        } else {
            self.enable();
        }
        self.is_enabled()
    }

    /// トリガーキーの入力を処理
    ///
    /// 無効時は `=` をそのまま挿入する。
    pub fn handle_trigger<H: EditorHost + ?Sized>(
        &self,
        host: &mut H,
        raw: bool,
    ) -> Result<EditAction> {
        let raw = raw || !self.is_enabled();
        handle_trigger(host, self.active_config(), raw)
    }
}

impl Default for SmartEqualsMode {
    fn default() -> Self {
        Self::new(SmartEqualsConfig::default())
    }
}
