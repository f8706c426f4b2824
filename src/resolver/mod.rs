//! イコールキー判定
//!
//! カーソル直前の文字列だけを見て、トリガーキーの入力を
//! `=`、`== `、代入演算子のいずれかの編集に解決する。
//! 呼び出し間で状態は持たない。連続入力の取り消しもバッファの再走査で判定する。

pub mod action;
pub mod context;

pub use action::{EditAction, EditOp};
pub use context::CursorContext;

use crate::config::SmartEqualsConfig;
use context::is_blank;

/// 素通し時に入る文字
const LITERAL_EQUALS: &str = "=";
/// 比較演算子の後半（右側の空白込み）
const EQUALITY_TAIL: &str = "= ";
/// 代入演算子を取り消したときに入る比較演算子
const EQUALITY_OPERATOR: &str = "== ";
/// 左辺との間に空白を補った `=`
const SPACED_EQUALS: &str = " =";

/// トリガーキー入力を編集アクションに解決
///
/// 判定は上から順に評価し、最初に一致したものを採用する。
///
/// 1. 素通し: 上書き指定、対象外の言語、直前が空白・タブ・`=` 以外、文字列かコメントの中
///    → `=` をそのまま挿入
/// 2. `=` の直後: 2文字前が空白でなければ左辺との間に空白を補い、`= ` を挿入
/// 3. 空白の直後: 直前が代入演算子そのものなら取り消して `== `、そうでなければ代入演算子
pub fn resolve(context: &CursorContext<'_>, config: &SmartEqualsConfig) -> EditAction {
    let token = config.assignment_token();
    debug_assert!(!token.is_empty(), "assignment token must not be empty");

    let prev = context.prev_char();

    if context.raw_override()
        || !context.is_target_language()
        || !(is_blank(prev) || prev == Some('='))
        || context.inside_string_or_comment()
    {
        log::trace!("smart-equals: pass-through (prev={:?})", prev);
        return EditAction::insert(LITERAL_EQUALS);
    }

    if prev == Some('=') {
        let mut action = EditAction::new();
        if !is_blank(context.prev_prev_char()) {
            log::trace!("smart-equals: spacing left operand of ==");
            action = action.then_delete_backward(1).then_insert(SPACED_EQUALS);
        }
        log::trace!("smart-equals: completing ==");
        return action.then_insert(EQUALITY_TAIL);
    }

    if context.looks_back_at(token) {
        log::trace!("smart-equals: repeated trigger, replacing {:?} with ==", token);
        return EditAction::new()
            .then_delete_backward(config.token_len())
            .then_insert(EQUALITY_OPERATOR);
    }

    log::trace!("smart-equals: inserting assignment {:?}", token);
    EditAction::insert(token)
}
