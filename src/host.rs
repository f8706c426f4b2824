//! ホストエディタとの接点
//!
//! カーソル直前のテキスト、文字列・コメント判定、言語判定と、
//! カーソル位置での削除・挿入をホストが提供する

use crate::config::SmartEqualsConfig;
use crate::error::Result;
use crate::resolver::{resolve, CursorContext, EditAction};

/// スマートイコールが必要とするホスト側の機能
pub trait EditorHost {
    /// 編集可能領域の先頭からカーソルまでのテキスト
    fn text_before_cursor(&self) -> &str;

    /// カーソル位置が文字列またはコメントの中か
    fn inside_string_or_comment(&self) -> bool;

    /// バッファの言語が対象言語か
    fn is_target_language(&self) -> bool;

    /// カーソル直前の `n` 文字を削除
    fn delete_backward(&mut self, n: usize) -> Result<()>;

    /// カーソル位置に挿入し、カーソルを挿入文字列の後ろへ進める
    fn insert_at_cursor(&mut self, text: &str) -> Result<()>;
}

/// トリガーキー1回分を処理
///
/// ホストから文脈を組み立てて判定し、得られたアクションをホストへ適用する。
pub fn handle_trigger<H: EditorHost + ?Sized>(
    host: &mut H,
    config: &SmartEqualsConfig,
    raw: bool,
) -> Result<EditAction> {
    let action = {
        let context = CursorContext::new(host.text_before_cursor())
            .with_string_or_comment(host.inside_string_or_comment())
            .with_target_language(host.is_target_language())
            .with_raw_override(raw);
        resolve(&context, config)
    };
    action.apply_to(host)?;
    Ok(action)
}
