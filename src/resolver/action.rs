//! 編集アクション
//!
//! 判定結果として返される、カーソル位置での削除と挿入の列

use crate::error::Result;
use crate::host::EditorHost;

/// カーソル位置での基本編集操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// カーソル直前の `n` 文字を削除
    DeleteBackward(usize),
    /// カーソル位置に挿入
    Insert(String),
}

/// 順序付きの編集操作列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditAction {
    ops: Vec<EditOp>,
}

impl EditAction {
    pub fn new() -> Self {
        Self::default()
    }

    /// 挿入のみのアクション
    pub fn insert(text: impl Into<String>) -> Self {
        Self::new().then_insert(text)
    }

    pub fn then_delete_backward(mut self, n: usize) -> Self {
        self.ops.push(EditOp::DeleteBackward(n));
        self
    }

    pub fn then_insert(mut self, text: impl Into<String>) -> Self {
        self.ops.push(EditOp::Insert(text.into()));
        self
    }

    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// 差し引きの文字数変化
    pub fn char_delta(&self) -> isize {
        self.ops
            .iter()
            .map(|op| match op {
                EditOp::DeleteBackward(n) => -(*n as isize),
                EditOp::Insert(text) => text.chars().count() as isize,
            })
            .sum()
    }

    /// ホストへ順に適用
    pub fn apply_to<H: EditorHost + ?Sized>(&self, host: &mut H) -> Result<()> {
        for op in &self.ops {
            match op {
                EditOp::DeleteBackward(n) => host.delete_backward(*n)?,
                EditOp::Insert(text) => host.insert_at_cursor(text)?,
            }
        }
        Ok(())
    }

    /// カーソル直前のテキストに適用した結果を返す
    ///
    /// 削除が先頭を越える場合は先頭で止まる。
    pub fn preview(&self, before: &str) -> String {
        let mut chars: Vec<char> = before.chars().collect();
        for op in &self.ops {
            match op {
                EditOp::DeleteBackward(n) => {
                    let keep = chars.len().saturating_sub(*n);
                    chars.truncate(keep);
                }
                EditOp::Insert(text) => chars.extend(text.chars()),
            }
        }
        chars.into_iter().collect()
    }
}
