//! カーソル文脈
//!
//! キー入力ごとに作られる、カーソル直前のテキストとホストの判定結果

/// 1回のキー入力に対するカーソル文脈
///
/// `before` は編集可能領域の先頭からカーソルまでのテキスト。
/// 領域の外側は存在しないものとして扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorContext<'a> {
    before: &'a str,
    inside_string_or_comment: bool,
    is_target_language: bool,
    raw_override: bool,
}

impl<'a> CursorContext<'a> {
    /// 対象言語・コード中・上書き指定なしの文脈を作成
    pub fn new(before: &'a str) -> Self {
        Self {
            before,
            inside_string_or_comment: false,
            is_target_language: true,
            raw_override: false,
        }
    }

    pub fn with_string_or_comment(mut self, inside: bool) -> Self {
        self.inside_string_or_comment = inside;
        self
    }

    pub fn with_target_language(mut self, is_target: bool) -> Self {
        self.is_target_language = is_target;
        self
    }

    pub fn with_raw_override(mut self, raw: bool) -> Self {
        self.raw_override = raw;
        self
    }

    /// カーソル直前のテキスト
    pub fn text_before(&self) -> &'a str {
        self.before
    }

    /// カーソル直前の文字
    pub fn prev_char(&self) -> Option<char> {
        self.nth_before(1)
    }

    /// カーソルの2文字前
    pub fn prev_prev_char(&self) -> Option<char> {
        self.nth_before(2)
    }

    /// カーソルから `n` 文字前（1始まり）。領域外は `None`
    pub fn nth_before(&self, n: usize) -> Option<char> {
        if n == 0 {
            return None;
        }
        self.before.chars().rev().nth(n - 1)
    }

    /// カーソル直前が `text` と完全一致するか
    ///
    /// 領域の先頭を越える後読みは不一致。
    pub fn looks_back_at(&self, text: &str) -> bool {
        !text.is_empty() && self.before.ends_with(text)
    }

    pub fn inside_string_or_comment(&self) -> bool {
        self.inside_string_or_comment
    }

    pub fn is_target_language(&self) -> bool {
        self.is_target_language
    }

    pub fn raw_override(&self) -> bool {
        self.raw_override
    }
}

/// 空白（スペースまたはタブ）か
pub(crate) fn is_blank(ch: Option<char>) -> bool {
    matches!(ch, Some(' ') | Some('\t'))
}
