//! テキストバッファ
//!
//! スマートイコールのホストとして振る舞うメモリ上のバッファ。
//! カーソルと編集可能領域の先頭は文字単位で保持する

use crate::error::{BufferError, Result};
use crate::host::EditorHost;
use crate::syntax::{scanner, Language, LanguageDetector};
use std::path::Path;

/// カーソルと編集可能領域を持つテキストバッファ
#[derive(Debug, Clone)]
pub struct TextBuffer {
    text: String,
    /// カーソル位置（文字単位）
    cursor: usize,
    /// 編集可能領域の先頭（文字単位）。ナローイングしていなければ0
    region_start: usize,
    language: Language,
}

impl TextBuffer {
    /// 末尾にカーソルを置いたバッファを作成
    pub fn new(text: &str, language: Language) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
            region_start: 0,
            language,
        }
    }

    /// ファイル名から言語を判定してバッファを作成
    pub fn for_file<P: AsRef<Path>>(path: P, text: &str, detector: &LanguageDetector) -> Self {
        Self::new(text, detector.detect(path))
    }

    /// 空のRバッファ
    pub fn empty_r() -> Self {
        Self::new("", Language::R)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn region_start(&self) -> usize {
        self.region_start
    }

    /// カーソルを移動
    pub fn set_cursor(&mut self, position: usize) -> Result<()> {
        if position < self.region_start || position > self.len_chars() {
            return Err(BufferError::InvalidCursorPosition { position }.into());
        }
        self.cursor = position;
        Ok(())
    }

    /// 編集可能領域を `start` 以降に狭める
    ///
    /// 対話コンソールのプロンプト以降や埋め込みコードチャンクの中だけを
    /// 判定対象にするために使う。カーソルが領域外なら領域先頭へ移す。
    pub fn narrow_to(&mut self, start: usize) -> Result<()> {
        if start > self.len_chars() {
            return Err(BufferError::InvalidCursorPosition { position: start }.into());
        }
        self.region_start = start;
        if self.cursor < start {
            self.cursor = start;
        }
        Ok(())
    }

    /// ナローイングを解除
    pub fn widen(&mut self) {
        self.region_start = 0;
    }

    /// カーソル以降のテキスト
    pub fn text_after_cursor(&self) -> &str {
        &self.text[self.byte_index(self.cursor)..]
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }
}

impl EditorHost for TextBuffer {
    fn text_before_cursor(&self) -> &str {
        let start = self.byte_index(self.region_start);
        let end = self.byte_index(self.cursor);
        &self.text[start..end]
    }

    fn inside_string_or_comment(&self) -> bool {
        scanner::inside_string_or_comment(self.text_before_cursor())
    }

    fn is_target_language(&self) -> bool {
        self.language.is_target()
    }

    fn delete_backward(&mut self, n: usize) -> Result<()> {
        let available = self.cursor - self.region_start;
        if n > available {
            return Err(BufferError::RegionStart {
                requested: n,
                available,
            }
            .into());
        }
        let start = self.byte_index(self.cursor - n);
        let end = self.byte_index(self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= n;
        Ok(())
    }

    fn insert_at_cursor(&mut self, text: &str) -> Result<()> {
        let at = self.byte_index(self.cursor);
        self.text.insert_str(at, text);
        self.cursor += text.chars().count();
        Ok(())
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::empty_r()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SmartEqualsError;

    #[test]
    fn insert_and_delete_at_cursor() {
        let mut buffer = TextBuffer::new("ab", Language::R);
        buffer.insert_at_cursor("cd").unwrap();
        assert_eq!(buffer.text(), "abcd");
        assert_eq!(buffer.cursor(), 4);

        buffer.delete_backward(3).unwrap();
        assert_eq!(buffer.text(), "a");
        assert_eq!(buffer.cursor(), 1);
    }

    #[test]
    fn edits_in_the_middle_keep_text_after_cursor() {
        let mut buffer = TextBuffer::new("f(x )", Language::R);
        buffer.set_cursor(4).unwrap();
        buffer.insert_at_cursor("<- ").unwrap();
        assert_eq!(buffer.text(), "f(x <- )");
        assert_eq!(buffer.text_after_cursor(), ")");
    }

    #[test]
    fn multibyte_text() {
        let mut buffer = TextBuffer::new("値 ", Language::R);
        assert_eq!(buffer.cursor(), 2);
        buffer.insert_at_cursor("← ").unwrap();
        assert_eq!(buffer.text(), "値 ← ");
        buffer.delete_backward(2).unwrap();
        assert_eq!(buffer.text(), "値 ");
    }

    #[test]
    fn narrowing_limits_text_before_cursor() {
        let mut buffer = TextBuffer::new("> x ", Language::R);
        buffer.narrow_to(2).unwrap();
        assert_eq!(buffer.text_before_cursor(), "x ");

        buffer.widen();
        assert_eq!(buffer.text_before_cursor(), "> x ");
    }

    #[test]
    fn delete_cannot_cross_region_start() {
        let mut buffer = TextBuffer::new("> x", Language::R);
        buffer.narrow_to(2).unwrap();
        match buffer.delete_backward(2) {
            Err(SmartEqualsError::Buffer(BufferError::RegionStart { requested, available })) => {
                assert_eq!(requested, 2);
                assert_eq!(available, 1);
            }
            other => panic!("Expected RegionStart error, got {:?}", other),
        }
        assert_eq!(buffer.text(), "> x");
    }

    #[test]
    fn cursor_outside_region_is_rejected() {
        let mut buffer = TextBuffer::new("> x", Language::R);
        buffer.narrow_to(2).unwrap();
        assert!(buffer.set_cursor(1).is_err());
        assert!(buffer.set_cursor(4).is_err());
        assert!(buffer.set_cursor(3).is_ok());
    }

    #[test]
    fn string_state_comes_from_scanner() {
        let buffer = TextBuffer::new("x <- \"a ", Language::R);
        assert!(buffer.inside_string_or_comment());

        let buffer = TextBuffer::new("x <- 1 ", Language::R);
        assert!(!buffer.inside_string_or_comment());
    }

    #[test]
    fn language_from_file_name() {
        let detector = LanguageDetector::new().unwrap();
        let buffer = TextBuffer::for_file("fit.R", "m ", &detector);
        assert_eq!(buffer.language(), &Language::R);
        assert!(buffer.is_target_language());

        let buffer = TextBuffer::for_file("main.py", "m ", &detector);
        assert!(!buffer.is_target_language());
    }

    #[test]
    fn target_language_flag() {
        assert!(TextBuffer::new("", Language::S).is_target_language());
        assert!(!TextBuffer::new("", Language::Other).is_target_language());
    }
}
