//! 字句状態スキャナ
//!
//! R/S のテキストを先頭から走査し、末尾が文字列・コメントの中かを判定する

/// 走査中の字句状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexState {
    /// コード
    Code,
    /// 文字列（開始引用符を保持）
    String(char),
    /// 文字列中のエスケープ直後
    Escape(char),
    /// 行末までのコメント
    Comment,
}

impl LexState {
    /// 1文字進めた後の状態
    pub fn step(self, ch: char) -> LexState {
        match self {
            LexState::Code => match ch {
                '#' => LexState::Comment,
                '"' | '\'' | '`' => LexState::String(ch),
                _ => LexState::Code,
            },
            LexState::String(quote) => match ch {
                '\\' => LexState::Escape(quote),
                c if c == quote => LexState::Code,
                _ => LexState::String(quote),
            },
            LexState::Escape(quote) => LexState::String(quote),
            LexState::Comment => match ch {
                '\n' => LexState::Code,
                _ => LexState::Comment,
            },
        }
    }

    pub fn is_code(self) -> bool {
        matches!(self, LexState::Code)
    }
}

/// `text` を先頭から走査した末尾の状態
pub fn scan(text: &str) -> LexState {
    text.chars().fold(LexState::Code, LexState::step)
}

/// `text` の末尾（カーソル位置）が文字列またはコメントの中か
pub fn inside_string_or_comment(text: &str) -> bool {
    !scan(text).is_code()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_code() {
        assert!(!inside_string_or_comment("x <- f(y) "));
        assert!(!inside_string_or_comment(""));
    }

    #[test]
    fn open_double_quoted_string() {
        assert!(inside_string_or_comment("paste(\"a "));
        assert!(!inside_string_or_comment("paste(\"a\", "));
    }

    #[test]
    fn single_quotes_and_backticks() {
        assert!(inside_string_or_comment("x <- 'it "));
        assert!(inside_string_or_comment("`my var "));
        assert!(!inside_string_or_comment("`my var` "));
    }

    #[test]
    fn other_quote_inside_string_does_not_close() {
        assert!(inside_string_or_comment("\"it's "));
        assert!(!inside_string_or_comment("'say \"hi\"' "));
    }

    #[test]
    fn escaped_quote_stays_in_string() {
        assert!(inside_string_or_comment("\"a \\\" b "));
        assert!(!inside_string_or_comment("\"a \\\\\" "));
    }

    #[test]
    fn comment_ends_at_newline() {
        assert!(inside_string_or_comment("x # note "));
        assert!(!inside_string_or_comment("x # note\ny "));
    }

    #[test]
    fn hash_inside_string_is_not_comment() {
        assert_eq!(scan("\"#\" "), LexState::Code);
    }

    #[test]
    fn multiline_string() {
        assert!(inside_string_or_comment("\"line one\nline two "));
    }
}
