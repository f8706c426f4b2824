//! 対象言語の判定
//!
//! スマートイコールは R/S 系のバッファでのみ働く。ファイル名から言語を決める

use regex::Regex;
use std::path::Path;

const R_FILE_PATTERN: &str = r"\.(R|r|Rprofile|Rmd|Rnw)$";
const S_FILE_PATTERN: &str = r"\.(S|s|q)$";

/// バッファの言語
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Language {
    R,
    S,
    #[default]
    Other,
}

impl Language {
    /// スマートイコールの対象言語か
    pub fn is_target(&self) -> bool {
        matches!(self, Language::R | Language::S)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::R => "R",
            Language::S => "S",
            Language::Other => "other",
        }
    }
}

/// ファイル名から言語を判定する
#[derive(Debug, Clone)]
pub struct LanguageDetector {
    r_files: Regex,
    s_files: Regex,
}

impl LanguageDetector {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            r_files: Regex::new(R_FILE_PATTERN)?,
            s_files: Regex::new(S_FILE_PATTERN)?,
        })
    }

    pub fn detect<P: AsRef<Path>>(&self, path: P) -> Language {
        let file_name = match path.as_ref().file_name() {
            Some(name) => name.to_string_lossy(),
            None => return Language::Other,
        };

        let language = if self.r_files.is_match(&file_name) {
            Language::R
        } else if self.s_files.is_match(&file_name) {
            Language::S
        } else {
            Language::Other
        };
        log::debug!("detected language {} for {}", language.name(), file_name);
        language
    }
}
