use camino::Utf8PathBuf;

/// A font registered in addition to the theme font.
///
/// Either `lang` is set (the font covers a language) or `code_points` is
/// non-empty (the font covers specific characters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFontInfo {
    pub path: Utf8PathBuf,
    pub lang: String,
    pub code_points: Vec<u32>,
}
