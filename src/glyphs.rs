//! Glyph Extraction Module
//!
//! テキスト中の漢字（Han文字）を初出順で重複なく収集する独立ユーティリティ。
//! 表→JSON変換とは別系統のパイプラインです。
//!
//! 各コードポイントは優先順で分類されます:
//! 空白 → 数字 → 句読点 → ASCIIラテン文字 → Han → その他。
//! 収集対象はHanのみで、それ以外は種別ごとに集計されます。

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};
use unicode_script::{Script, UnicodeScript};

use crate::error::XlsxToJsonError;

/// 1コードポイントの分類結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphClass {
    /// 空白文字
    Whitespace,

    /// 数字（Unicodeカテゴリ N）
    Digit,

    /// 句読点（Unicodeカテゴリ P）
    Punctuation,

    /// ASCIIラテン文字
    ///
    /// 1文字ずつ判定するため、連続したラテン文字列も1文字単位で
    /// このクラスに分類されます。
    Latin,

    /// Han文字（収集対象）
    Han,

    /// 上記のいずれでもない文字
    Other,
}

/// 1コードポイントを分類する
///
/// 分類は優先順で、最初に一致したクラスが返ります。
/// 全角英字（例: `ａ`）はASCIIではないため`Other`になります。
pub fn classify(c: char) -> GlyphClass {
    if c.is_whitespace() {
        return GlyphClass::Whitespace;
    }
    if c.is_numeric() {
        return GlyphClass::Digit;
    }
    if c.general_category_group() == GeneralCategoryGroup::Punctuation {
        return GlyphClass::Punctuation;
    }
    if c.is_ascii_alphabetic() {
        return GlyphClass::Latin;
    }
    if c.script() == Script::Han {
        return GlyphClass::Han;
    }
    GlyphClass::Other
}

/// 分類ごとの出現数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlyphTally {
    /// 空白文字数
    pub whitespace: usize,

    /// 数字数
    pub digits: usize,

    /// 句読点数
    pub punctuation: usize,

    /// ASCIIラテン文字数
    pub latin: usize,

    /// Han文字の総出現数（重複を含む）
    pub han: usize,

    /// その他の文字数
    pub other: usize,
}

/// テキスト1回走査の結果
///
/// Han文字の初出順・重複なしの並びと、分類ごとの集計を保持します。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HanGlyphSet {
    chars: String,
    distinct_count: usize,
    tally: GlyphTally,
}

impl HanGlyphSet {
    /// 収集されたHan文字の並び（初出順、重複なし）
    pub fn chars(&self) -> &str {
        &self.chars
    }

    /// 収集されたHan文字の種類数
    pub fn distinct_count(&self) -> usize {
        self.distinct_count
    }

    /// 分類ごとの出現数
    pub fn tally(&self) -> &GlyphTally {
        &self.tally
    }
}

/// テキストを走査してHan文字集合を構築する
///
/// 入力だけで結果が決まる純粋な関数です。同じ入力からは常に同じ
/// 並び・同じ集計が得られます。
pub fn scan(text: &str) -> HanGlyphSet {
    let mut seen: HashSet<char> = HashSet::new();
    let mut set = HanGlyphSet::default();

    for c in text.chars() {
        match classify(c) {
            GlyphClass::Whitespace => set.tally.whitespace += 1,
            GlyphClass::Digit => set.tally.digits += 1,
            GlyphClass::Punctuation => set.tally.punctuation += 1,
            GlyphClass::Latin => set.tally.latin += 1,
            GlyphClass::Han => {
                set.tally.han += 1;
                if seen.insert(c) {
                    set.chars.push(c);
                    set.distinct_count += 1;
                }
            }
            GlyphClass::Other => set.tally.other += 1,
        }
    }

    set
}

/// テキストファイルからHan文字集合を抽出してファイルに書き出す
///
/// # 引数
///
/// * `input` - 走査するテキストファイルのパス
/// * `output` - 出力先のパス。Han文字の並びがそのままのバイト列として
///   書き込まれます（JSONラップなし）。
///
/// # 戻り値
///
/// * `Ok(HanGlyphSet)` - 走査結果（種類数の報告に使用）
/// * `Err(XlsxToJsonError::Io)` - 読み込み・書き込みに失敗した場合
pub fn extract_file(input: &Path, output: &Path) -> Result<HanGlyphSet, XlsxToJsonError> {
    let text = fs::read_to_string(input)?;
    let set = scan(&text);
    fs::write(output, set.chars().as_bytes())?;
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_priority_order() {
        assert_eq!(classify(' '), GlyphClass::Whitespace);
        assert_eq!(classify('\n'), GlyphClass::Whitespace);
        assert_eq!(classify('3'), GlyphClass::Digit);
        assert_eq!(classify('。'), GlyphClass::Punctuation);
        assert_eq!(classify(','), GlyphClass::Punctuation);
        assert_eq!(classify('a'), GlyphClass::Latin);
        assert_eq!(classify('Z'), GlyphClass::Latin);
        assert_eq!(classify('热'), GlyphClass::Han);
        assert_eq!(classify('€'), GlyphClass::Other);
    }

    #[test]
    fn test_classify_fullwidth_latin_is_other() {
        assert_eq!(classify('ａ'), GlyphClass::Other);
    }

    #[test]
    fn test_scan_dedupes_in_first_seen_order() {
        let set = scan("热热冷abc123。");

        assert_eq!(set.chars(), "热冷");
        assert_eq!(set.distinct_count(), 2);
        assert_eq!(set.tally().han, 3);
        assert_eq!(set.tally().latin, 3);
        assert_eq!(set.tally().digits, 3);
        assert_eq!(set.tally().punctuation, 1);
    }

    #[test]
    fn test_scan_empty_input() {
        let set = scan("");
        assert_eq!(set.chars(), "");
        assert_eq!(set.distinct_count(), 0);
        assert_eq!(*set.tally(), GlyphTally::default());
    }

    #[test]
    fn test_scan_is_deterministic() {
        let text = "雨雪雨風 snow 雪2025。";
        assert_eq!(scan(text), scan(text));
        assert_eq!(scan(text).chars(), "雨雪風");
    }

    #[test]
    fn test_scan_counts_whitespace_and_other() {
        let set = scan("热 €\t热");
        assert_eq!(set.tally().whitespace, 2);
        assert_eq!(set.tally().other, 1);
        assert_eq!(set.distinct_count(), 1);
    }
}
