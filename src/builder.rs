//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use std::io::{Read, Seek};
use std::path::Path;

use crate::api::JsonStyle;
use crate::batch::{self, BatchReport};
use crate::error::XlsxToJsonError;
use crate::output::{self, KeyedRecords, RejectedKey};
use crate::parser::WorkbookParser;
use crate::types::{SheetData, WorkbookData};

/// 変換処理の設定を保持する内部構造体
///
/// プロセス全体の可変状態ではなく、コンバーターごとに持ち回る明示的な値です。
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// JSON出力スタイル
    pub json_style: JsonStyle,

    /// レコードのキーとして読むフィールド名
    pub key_field: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            json_style: JsonStyle::Pretty,
            key_field: "id".to_string(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Converter`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみを
/// オーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxrec::{ConverterBuilder, JsonStyle};
///
/// # fn main() -> Result<(), xlsxrec::XlsxToJsonError> {
/// let converter = ConverterBuilder::new()
///     .with_json_style(JsonStyle::Compact)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - JSON出力スタイル: 整形あり（スペース4つ）
    /// - キーフィールド名: `id`
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON出力スタイルを指定する
    pub fn with_json_style(mut self, style: JsonStyle) -> Self {
        self.config.json_style = style;
        self
    }

    /// レコードのキーとして読むフィールド名を指定する
    ///
    /// # 引数
    ///
    /// * `field: &str`: キーフィールド名。空文字列は`build()`時に
    ///   `XlsxToJsonError::Config`になります。
    pub fn with_key_field(mut self, field: &str) -> Self {
        self.config.key_field = field.to_string();
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Converter)`: 設定が有効な場合
    /// * `Err(XlsxToJsonError::Config)`: 設定が無効な場合（例: 空のキーフィールド名）
    pub fn build(self) -> Result<Converter, XlsxToJsonError> {
        if self.config.key_field.is_empty() {
            return Err(XlsxToJsonError::Config(
                "Key field name must not be empty".to_string(),
            ));
        }

        Ok(Converter::new(self.config))
    }
}

/// 変換処理のファサード
///
/// スキーマ付きワークブックをキー付きJSONレコードへ変換するための
/// メインエントリーポイントです。
///
/// # 使用例
///
/// ```rust,no_run
/// use std::fs::File;
/// use xlsxrec::ConverterBuilder;
///
/// # fn main() -> Result<(), xlsxrec::XlsxToJsonError> {
/// let converter = ConverterBuilder::new().build()?;
/// let input = File::open("items.xlsx")?;
/// let workbook = converter.convert(input, "items")?;
///
/// for sheet in &workbook.sheets {
///     let (json, rejected) = converter.render_sheet(sheet)?;
///     println!("{}: {} rejected", sheet.name, rejected.len());
///     println!("{}", json);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    pub(crate) fn json_style(&self) -> JsonStyle {
        self.config.json_style
    }

    pub(crate) fn key_field(&self) -> &str {
        &self.config.key_field
    }

    /// ワークブックを読み込み、全シートをレコード列に変換する
    ///
    /// # 引数
    ///
    /// * `reader` - ワークブックを読み込むためのリーダー（Read + Seekトレイトを実装）
    /// * `workbook_name` - ワークブックのベース名（出力ファイル名の前半になる）
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookData)` - 変換に成功した場合
    /// * `Err(XlsxToJsonError)` - エラーが発生した場合。`Open`以外は致命的です。
    pub fn convert<R: Read + Seek>(
        &self,
        reader: R,
        workbook_name: &str,
    ) -> Result<WorkbookData, XlsxToJsonError> {
        let mut parser = WorkbookParser::open(reader, workbook_name)?;
        let sheets = parser.collect_sheets()?;

        Ok(WorkbookData {
            name: workbook_name.to_string(),
            sheets,
        })
    }

    /// パスからワークブックを変換する
    ///
    /// ベース名はファイル名から拡張子を除いたものになります。
    /// ファイルが開けない場合も`XlsxToJsonError::Open`として報告されます。
    pub fn convert_path(&self, path: &Path) -> Result<WorkbookData, XlsxToJsonError> {
        let base_name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
            .to_string();

        let file = std::fs::File::open(path).map_err(|e| XlsxToJsonError::Open {
            workbook: base_name.clone(),
            source: calamine::Error::Io(e),
        })?;

        self.convert(file, &base_name)
    }

    /// シートのレコード列をキー付きコレクションに再索引する
    ///
    /// # 戻り値
    ///
    /// キー付きコレクションと、キーが整数でなく除外されたレコードの
    /// 報告リストのペア。
    pub fn key_sheet(&self, sheet: &SheetData) -> (KeyedRecords, Vec<RejectedKey>) {
        output::key_records(&sheet.records, &self.config.key_field)
    }

    /// シートをキー付きJSON文字列に変換する
    ///
    /// # 戻り値
    ///
    /// * `Ok((String, Vec<RejectedKey>))` - JSONドキュメントと除外報告
    /// * `Err(XlsxToJsonError)` - 直列化に失敗した場合
    pub fn render_sheet(
        &self,
        sheet: &SheetData,
    ) -> Result<(String, Vec<RejectedKey>), XlsxToJsonError> {
        let (keyed, rejected) = self.key_sheet(sheet);

        let mut buffer = Vec::new();
        output::write_keyed_json(&mut buffer, &keyed, self.config.json_style)?;

        let text = String::from_utf8(buffer).map_err(|e| {
            XlsxToJsonError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        Ok((text, rejected))
    }

    /// 入力ディレクトリの全ワークブックを変換する
    ///
    /// シートごとに`<ワークブック名>_<シート名>.json`を出力ディレクトリへ
    /// 書き出します。開けなかったワークブックは報告付きでスキップされ、
    /// それ以外のエラーはバッチ全体を停止させます。
    pub fn convert_dir(
        &self,
        in_dir: &Path,
        out_dir: &Path,
    ) -> Result<BatchReport, XlsxToJsonError> {
        batch::convert_directory(self, in_dir, out_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converter_builder_defaults() {
        let builder = ConverterBuilder::new();
        assert_eq!(builder.config.json_style, JsonStyle::Pretty);
        assert_eq!(builder.config.key_field, "id");
    }

    #[test]
    fn test_with_json_style() {
        let builder = ConverterBuilder::new().with_json_style(JsonStyle::Compact);
        assert_eq!(builder.config.json_style, JsonStyle::Compact);
    }

    #[test]
    fn test_with_key_field() {
        let builder = ConverterBuilder::new().with_key_field("uid");
        assert_eq!(builder.config.key_field, "uid");
    }

    #[test]
    fn test_build_success() {
        assert!(ConverterBuilder::new().build().is_ok());
    }

    #[test]
    fn test_build_rejects_empty_key_field() {
        let result = ConverterBuilder::new().with_key_field("").build();
        match result {
            Err(XlsxToJsonError::Config(msg)) => {
                assert!(msg.contains("Key field"));
            }
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_builder_method_chaining() {
        let converter = ConverterBuilder::new()
            .with_json_style(JsonStyle::Compact)
            .with_key_field("uid")
            .build()
            .unwrap();

        assert_eq!(converter.json_style(), JsonStyle::Compact);
        assert_eq!(converter.key_field(), "uid");
    }

    #[test]
    fn test_convert_rejects_invalid_input() {
        let converter = ConverterBuilder::new().build().unwrap();
        let invalid_input: Vec<u8> = vec![];
        let result = converter.convert(std::io::Cursor::new(invalid_input), "empty");

        match result {
            Err(XlsxToJsonError::Open { workbook, .. }) => {
                assert_eq!(workbook, "empty");
            }
            _ => panic!("Expected Open error"),
        }
    }

    #[test]
    fn test_convert_path_missing_file_is_open_error() {
        let converter = ConverterBuilder::new().build().unwrap();
        let result = converter.convert_path(Path::new("no_such_dir/no_such_file.xlsx"));

        match result {
            Err(XlsxToJsonError::Open { workbook, .. }) => {
                assert_eq!(workbook, "no_such_file");
            }
            _ => panic!("Expected Open error"),
        }
    }
}
