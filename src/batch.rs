//! Batch Module
//!
//! 入力ディレクトリのワークブックを一括変換し、シートごとのJSONファイルを
//! 出力ディレクトリに書き出すモジュール。
//!
//! 処理は厳密に逐次です。開けなかったワークブックだけが報告付きで
//! スキップされ、セル変換などの致命的エラーはバッチ全体を停止させます。

use std::fs;
use std::path::{Path, PathBuf};

use crate::builder::Converter;
use crate::error::XlsxToJsonError;
use crate::output;

/// Excelのロックファイル接頭辞（編集中に作られる一時ファイル）
const LOCK_FILE_PREFIX: &str = "~$";

/// テスト用のファイル・シートを示す接頭辞
const TEST_PREFIX: &str = "test";

/// 一時ファイルを示す接頭辞
const TEMP_PREFIX: &str = "temp";

/// 変換対象の拡張子
const SOURCE_EXT: &str = "xlsx";

/// 出力ファイルの拡張子
const OUTPUT_EXT: &str = "json";

/// 開けなかったワークブックの報告
#[derive(Debug, Clone, PartialEq)]
pub struct OpenFailure {
    /// 開けなかったファイルのパス
    pub path: PathBuf,

    /// 原因メッセージ
    pub message: String,
}

/// キーが整数でなかったために除外されたレコードの報告（出力単位付き）
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedSheetKey {
    /// 出力名（`<ワークブック名>_<シート名>`）
    pub output: String,

    /// シート内レコード列での位置（0始まり）
    pub index: usize,

    /// キーフィールドの素の値
    pub value: String,
}

/// 一括変換の結果報告
///
/// 回復可能な状態（スキップしたワークブック・除外したレコード）はここに
/// 集約され、呼び出し側（CLI）が表示します。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// 書き出した出力ファイルのパス（処理順）
    pub written: Vec<PathBuf>,

    /// 開けずにスキップしたワークブック
    pub open_failures: Vec<OpenFailure>,

    /// キーが整数でなく除外されたレコード
    pub rejected_keys: Vec<RejectedSheetKey>,
}

/// ファイル名が変換対象かを判定する
///
/// 拡張子が`xlsx`で、ロックファイル・テスト・一時ファイルの接頭辞を
/// 持たないものだけが対象です。
fn is_convertible(file_name: &str) -> bool {
    let is_xlsx = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        == Some(SOURCE_EXT);

    is_xlsx
        && !file_name.starts_with(LOCK_FILE_PREFIX)
        && !file_name.starts_with(TEST_PREFIX)
        && !file_name.starts_with(TEMP_PREFIX)
}

/// 入力ディレクトリの全ワークブックを変換する
///
/// # 引数
///
/// * `converter` - 変換設定を保持するコンバーター
/// * `in_dir` - ソースワークブックのあるディレクトリ
/// * `out_dir` - JSON出力先ディレクトリ（存在すること）
///
/// # 処理フロー
///
/// 1. ディレクトリエントリをファイル名順に列挙する
/// 2. サブディレクトリ・対象外ファイル名をスキップする
/// 3. ワークブックを開けなければ報告してスキップする（回復可能なのはここだけ）
/// 4. `test`で始まるシートを除く各シートについて、レコードをキー付けし
///    `<ワークブック名>_<シート名>.json`へ書き出す
pub(crate) fn convert_directory(
    converter: &Converter,
    in_dir: &Path,
    out_dir: &Path,
) -> Result<BatchReport, XlsxToJsonError> {
    let mut report = BatchReport::default();

    let mut paths: Vec<PathBuf> = fs::read_dir(in_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            continue;
        }

        let file_name = match path.file_name().and_then(|name| name.to_str()) {
            Some(name) => name,
            None => continue,
        };
        if !is_convertible(file_name) {
            continue;
        }

        let workbook = match converter.convert_path(&path) {
            Ok(workbook) => workbook,
            Err(XlsxToJsonError::Open { source, .. }) => {
                report.open_failures.push(OpenFailure {
                    path: path.clone(),
                    message: source.to_string(),
                });
                continue;
            }
            Err(fatal) => return Err(fatal),
        };

        for sheet in &workbook.sheets {
            if sheet.name.starts_with(TEST_PREFIX) {
                continue;
            }

            let output_name = format!("{}_{}", workbook.name, sheet.name);
            let (keyed, rejected) = output::key_records(&sheet.records, converter.key_field());

            for rejection in rejected {
                report.rejected_keys.push(RejectedSheetKey {
                    output: output_name.clone(),
                    index: rejection.index,
                    value: rejection.value,
                });
            }

            let dest = out_dir.join(format!("{}.{}", output_name, OUTPUT_EXT));
            output::write_sheet_file(&dest, &keyed, converter.json_style())?;
            report.written.push(dest);
        }
    }

    Ok(report)
}
