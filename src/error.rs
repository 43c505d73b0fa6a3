//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

use crate::api::TypeTag;

/// xlsxrecクレート全体で使用するエラー型
///
/// # エラーの種類と致命度
///
/// - `Open`: ワークブックが開けなかった。バッチ処理ではこのエラーのみ
///   回復可能として扱われ、該当ワークブックをスキップして処理が続行されます。
/// - `Schema` / `RowFetch` / `Conversion` / `Parse` / `Json` / `Io`:
///   実行全体を停止させる致命的エラー。
/// - `Config`: `ConverterBuilder::build()`での設定検証エラー。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxrec::XlsxToJsonError;
/// use std::fs::File;
///
/// fn open_source(path: &str) -> Result<(), XlsxToJsonError> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum XlsxToJsonError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ワークブックを開けなかったエラー
    ///
    /// ファイルが存在しない、壊れている、XLSX形式でない、などが原因です。
    /// ディレクトリ一括変換ではこのエラーだけが回復可能扱いとなり、
    /// 該当ワークブックはシートなしとして報告・スキップされます。
    #[error("Failed to open workbook '{workbook}': {source}")]
    Open {
        /// 開けなかったワークブックのベース名
        workbook: String,
        /// calamine由来の原因エラー
        source: calamine::Error,
    },

    /// 開いた後のシート読み取りで発生したエラー（致命的）
    #[error("Failed to parse Excel file: {0}")]
    Parse(#[from] calamine::Error),

    /// ヘッダー行（フィールド名行・型タグ行）が読めなかったエラー（致命的）
    #[error("Schema error in sheet '{sheet}': {reason}")]
    Schema {
        /// エラーが発生したシート名
        sheet: String,
        /// 詳細理由
        reason: String,
    },

    /// データ行が読めなかったエラー（致命的）
    ///
    /// `row`はシート先頭からの絶対行インデックス（0始まり）です。
    #[error("Failed to fetch row {row} in sheet '{sheet}'")]
    RowFetch {
        /// エラーが発生したシート名
        sheet: String,
        /// 読めなかった行（0始まり）
        row: u32,
    },

    /// セル文字列を宣言された型に変換できなかったエラー（致命的）
    ///
    /// 診断用に、発生元のシート名・1始まりの行番号・列インデックス・
    /// 元のセル文字列・型タグをすべて保持します。
    #[error(
        "Conversion error in sheet '{sheet}', row {row}, column {col}: cannot coerce '{raw}' to {tag}"
    )]
    Conversion {
        /// エラーが発生したシート名
        sheet: String,
        /// 1始まりの行番号
        row: u32,
        /// 0始まりの列インデックス
        col: u32,
        /// 変換できなかったセル文字列
        raw: String,
        /// 宣言されていた型タグ
        tag: TypeTag,
    },

    /// JSONエンコード・デコード中に発生したエラー（致命的）
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルサイズ制限などに違反した場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: XlsxToJsonError = io_err.into();

        match error {
            XlsxToJsonError::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_parse_error_conversion() {
        let parse_err = calamine::Error::Msg("Invalid file format");
        let error: XlsxToJsonError = parse_err.into();

        match error {
            XlsxToJsonError::Parse(_) => {}
            _ => panic!("Expected Parse error"),
        }
    }

    #[test]
    fn test_open_error_display() {
        let error = XlsxToJsonError::Open {
            workbook: "items".to_string(),
            source: calamine::Error::Msg("bad zip"),
        };

        let msg = error.to_string();
        assert!(msg.contains("Failed to open workbook 'items'"));
        assert!(msg.contains("bad zip"));
    }

    #[test]
    fn test_schema_error_display() {
        let error = XlsxToJsonError::Schema {
            sheet: "Sheet1".to_string(),
            reason: "missing header row".to_string(),
        };

        let msg = error.to_string();
        assert!(msg.contains("Sheet1"));
        assert!(msg.contains("missing header row"));
    }

    #[test]
    fn test_conversion_error_carries_full_context() {
        let error = XlsxToJsonError::Conversion {
            sheet: "items".to_string(),
            row: 4,
            col: 2,
            raw: "abc".to_string(),
            tag: TypeTag::Int,
        };

        let msg = error.to_string();
        assert!(msg.contains("items"));
        assert!(msg.contains("row 4"));
        assert!(msg.contains("column 2"));
        assert!(msg.contains("'abc'"));
        assert!(msg.contains("int"));
    }

    #[test]
    fn test_row_fetch_error_display() {
        let error = XlsxToJsonError::RowFetch {
            sheet: "items".to_string(),
            row: 12,
        };

        let msg = error.to_string();
        assert!(msg.contains("row 12"));
        assert!(msg.contains("items"));
    }

    #[test]
    fn test_error_conversion_with_question_mark() {
        fn io_operation() -> Result<(), XlsxToJsonError> {
            let _file = std::fs::File::open("nonexistent_file.xlsx")?;
            Ok(())
        }

        match io_operation() {
            Err(XlsxToJsonError::Io(_)) => {}
            _ => panic!("Expected Io error from ? operator"),
        }
    }
}
