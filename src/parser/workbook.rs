//! Workbook Parser
//!
//! calamineのラッパーとして、ワークブックレベルの操作を提供します。

use std::io::{Cursor, Read, Seek};

use calamine::{open_workbook_auto_from_rs, Reader, Sheets, Xlsx};

use crate::error::XlsxToJsonError;
use crate::parser::sheet::collect_sheet;
use crate::security::SecurityConfig;
use crate::types::SheetData;

/// ワークブックパーサー
///
/// XLSX形式のみをサポートします。入力は一度メモリに読み込み、
/// サイズ制限を検査してから開きます。
pub(crate) struct WorkbookParser {
    /// calamineのワークブック
    workbook: Xlsx<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// ワークブックを開く
    ///
    /// # 引数
    ///
    /// * `reader` - ワークブックを読み込むためのリーダー（Read + Seekトレイトを実装）
    /// * `workbook_name` - 診断用のワークブックベース名
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - 読み込みに成功した場合
    /// * `Err(XlsxToJsonError::Open)` - 開けなかった場合（バッチ処理で回復可能）
    /// * `Err(XlsxToJsonError::SecurityViolation)` - サイズ制限を超えた場合
    pub fn open<R: Read + Seek>(
        mut reader: R,
        workbook_name: &str,
    ) -> Result<Self, XlsxToJsonError> {
        let security_config = SecurityConfig::default();

        let mut buffer = Vec::new();
        let bytes_read = reader.read_to_end(&mut buffer)?;

        if bytes_read as u64 > security_config.max_input_file_size {
            return Err(XlsxToJsonError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes (max: {} bytes)",
                bytes_read, security_config.max_input_file_size
            )));
        }

        let sheets = open_workbook_auto_from_rs(Cursor::new(buffer)).map_err(|e| {
            XlsxToJsonError::Open {
                workbook: workbook_name.to_string(),
                source: e,
            }
        })?;

        match sheets {
            Sheets::Xlsx(workbook) => Ok(Self { workbook }),
            _ => Err(XlsxToJsonError::Open {
                workbook: workbook_name.to_string(),
                source: calamine::Error::Msg("only XLSX format is supported"),
            }),
        }
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// すべてのシートを順に収集する
    ///
    /// シート取得後のエラー（ヘッダー欠落・型変換失敗など）は致命的で、
    /// そのまま伝播します。
    pub fn collect_sheets(&mut self) -> Result<Vec<SheetData>, XlsxToJsonError> {
        let mut sheets = Vec::new();

        for sheet_name in self.sheet_names() {
            let range = self
                .workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| XlsxToJsonError::Parse(e.into()))?;
            sheets.push(collect_sheet(&range, &sheet_name)?);
        }

        Ok(sheets)
    }
}

// ワークブック単位のテストは実際のXLSXバイト列が必要なため、
// 統合テスト（tests/integration_test.rs）で実装します。
