//! Sheet Parser
//!
//! 固定位置のヘッダー2行からスキーマを構築し、データ行をレコードへ
//! 変換するモジュール。シートのレイアウト規約は固定です:
//!
//! - 行0: 予約（人間向けタイトル行。読み取らない）
//! - 行1: フィールド名
//! - 行2: 型タグ（`int` / `long` / `float` / `json`、それ以外はテキスト）
//! - 行3以降: データ

use calamine::{Data, Range};

use crate::api::TypeTag;
use crate::coerce::coerce;
use crate::error::XlsxToJsonError;
use crate::formatter::cell_text;
use crate::types::{FieldSpec, Record, Schema, SheetData};

/// フィールド名行の絶対行インデックス
const FIELD_NAME_ROW: u32 = 1;

/// 型タグ行の絶対行インデックス
const TYPE_TAG_ROW: u32 = 2;

/// データ先頭行の絶対行インデックス
const DATA_START_ROW: u32 = 3;

/// コメント行マーカー（データ行の先頭セルがこれと完全一致したらスキップ）
const COMMENT_MARKER: &str = "#";

/// シートの宣言行数・列数を返す
///
/// calamineの使用範囲の終端座標から絶対カウントを導出します。空シートは(0, 0)。
fn sheet_dims(range: &Range<Data>) -> (u32, u32) {
    match range.end() {
        Some((row, col)) => (row + 1, col + 1),
        None => (0, 0),
    }
}

/// 絶対座標のセルを文字列として読む（範囲外・空セルは空文字列）
fn cell_at(range: &Range<Data>, row: u32, col: u32) -> String {
    range
        .get_value((row, col))
        .map(cell_text)
        .unwrap_or_default()
}

/// ヘッダー2行からスキーマを構築する
///
/// # 引数
///
/// * `range` - シートのセル範囲
/// * `sheet_name` - 診断用のシート名
///
/// # 戻り値
///
/// * `Ok(Schema)` - 列インデックス→(フィールド名, 型タグ)のマッピング
/// * `Err(XlsxToJsonError::Schema)` - ヘッダー行が存在しない場合（致命的）
///
/// フィールド名セルが空の列もスキーマに登録されます。その列の値は
/// 空文字列キーとして一旦格納され、レコード確定前に取り除かれます。
pub(crate) fn extract_schema(
    range: &Range<Data>,
    sheet_name: &str,
) -> Result<Schema, XlsxToJsonError> {
    let (row_count, col_count) = sheet_dims(range);

    if row_count <= TYPE_TAG_ROW {
        return Err(XlsxToJsonError::Schema {
            sheet: sheet_name.to_string(),
            reason: "missing header row".to_string(),
        });
    }

    let mut schema = Schema::new();
    for col in 0..col_count {
        let name = cell_at(range, FIELD_NAME_ROW, col);
        let tag = TypeTag::from_tag(&cell_at(range, TYPE_TAG_ROW, col));
        schema.insert(col, FieldSpec { name, tag });
    }

    Ok(schema)
}

/// 1データ行をレコードに変換する
///
/// # 引数
///
/// * `range` - シートのセル範囲
/// * `row` - 絶対行インデックス（0始まり）
/// * `schema` - シートのスキーマ
/// * `sheet_name` - 診断用のシート名
///
/// # 戻り値
///
/// * `Ok(Record)` - 変換されたレコード。コメント行・空行は空レコードになります。
/// * `Err(XlsxToJsonError::RowFetch)` - 行がシートの範囲外の場合（致命的）
/// * `Err(XlsxToJsonError::Conversion)` - セルの型変換に失敗した場合（致命的）
///
/// # 変換規則
///
/// 1. 先頭セル（列0）が`#`と完全一致する行はコメント行。空レコードを返す。
/// 2. スキーマの各列について、セル文字列が空ならフィールドを設定しない
///    （nullも入れない）。空でなければ型タグに従って変換して格納する。
/// 3. 名前のないヘッダー列に由来する空文字列キーのエントリを取り除いて返す。
pub(crate) fn materialize_row(
    range: &Range<Data>,
    row: u32,
    schema: &Schema,
    sheet_name: &str,
) -> Result<Record, XlsxToJsonError> {
    let (row_count, _) = sheet_dims(range);
    if row >= row_count {
        return Err(XlsxToJsonError::RowFetch {
            sheet: sheet_name.to_string(),
            row,
        });
    }

    let mut record = Record::new();

    if cell_at(range, row, 0) == COMMENT_MARKER {
        return Ok(record);
    }

    for (col, spec) in schema.columns() {
        let raw = cell_at(range, row, *col);
        if raw.is_empty() {
            continue;
        }

        let value = coerce(spec.tag, &raw).map_err(|_| XlsxToJsonError::Conversion {
            sheet: sheet_name.to_string(),
            row: row + 1,
            col: *col,
            raw: raw.clone(),
            tag: spec.tag,
        })?;

        record.insert(spec.name.clone(), value);
    }

    record.remove("");

    Ok(record)
}

/// 1シート分のデータ行を収集する
///
/// スキーマを構築したあと、行3から宣言された最終行までを順に変換し、
/// フィールドを1つ以上持つレコードだけを保持します。
pub(crate) fn collect_sheet(
    range: &Range<Data>,
    sheet_name: &str,
) -> Result<SheetData, XlsxToJsonError> {
    let schema = extract_schema(range, sheet_name)?;
    let (row_count, _) = sheet_dims(range);

    let mut records = Vec::new();
    for row in DATA_START_ROW..row_count {
        let record = materialize_row(range, row, &schema, sheet_name)?;
        if record.is_empty() {
            continue;
        }
        records.push(record);
    }

    Ok(SheetData {
        name: sheet_name.to_string(),
        records,
    })
}
