//! Output Module
//!
//! シートのレコード列を整数キー付きコレクションへ再索引し、
//! JSONドキュメントとして書き出すモジュール。

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::api::JsonStyle;
use crate::error::XlsxToJsonError;
use crate::types::Record;

/// キー付きレコードコレクション
///
/// `BTreeMap`なのでキー昇順で直列化され、同じ入力からは常に同じ
/// 出力バイト列が得られます。
pub type KeyedRecords = BTreeMap<i64, Record>;

/// キーフィールドが整数でなかったために除外されたレコードの報告
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedKey {
    /// シート内レコード列での位置（0始まり）
    pub index: usize,

    /// キーフィールドの素の値
    pub value: String,
}

/// レコード列をキー付きコレクションに再索引する
///
/// # 引数
///
/// * `records` - シート内の行順のレコード列
/// * `key_field` - キーとして読むフィールド名（通常は`id`）
///
/// # 再索引規則
///
/// - キーフィールドを持たないレコードに到達したら、そこで処理を打ち切る
///   （データ終端のシグナル。以降のレコードは内容があっても捨てられる）。
/// - キーが整数型（`Int` / `Long`）なら、その値をキーとして挿入する。
///   同じキーは後勝ちで上書きされる。
/// - キーがそれ以外の型（テキストなど）なら、報告リストに積んで除外する。
///
/// # 戻り値
///
/// キー付きコレクションと、除外されたレコードの報告リストのペア。
/// 除外は回復可能な状態であり、エラーにはなりません。
pub fn key_records(records: &[Record], key_field: &str) -> (KeyedRecords, Vec<RejectedKey>) {
    let mut keyed = KeyedRecords::new();
    let mut rejected = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let value = match record.get(key_field) {
            Some(value) => value,
            None => break,
        };

        match value.as_i64() {
            Some(key) => {
                keyed.insert(key, record.clone());
            }
            None => rejected.push(RejectedKey {
                index,
                value: value.to_string(),
            }),
        }
    }

    (keyed, rejected)
}

/// キー付きコレクションをJSONとして書き出す
///
/// 整数キーは文字列形式のJSONオブジェクトキーになります。
/// `JsonStyle::Pretty`は固定インデント（スペース4つ）で整形します。
pub fn write_keyed_json<W: Write>(
    mut writer: W,
    records: &KeyedRecords,
    style: JsonStyle,
) -> Result<(), XlsxToJsonError> {
    match style {
        JsonStyle::Pretty => {
            let formatter = PrettyFormatter::with_indent(b"    ");
            let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
            records.serialize(&mut serializer)?;
        }
        JsonStyle::Compact => {
            serde_json::to_writer(&mut writer, records)?;
        }
    }
    Ok(())
}

/// キー付きコレクションを出力先ファイルに書き出す
///
/// ファイルは存在しなければ作成されます。既存ファイルは切り詰めずに
/// 先頭から上書きするため、呼び出し側が出力先をクリーンに保つ必要があります。
pub fn write_sheet_file(
    path: &Path,
    records: &KeyedRecords,
    style: JsonStyle,
) -> Result<(), XlsxToJsonError> {
    let file = OpenOptions::new().write(true).create(true).open(path)?;
    let mut writer = BufWriter::new(file);
    write_keyed_json(&mut writer, records, style)?;
    writer.flush()?;
    Ok(())
}
