//! Formatter Module
//!
//! calamineのセル値から生のセル文字列への変換を提供するモジュール。
//! 型変換（coerce）はこの文字列表現に対して行われます。

use calamine::Data;
use chrono::{Duration, NaiveDate};

/// セル値を生の文字列表現に変換する
///
/// 空セルは空文字列になります。空文字列のセルはフィールドとして
/// 格納されません（呼び出し側でスキップされます）。
pub(crate) fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::Error(e) => e.to_string(),
        Data::DateTime(dt) => datetime_text(dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Excelシリアル日付値を文字列に変換する
///
/// 1900年システム（1899年12月30日起算）で処理します。時刻成分が0の場合は
/// 日付のみ（`YYYY-MM-DD`）、それ以外は`YYYY-MM-DD HH:MM:SS`になります。
/// 変換できないシリアル値は数値のまま文字列化します。
fn datetime_text(serial: f64) -> String {
    serial_to_text(serial).unwrap_or_else(|| serial.to_string())
}

fn serial_to_text(serial: f64) -> Option<String> {
    let days = serial.floor() as i64;
    let secs = ((serial - serial.floor()) * 86_400.0).round() as i64;

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let date = epoch.checked_add_signed(Duration::days(days))?;

    if secs == 0 {
        return Some(date.format("%Y-%m-%d").to_string());
    }

    let datetime = date
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::seconds(secs))?;
    Some(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
}
