//! Coercion Module
//!
//! 型タグからセル文字列の変換関数へのディスパッチを提供するモジュール。
//! 変換は(タグ, 文字列)の純粋関数で、副作用を持ちません。

use crate::api::TypeTag;
use crate::types::FieldValue;

/// セル文字列を宣言された型に変換する
///
/// # 引数
///
/// * `tag` - 型タグ行から導出された型タグ
/// * `text` - セルの生の文字列表現（空でないこと。空セルは呼び出し側でスキップされる）
///
/// # 戻り値
///
/// * `Ok(FieldValue)` - 変換された値
/// * `Err(String)` - 変換失敗の理由。呼び出し側がシート名・行番号・列インデックスを
///   付与して致命的エラーに昇格させます。
///
/// # 使用例
///
/// ```rust
/// use xlsxrec::{FieldValue, TypeTag};
///
/// # fn main() {
/// let value = xlsxrec::coerce(TypeTag::Int, "42").unwrap();
/// assert_eq!(value, FieldValue::Int(42));
///
/// let value = xlsxrec::coerce(TypeTag::Json, "[1, 2, 3]").unwrap();
/// assert_eq!(value.tag(), TypeTag::Json);
/// # }
/// ```
pub fn coerce(tag: TypeTag, text: &str) -> Result<FieldValue, String> {
    match tag {
        TypeTag::Int => text
            .parse::<i32>()
            .map(FieldValue::Int)
            .map_err(|e| e.to_string()),
        TypeTag::Long => text
            .parse::<i64>()
            .map(FieldValue::Long)
            .map_err(|e| e.to_string()),
        TypeTag::Float => text
            .parse::<f64>()
            .map(FieldValue::Float)
            .map_err(|e| e.to_string()),
        TypeTag::Json => serde_json::from_str(text)
            .map(FieldValue::Json)
            .map_err(|e| e.to_string()),
        TypeTag::Text => Ok(FieldValue::Text(text.to_string())),
    }
}
