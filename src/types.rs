//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。
//! 変換後の値は閉じたタグ付き列挙型（`FieldValue`）で表現し、
//! シリアライズはバリアントに対するマッチで行います。

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::api::TypeTag;

/// 型変換後のセル値
///
/// 型タグ行の宣言に従って変換された値を表す閉じた集合です。
/// 実行時の型検査ではなく、バリアントへのマッチで直列化・キー抽出を行います。
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// `int`タグ: 32bit符号付き整数
    Int(i32),

    /// `long`タグ: 64bit符号付き整数
    Long(i64),

    /// `float`タグ: 倍精度浮動小数点数
    Float(f64),

    /// `json`タグ: デコード済みJSON値（スカラー・配列・オブジェクト）
    Json(serde_json::Value),

    /// タグなし・未知タグ: セル文字列そのまま
    Text(String),
}

impl FieldValue {
    /// 値の型タグを返す
    pub fn tag(&self) -> TypeTag {
        match self {
            FieldValue::Int(_) => TypeTag::Int,
            FieldValue::Long(_) => TypeTag::Long,
            FieldValue::Float(_) => TypeTag::Float,
            FieldValue::Json(_) => TypeTag::Json,
            FieldValue::Text(_) => TypeTag::Text,
        }
    }

    /// 整数値として取得する
    ///
    /// `Int` / `Long` のみが整数として扱われます。レコードのキー抽出に使用します。
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(i64::from(*v)),
            FieldValue::Long(v) => Some(*v),
            _ => None,
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldValue::Int(v) => serializer.serialize_i32(*v),
            FieldValue::Long(v) => serializer.serialize_i64(*v),
            FieldValue::Float(v) => serializer.serialize_f64(*v),
            FieldValue::Json(v) => v.serialize(serializer),
            FieldValue::Text(v) => serializer.serialize_str(v),
        }
    }
}

impl fmt::Display for FieldValue {
    /// 診断メッセージ用の素の表現
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Long(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Json(v) => write!(f, "{}", v),
            FieldValue::Text(v) => f.write_str(v),
        }
    }
}

/// 1データ行から生成されるレコード
///
/// フィールド名から変換済み値へのマッピングです。挿入順（＝スキーマの列順）を
/// 保持したままJSONオブジェクトとして直列化されます。
/// 空セルのフィールドは格納されません（nullにはなりません）。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record(IndexMap<String, FieldValue>);

impl Record {
    /// 空のレコードを生成
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// フィールドを設定する（同名フィールドは上書き）
    pub fn insert(&mut self, name: String, value: FieldValue) {
        self.0.insert(name, value);
    }

    /// フィールドを削除する
    pub fn remove(&mut self, name: &str) {
        self.0.shift_remove(name);
    }

    /// フィールド値を取得する
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// 格納されたフィールド数
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// フィールドが1つもないか
    ///
    /// 空のレコードはシート出力に含まれません（空行・コメント行のシグナル）。
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// フィールドを挿入順に走査する
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }
}

/// スキーマの1列分の宣言
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldSpec {
    /// フィールド名（フィールド名行のセル文字列、空のこともある）
    pub name: String,

    /// 型タグ
    pub tag: TypeTag,
}

/// 列インデックスからフィールド宣言へのマッピング
///
/// シートごとに固定位置のヘッダー2行（1行目=フィールド名、2行目=型タグ、0始まり）
/// から一度だけ構築されます。同じヘッダー行からは常に同じスキーマが導出されます。
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Schema {
    columns: BTreeMap<u32, FieldSpec>,
}

impl Schema {
    /// 空のスキーマを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// 列の宣言を登録する
    pub fn insert(&mut self, col: u32, spec: FieldSpec) {
        self.columns.insert(col, spec);
    }

    /// 列を列インデックス昇順に走査する
    pub fn columns(&self) -> impl Iterator<Item = (&u32, &FieldSpec)> {
        self.columns.iter()
    }

    /// 登録された列数
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// 列が1つもないか
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// 1シート分の収集結果
#[derive(Debug, Clone, PartialEq)]
pub struct SheetData {
    /// シート名
    pub name: String,

    /// フィルタを通過したレコードの列（シート内の行順）
    pub records: Vec<Record>,
}

/// 1ワークブック分の収集結果
///
/// ベース名はソースファイル名から拡張子を除いたもので、
/// 出力ファイル名`<ベース名>_<シート名>.json`の前半になります。
#[derive(Debug, Clone, PartialEq)]
pub struct WorkbookData {
    /// ワークブックのベース名
    pub name: String,

    /// シートの列（ワークブック内の順）
    pub sheets: Vec<SheetData>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_value_tag() {
        assert_eq!(FieldValue::Int(1).tag(), TypeTag::Int);
        assert_eq!(FieldValue::Long(1).tag(), TypeTag::Long);
        assert_eq!(FieldValue::Float(1.0).tag(), TypeTag::Float);
        assert_eq!(FieldValue::Json(json!(null)).tag(), TypeTag::Json);
        assert_eq!(FieldValue::Text("a".to_string()).tag(), TypeTag::Text);
    }

    #[test]
    fn test_field_value_as_i64() {
        assert_eq!(FieldValue::Int(42).as_i64(), Some(42));
        assert_eq!(FieldValue::Int(-1).as_i64(), Some(-1));
        assert_eq!(FieldValue::Long(1 << 40).as_i64(), Some(1 << 40));
        assert_eq!(FieldValue::Float(42.0).as_i64(), None);
        assert_eq!(FieldValue::Text("42".to_string()).as_i64(), None);
        assert_eq!(FieldValue::Json(json!(42)).as_i64(), None);
    }

    #[test]
    fn test_field_value_serializes_by_variant() {
        assert_eq!(serde_json::to_string(&FieldValue::Int(42)).unwrap(), "42");
        assert_eq!(
            serde_json::to_string(&FieldValue::Long(9_000_000_000)).unwrap(),
            "9000000000"
        );
        assert_eq!(
            serde_json::to_string(&FieldValue::Float(3.14)).unwrap(),
            "3.14"
        );
        assert_eq!(
            serde_json::to_string(&FieldValue::Text("hi".to_string())).unwrap(),
            "\"hi\""
        );
        assert_eq!(
            serde_json::to_string(&FieldValue::Json(json!({"a": [1, 2]}))).unwrap(),
            "{\"a\":[1,2]}"
        );
    }

    #[test]
    fn test_record_preserves_insertion_order() {
        let mut record = Record::new();
        record.insert("id".to_string(), FieldValue::Int(1));
        record.insert("name".to_string(), FieldValue::Text("apple".to_string()));
        record.insert("price".to_string(), FieldValue::Float(1.5));

        let keys: Vec<&String> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["id", "name", "price"]);

        let serialized = serde_json::to_string(&record).unwrap();
        assert_eq!(serialized, "{\"id\":1,\"name\":\"apple\",\"price\":1.5}");
    }

    #[test]
    fn test_record_remove_and_empty() {
        let mut record = Record::new();
        assert!(record.is_empty());

        record.insert("".to_string(), FieldValue::Text("orphan".to_string()));
        assert_eq!(record.len(), 1);

        record.remove("");
        assert!(record.is_empty());
    }

    #[test]
    fn test_schema_iterates_in_column_order() {
        let mut schema = Schema::new();
        schema.insert(
            2,
            FieldSpec {
                name: "c".to_string(),
                tag: TypeTag::Text,
            },
        );
        schema.insert(
            0,
            FieldSpec {
                name: "a".to_string(),
                tag: TypeTag::Int,
            },
        );
        schema.insert(
            1,
            FieldSpec {
                name: "b".to_string(),
                tag: TypeTag::Float,
            },
        );

        let cols: Vec<u32> = schema.columns().map(|(c, _)| *c).collect();
        assert_eq!(cols, [0, 1, 2]);
        assert_eq!(schema.len(), 3);
    }
}
