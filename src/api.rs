//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

use std::fmt;

/// JSON出力スタイル
///
/// キー付きレコードをJSONドキュメントとして書き出す際の整形方法を指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum JsonStyle {
    /// 固定インデント（スペース4つ）で整形して出力（デフォルト）
    ///
    /// # 出力例
    ///
    /// ```json
    /// {
    ///     "1": {
    ///         "id": 1,
    ///         "name": "apple"
    ///     }
    /// }
    /// ```
    Pretty,

    /// 改行・インデントなしで出力
    ///
    /// 例: `{"1":{"id":1,"name":"apple"}}`
    Compact,
}

/// 列の型タグ
///
/// シートの型タグ行（2行目、0始まり）に書かれた文字列から導出される閉じた集合です。
/// `int` / `long` / `float` / `json` 以外の値（空文字列を含む）はすべて
/// `Text` として扱われます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// `int`: 32bit符号付き整数
    Int,

    /// `long`: 64bit符号付き整数
    Long,

    /// `float`: 倍精度浮動小数点数
    Float,

    /// `json`: セル文字列をJSON値（スカラー・配列・オブジェクト）としてデコード
    Json,

    /// 上記以外: セル文字列をそのまま保持
    Text,
}

impl TypeTag {
    /// 型タグ行のセル文字列からタグを導出する
    ///
    /// 未知のタグ・空文字列は `Text` になります。
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use xlsxrec::TypeTag;
    ///
    /// assert_eq!(TypeTag::from_tag("int"), TypeTag::Int);
    /// assert_eq!(TypeTag::from_tag("long"), TypeTag::Long);
    /// assert_eq!(TypeTag::from_tag(""), TypeTag::Text);
    /// assert_eq!(TypeTag::from_tag("string"), TypeTag::Text);
    /// ```
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "int" => TypeTag::Int,
            "long" => TypeTag::Long,
            "float" => TypeTag::Float,
            "json" => TypeTag::Json,
            _ => TypeTag::Text,
        }
    }

    /// タグ文字列表現を返す
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Int => "int",
            TypeTag::Long => "long",
            TypeTag::Float => "float",
            TypeTag::Json => "json",
            TypeTag::Text => "text",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_known() {
        assert_eq!(TypeTag::from_tag("int"), TypeTag::Int);
        assert_eq!(TypeTag::from_tag("long"), TypeTag::Long);
        assert_eq!(TypeTag::from_tag("float"), TypeTag::Float);
        assert_eq!(TypeTag::from_tag("json"), TypeTag::Json);
    }

    #[test]
    fn test_from_tag_defaults_to_text() {
        assert_eq!(TypeTag::from_tag(""), TypeTag::Text);
        assert_eq!(TypeTag::from_tag("string"), TypeTag::Text);
        assert_eq!(TypeTag::from_tag("INT"), TypeTag::Text);
        assert_eq!(TypeTag::from_tag("int "), TypeTag::Text);
    }

    #[test]
    fn test_display() {
        assert_eq!(TypeTag::Int.to_string(), "int");
        assert_eq!(TypeTag::Long.to_string(), "long");
        assert_eq!(TypeTag::Float.to_string(), "float");
        assert_eq!(TypeTag::Json.to_string(), "json");
        assert_eq!(TypeTag::Text.to_string(), "text");
    }
}
