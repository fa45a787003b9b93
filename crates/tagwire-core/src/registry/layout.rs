//! TagLayout - タグ空間のスナップショット
//!
//! 2 つのレジストリが同じ wire 形式を話すかどうかは、このレイアウトを比較すれば分かります。

use serde::{Deserialize, Serialize};

use crate::domain::Tag;

/// TagLayout はレジストリの全タグ割り当て
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagLayout {
    pub allow_default_codec: bool,
    /// 明示 codec（primary class 名）
    pub explicit: Vec<TagEntry>,
    /// 定数（値の class 名）
    pub constants: Vec<TagEntry>,
    /// fallback class 名。fallback 無効なら空
    pub fallback: Vec<TagEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEntry {
    pub tag: Tag,
    pub name: String,
}

impl TagEntry {
    pub(crate) fn new(tag: Tag, name: impl Into<String>) -> Self {
        Self {
            tag,
            name: name.into(),
        }
    }
}

impl TagLayout {
    /// 最大のタグ。何も登録されていなければ `None`
    pub fn max_tag(&self) -> Option<Tag> {
        self.explicit
            .iter()
            .chain(&self.constants)
            .chain(&self.fallback)
            .map(|entry| entry.tag)
            .max()
    }
}
