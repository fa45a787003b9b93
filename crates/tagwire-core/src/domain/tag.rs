//! Tag - wire 上の型識別子
//!
//! # タグ空間
//! - `0`: null
//! - `< 0`: backreference（セッション層が所有、ここでは発行しない）
//! - `1..=E`: 明示 codec（primary class 名の昇順）
//! - `E+1..=E+C`: 定数（登録順）
//! - `E+C+1..=E+C+F`: fallback class 名（辞書順）

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag は codec / 定数 / fallback class を表すコンパクトな整数
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(i32);

impl Tag {
    /// null を表す予約タグ
    pub const NULL: Tag = Tag(0);

    /// 最初に割り当てられるタグ
    pub const FIRST: Tag = Tag(1);

    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// backreference 用の負のタグかどうか
    pub const fn is_backreference(self) -> bool {
        self.0 < 0
    }

    /// `offset` 個先のタグ
    pub(crate) fn offset(self, offset: usize) -> Self {
        Self(self.0 + offset as i32)
    }
}

impl From<i32> for Tag {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
