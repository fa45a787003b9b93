//! ClassResolver port - class 名から Class を引く
//!
//! fallback codec は class 名だけを知っている状態から構築されるため、
//! 名前を実行時の型記述子に解決する手段が必要です。
//!
//! # 実装
//! - **ClassPath**: 明示登録されたテーブル（`impls::class_path`）

use crate::domain::{Class, CodecConstructionError};

/// ClassResolver は class 名を `'static` な Class に解決する
///
/// # Thread Safety
/// - `Send + Sync` を要求（fallback codec は任意のスレッドから初回構築される）
pub trait ClassResolver: Send + Sync {
    fn resolve(&self, name: &str) -> Result<&'static Class, CodecConstructionError>;
}
