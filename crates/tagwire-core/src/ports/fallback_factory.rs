//! FallbackCodecFactory port - 明示 codec が無い型の codec を作る
//!
//! # 実装
//! - **DefaultFallbackFactory**: EnumCodec / DynamicCodec を返す（`impls::default_factory`）

use std::sync::Arc;

use crate::domain::{Class, CodecConstructionError};
use crate::ports::ObjectCodec;

/// FallbackCodecFactory は解決済みの Class から codec を構築する
///
/// レジストリは class 名ごとに高々 1 回しか呼び出しません。
pub trait FallbackCodecFactory: Send + Sync {
    /// 列挙型（宣言側の class）用の codec
    fn enum_codec(
        &self,
        class: &'static Class,
    ) -> Result<Arc<dyn ObjectCodec>, CodecConstructionError>;

    /// 構造的な汎用 codec
    fn dynamic_codec(
        &self,
        class: &'static Class,
    ) -> Result<Arc<dyn ObjectCodec>, CodecConstructionError>;
}
