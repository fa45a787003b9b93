//! ObjectCodec port - 1 つの論理型の encode/decode
//!
//! # 学習ポイント
//! - Object-safe trait（`Arc<dyn ObjectCodec>` としてレジストリに格納）
//! - デフォルト実装付きメソッド（`additional_encoded_classes`）

use std::fmt;

use crate::domain::{Class, Object, ObjectRef, SerializationError};
use crate::session::{DeserializationContext, SerializationContext};
use crate::wire::{CodedInput, CodedOutput};

/// ObjectCodec は 1 つの論理型を serialize / deserialize する
///
/// # 使用例
/// ```ignore
/// #[derive(Debug)]
/// struct PointCodec;
///
/// impl ObjectCodec for PointCodec {
///     fn encoded_class(&self) -> &'static Class { &POINT }
///     fn serialize(&self, _ctx: &mut SerializationContext<'_>, value: &dyn Object, out: &mut CodedOutput)
///         -> Result<(), SerializationError> { ... }
///     fn deserialize(&self, _ctx: &mut DeserializationContext<'_>, input: &mut CodedInput<'_>)
///         -> Result<ObjectRef, SerializationError> { ... }
/// }
/// ```
pub trait ObjectCodec: Send + Sync + fmt::Debug {
    /// この codec の primary class。タグの並び順はこの名前で決まる
    fn encoded_class(&self) -> &'static Class;

    /// primary class 以外にこの codec が扱う class
    fn additional_encoded_classes(&self) -> &'static [&'static Class] {
        &[]
    }

    fn serialize(
        &self,
        ctx: &mut SerializationContext<'_>,
        value: &dyn Object,
        out: &mut CodedOutput,
    ) -> Result<(), SerializationError>;

    fn deserialize(
        &self,
        ctx: &mut DeserializationContext<'_>,
        input: &mut CodedInput<'_>,
    ) -> Result<ObjectRef, SerializationError>;
}
