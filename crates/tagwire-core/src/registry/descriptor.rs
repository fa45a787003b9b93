//! CodecDescriptor - タグと codec の組

use std::fmt;
use std::sync::Arc;

use crate::domain::{Object, ObjectRef, SerializationError, Tag};
use crate::ports::ObjectCodec;
use crate::session::{DeserializationContext, SerializationContext};
use crate::wire::{CodedInput, CodedOutput};

/// CodecDescriptor は割り当て済みタグに結び付いた codec
///
/// # 不変条件
/// - `tag >= 1`（0 は null、負値は backreference 用）
/// - 作成後は変更されない
#[derive(Clone)]
pub struct CodecDescriptor {
    tag: Tag,
    codec: Arc<dyn ObjectCodec>,
}

impl CodecDescriptor {
    pub(crate) fn new(tag: Tag, codec: Arc<dyn ObjectCodec>) -> Self {
        debug_assert!(tag.get() >= 1, "descriptor tags start at 1");
        Self { tag, codec }
    }

    /// wire 上で型を表すタグ
    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn codec(&self) -> &Arc<dyn ObjectCodec> {
        &self.codec
    }

    pub fn serialize(
        &self,
        ctx: &mut SerializationContext<'_>,
        value: &dyn Object,
        out: &mut CodedOutput,
    ) -> Result<(), SerializationError> {
        self.codec.serialize(ctx, value, out)
    }

    pub fn deserialize(
        &self,
        ctx: &mut DeserializationContext<'_>,
        input: &mut CodedInput<'_>,
    ) -> Result<ObjectRef, SerializationError> {
        self.codec.deserialize(ctx, input)
    }
}

impl fmt::Debug for CodecDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecDescriptor")
            .field("codec", &self.codec)
            .field("tag", &self.tag)
            .finish()
    }
}
