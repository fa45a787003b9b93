//! Session - レジストリ上のタグプロトコル
//!
//! # 学習ポイント
//! - タグ `0` は null、定数は codec より先に照合する
//! - それ以外は `resolve` / `resolve_by_tag` で codec を引く
//! - codec は context を受け取り、入れ子の値も同じプロトコルで読み書きする
//! - 入れ子の深さには上限があり、細工された入力でもスタックを使い切らない
//!
//! backreference（負のタグ）とインスタンスのメモ化はここでは扱わず、拒否します。

use crate::domain::{Object, ObjectRef, SerializationError, Tag};
use crate::registry::CodecRegistry;
use crate::wire::{CodedInput, CodedOutput};

/// 1 回の decode で許す codec の入れ子の深さ
pub const MAX_NESTING_DEPTH: usize = 128;

/// 書き込み側のセッション。codec はこれを通して入れ子の値を書く
pub struct SerializationContext<'a> {
    registry: &'a CodecRegistry,
}

impl<'a> SerializationContext<'a> {
    pub fn new(registry: &'a CodecRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a CodecRegistry {
        self.registry
    }

    /// タグ、続けて codec の payload を書く
    pub fn serialize(
        &mut self,
        value: Option<&dyn Object>,
        out: &mut CodedOutput,
    ) -> Result<(), SerializationError> {
        let Some(value) = value else {
            out.write_tag(Tag::NULL);
            return Ok(());
        };
        if let Some(tag) = self.registry.constant_value_to_tag(value) {
            out.write_tag(tag);
            return Ok(());
        }
        let descriptor = self.registry.resolve(value)?;
        out.write_tag(descriptor.tag());
        descriptor.serialize(self, value, out)
    }
}

/// 読み込み側のセッション。codec はこれを通して入れ子の値を読む
pub struct DeserializationContext<'a> {
    registry: &'a CodecRegistry,
    depth: usize,
}

impl<'a> DeserializationContext<'a> {
    pub fn new(registry: &'a CodecRegistry) -> Self {
        Self { registry, depth: 0 }
    }

    pub fn registry(&self) -> &'a CodecRegistry {
        self.registry
    }

    /// 現在 decode 中の codec の入れ子の深さ
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn deserialize(
        &mut self,
        input: &mut CodedInput<'_>,
    ) -> Result<Option<ObjectRef>, SerializationError> {
        let tag = input.read_tag()?;
        if tag.is_null() {
            return Ok(None);
        }
        if tag.is_backreference() {
            return Err(SerializationError::UnsupportedBackreference(tag));
        }
        if let Some(constant) = self.registry.tag_to_constant(tag) {
            return Ok(Some(constant.clone()));
        }
        let descriptor = self.registry.resolve_by_tag(tag)?;
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(SerializationError::DepthLimitExceeded {
                limit: MAX_NESTING_DEPTH,
            });
        }
        self.depth += 1;
        let result = descriptor.deserialize(self, input);
        self.depth -= 1;
        result.map(Some)
    }
}

/// 1 つの値（null 可）を新しいバッファに encode する
pub fn serialize_to_bytes(
    registry: &CodecRegistry,
    value: Option<&dyn Object>,
) -> Result<Vec<u8>, SerializationError> {
    let mut out = CodedOutput::new();
    SerializationContext::new(registry).serialize(value, &mut out)?;
    Ok(out.into_bytes())
}

/// `bytes` から 1 つの値（null 可）を decode する
pub fn deserialize_from_bytes(
    registry: &CodecRegistry,
    bytes: &[u8],
) -> Result<Option<ObjectRef>, SerializationError> {
    let mut input = CodedInput::new(bytes);
    DeserializationContext::new(registry).deserialize(&mut input)
}
