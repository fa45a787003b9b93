//! DynamicCodec - 手書き codec 無しで構造を書き出す fallback codec
//!
//! # 学習ポイント
//! - `serde_json::Value` を中間表現にした型消去
//! - 長さ prefix 付きの JSON バイト列として wire に載せる

use crate::domain::{
    Class, CodecConstructionError, Object, ObjectRef, SerializationError, Structure,
};
use crate::ports::ObjectCodec;
use crate::session::{DeserializationContext, SerializationContext};
use crate::wire::{CodedInput, CodedOutput};

/// DynamicCodec は class の Structure を使って値を JSON として encode する
#[derive(Debug)]
pub struct DynamicCodec {
    class: &'static Class,
    structure: Structure,
}

impl DynamicCodec {
    pub fn new(class: &'static Class) -> Result<Self, CodecConstructionError> {
        let structure = *class.structure().ok_or_else(|| {
            CodecConstructionError::UnsupportedStructure(class.name().to_string())
        })?;
        Ok(Self { class, structure })
    }
}

impl ObjectCodec for DynamicCodec {
    fn encoded_class(&self) -> &'static Class {
        self.class
    }

    fn serialize(
        &self,
        _ctx: &mut SerializationContext<'_>,
        value: &dyn Object,
        out: &mut CodedOutput,
    ) -> Result<(), SerializationError> {
        let json = self.structure.encode(value)?;
        out.write_bytes(&serde_json::to_vec(&json)?);
        Ok(())
    }

    fn deserialize(
        &self,
        _ctx: &mut DeserializationContext<'_>,
        input: &mut CodedInput<'_>,
    ) -> Result<ObjectRef, SerializationError> {
        let json: serde_json::Value = serde_json::from_slice(input.read_bytes()?)?;
        self.structure.decode(json)
    }
}
