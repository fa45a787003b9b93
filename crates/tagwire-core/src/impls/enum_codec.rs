//! EnumCodec - 列挙型を ordinal で encode する fallback codec

use crate::domain::{
    Class, CodecConstructionError, EnumInfo, Object, ObjectRef, SerializationError,
};
use crate::ports::ObjectCodec;
use crate::session::{DeserializationContext, SerializationContext};
use crate::wire::{CodedInput, CodedOutput};

/// EnumCodec は case の ordinal を varint で書き出す
///
/// 宣言側の class に対してのみ作られ、case subclass の値も同じ codec を通ります。
#[derive(Debug)]
pub struct EnumCodec {
    class: &'static Class,
    info: EnumInfo,
}

impl EnumCodec {
    pub fn new(class: &'static Class) -> Result<Self, CodecConstructionError> {
        let info = *class
            .enum_info()
            .ok_or_else(|| CodecConstructionError::NotAnEnum(class.name().to_string()))?;
        Ok(Self { class, info })
    }
}

impl ObjectCodec for EnumCodec {
    fn encoded_class(&self) -> &'static Class {
        self.class
    }

    fn serialize(
        &self,
        _ctx: &mut SerializationContext<'_>,
        value: &dyn Object,
        out: &mut CodedOutput,
    ) -> Result<(), SerializationError> {
        let ordinal = self
            .info
            .ordinal(value)
            .ok_or_else(|| SerializationError::TypeMismatch {
                expected: self.class.name().to_string(),
                found: value.class().name().to_string(),
            })?;
        out.write_varint(ordinal as u64);
        Ok(())
    }

    fn deserialize(
        &self,
        _ctx: &mut DeserializationContext<'_>,
        input: &mut CodedInput<'_>,
    ) -> Result<ObjectRef, SerializationError> {
        let ordinal = input.read_varint()?;
        usize::try_from(ordinal)
            .ok()
            .and_then(|ordinal| self.info.from_ordinal(ordinal))
            .ok_or_else(|| SerializationError::UnknownOrdinal {
                class: self.class.name().to_string(),
                ordinal,
            })
    }
}
