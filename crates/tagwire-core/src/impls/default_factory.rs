//! DefaultFallbackFactory - 標準の fallback codec 生成器

use std::sync::Arc;

use super::dynamic_codec::DynamicCodec;
use super::enum_codec::EnumCodec;
use crate::domain::{Class, CodecConstructionError};
use crate::ports::{FallbackCodecFactory, ObjectCodec};

/// DefaultFallbackFactory は列挙型に EnumCodec、それ以外に DynamicCodec を返す
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFallbackFactory;

impl FallbackCodecFactory for DefaultFallbackFactory {
    fn enum_codec(
        &self,
        class: &'static Class,
    ) -> Result<Arc<dyn ObjectCodec>, CodecConstructionError> {
        Ok(Arc::new(EnumCodec::new(class)?))
    }

    fn dynamic_codec(
        &self,
        class: &'static Class,
    ) -> Result<Arc<dyn ObjectCodec>, CodecConstructionError> {
        Ok(Arc::new(DynamicCodec::new(class)?))
    }
}
