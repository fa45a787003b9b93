//! Impls - ports の標準実装
//!
//! - **ClassPath**: 明示登録された ClassResolver
//! - **DefaultFallbackFactory**: EnumCodec / DynamicCodec を返す FallbackCodecFactory

pub mod class_path;
pub mod default_factory;
pub mod dynamic_codec;
pub mod enum_codec;

pub use self::class_path::ClassPath;
pub use self::default_factory::DefaultFallbackFactory;
pub use self::dynamic_codec::DynamicCodec;
pub use self::enum_codec::EnumCodec;
