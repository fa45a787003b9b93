//! tagwire-core
//!
//! Codec registry for a tag-based binary object serializer.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（Tag, Class, Object, errors）
//! - **ports**: 抽象化レイヤー（ObjectCodec, ClassResolver, FallbackCodecFactory）
//! - **registry**: CodecRegistry / RegistryBuilder / タグ割り当て
//! - **impls**: 実装（ClassPath, DefaultFallbackFactory, EnumCodec, DynamicCodec）
//! - **session**: タグプロトコル（null, 定数, codec）
//! - **wire**: varint などのバイト列プリミティブ
//! - **config**: RegistryConfig（JSON）

pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod registry;
pub mod session;
pub mod wire;

#[cfg(test)]
mod testing;

pub use self::config::{ConfigError, RegistryConfig};
pub use self::domain::{
    Class, NoCodecAvailable, Object, ObjectRef, RegistryError, SerializationError, Tag,
};
pub use self::registry::{CodecDescriptor, CodecRegistry, RegistryBuilder, TagLayout};
pub use self::session::{
    DeserializationContext, SerializationContext, deserialize_from_bytes, serialize_to_bytes,
};
