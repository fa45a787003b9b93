//! Domain - ドメインモデル
//!
//! - **tag**: wire 上の型識別子
//! - **class**: opt-in の実行時型記述子
//! - **object**: エンコード可能な値と identity
//! - **errors**: エラー型

pub mod class;
pub mod errors;
pub mod object;
pub mod tag;

pub use self::class::{Class, ClassKind, EnumInfo, ReflectEnum, Structure};
pub use self::errors::{
    CodecConstructionError, NoCodecAvailable, RegistryError, SerializationError,
};
pub use self::object::{Object, ObjectRef};
pub use self::tag::Tag;
