//! Ports - 抽象化レイヤー
//!
//! レジストリが外部の協力者に求めるインターフェースを定義します。
//! codec の中身、型の解決、fallback codec の生成はいずれも差し替え可能です。

pub mod class_resolver;
pub mod codec;
pub mod fallback_factory;

// 主要な trait を再エクスポート
pub use self::class_resolver::ClassResolver;
pub use self::codec::ObjectCodec;
pub use self::fallback_factory::FallbackCodecFactory;
