//! Class - 実行時型記述子
//!
//! Rust には reflection が無いため、エンコード対象の型は `'static` な
//! [`Class`] を自分で宣言して opt-in します。
//!
//! # 学習ポイント
//! - `const fn` による static 初期化（`static CIRCLE: Class = Class::new(..).extends(&SHAPE)`）
//! - ジェネリック関数を fn pointer に落とした型消去（`Structure::of::<T>()`）
//! - `std::iter::successors` による祖先チェーンの走査

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use super::errors::SerializationError;
use super::object::{Object, ObjectRef};

type EncodeFn = fn(&dyn Object) -> Result<serde_json::Value, SerializationError>;
type DecodeFn = fn(serde_json::Value) -> Result<ObjectRef, SerializationError>;
type OrdinalFn = fn(&dyn Object) -> Option<usize>;
type FromOrdinalFn = fn(usize) -> Option<ObjectRef>;

/// Class は 1 つの具象型を表す
///
/// # 使用例
/// ```ignore
/// static SHAPE: Class = Class::new("demo.Shape");
/// static CIRCLE: Class = Class::new("demo.Circle")
///     .extends(&SHAPE)
///     .with_structure(Structure::of::<Circle>());
/// ```
///
/// # 不変条件
/// - `name` はプロセス内で一意（class index のキーになる）
/// - 祖先は `superclass` の単一チェーンのみ
#[derive(Clone, Copy)]
pub struct Class {
    name: &'static str,
    superclass: Option<&'static Class>,
    kind: ClassKind,
}

/// ClassKind は fallback codec の選び方を決める
#[derive(Debug, Clone, Copy)]
pub enum ClassKind {
    /// 通常の型。`structure` が無ければ構造的な fallback は作れない
    Plain { structure: Option<Structure> },
    /// 列挙型（宣言側の class）
    Enum(EnumInfo),
    /// case ごとの subclass。superclass が宣言側の列挙型
    EnumCase,
}

impl Class {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            superclass: None,
            kind: ClassKind::Plain { structure: None },
        }
    }

    /// 列挙型の class を作成
    pub const fn enumeration(name: &'static str, info: EnumInfo) -> Self {
        Self {
            name,
            superclass: None,
            kind: ClassKind::Enum(info),
        }
    }

    /// 列挙型 `declaring` の case 専用 subclass を作成
    pub const fn enum_case(name: &'static str, declaring: &'static Class) -> Self {
        Self {
            name,
            superclass: Some(declaring),
            kind: ClassKind::EnumCase,
        }
    }

    pub const fn extends(self, superclass: &'static Class) -> Self {
        Self {
            superclass: Some(superclass),
            ..self
        }
    }

    pub const fn with_structure(self, structure: Structure) -> Self {
        Self {
            kind: ClassKind::Plain {
                structure: Some(structure),
            },
            ..self
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn superclass(&self) -> Option<&'static Class> {
        self.superclass
    }

    pub fn kind(&self) -> &ClassKind {
        &self.kind
    }

    /// 列挙型そのもの、または列挙型の case subclass か
    pub fn is_enum(&self) -> bool {
        matches!(self.kind, ClassKind::Enum(_) | ClassKind::EnumCase)
    }

    pub fn enum_info(&self) -> Option<&EnumInfo> {
        match &self.kind {
            ClassKind::Enum(info) => Some(info),
            _ => None,
        }
    }

    pub fn structure(&self) -> Option<&Structure> {
        match &self.kind {
            ClassKind::Plain { structure } => structure.as_ref(),
            _ => None,
        }
    }

    /// 列挙型の値が属する宣言側の class
    ///
    /// case subclass なら superclass、それ以外は自分自身。
    pub fn declaring_class(&'static self) -> &'static Class {
        match (self.kind, self.superclass) {
            (ClassKind::EnumCase, Some(declaring)) => declaring,
            _ => self,
        }
    }

    /// 自分自身から始まる祖先チェーン
    pub fn ancestry(&'static self) -> impl Iterator<Item = &'static Class> {
        std::iter::successors(Some(self), |class| class.superclass)
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Class {}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("superclass", &self.superclass.map(Class::name))
            .field("kind", &self.kind)
            .finish()
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Structure は serde による構造的 encode/decode の thunk
///
/// `DynamicCodec` はこれを使って手書き codec 無しで値を書き出します。
#[derive(Clone, Copy)]
pub struct Structure {
    encode: EncodeFn,
    decode: DecodeFn,
}

impl Structure {
    pub const fn of<T>() -> Self
    where
        T: Object + Serialize + DeserializeOwned,
    {
        Self {
            encode: encode_structure::<T>,
            decode: decode_structure::<T>,
        }
    }

    pub fn encode(&self, value: &dyn Object) -> Result<serde_json::Value, SerializationError> {
        (self.encode)(value)
    }

    pub fn decode(&self, value: serde_json::Value) -> Result<ObjectRef, SerializationError> {
        (self.decode)(value)
    }
}

impl fmt::Debug for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Structure")
    }
}

fn encode_structure<T>(value: &dyn Object) -> Result<serde_json::Value, SerializationError>
where
    T: Object + Serialize,
{
    let typed = downcast::<T>(value)?;
    Ok(serde_json::to_value(typed)?)
}

fn decode_structure<T>(value: serde_json::Value) -> Result<ObjectRef, SerializationError>
where
    T: Object + DeserializeOwned,
{
    let typed: T = serde_json::from_value(value)?;
    Ok(Arc::new(typed))
}

fn downcast<T: Object>(value: &dyn Object) -> Result<&T, SerializationError> {
    value
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| SerializationError::TypeMismatch {
            expected: type_name::<T>().to_string(),
            found: value.class().name().to_string(),
        })
}

/// ReflectEnum は列挙型を ordinal で扱えるようにする
///
/// # 使用例
/// ```ignore
/// impl ReflectEnum for Color {
///     const VARIANTS: &'static [&'static str] = &["Red", "Green"];
///     fn ordinal(&self) -> usize { *self as usize }
///     fn from_ordinal(ordinal: usize) -> Option<Self> { ... }
/// }
/// ```
pub trait ReflectEnum: Object + Sized {
    const VARIANTS: &'static [&'static str];

    fn ordinal(&self) -> usize;

    fn from_ordinal(ordinal: usize) -> Option<Self>;
}

/// EnumInfo は列挙型の case 情報
#[derive(Clone, Copy)]
pub struct EnumInfo {
    variants: &'static [&'static str],
    ordinal: OrdinalFn,
    from_ordinal: FromOrdinalFn,
}

impl EnumInfo {
    pub const fn of<T: ReflectEnum>() -> Self {
        Self {
            variants: T::VARIANTS,
            ordinal: ordinal_of::<T>,
            from_ordinal: from_ordinal::<T>,
        }
    }

    pub fn variants(&self) -> &'static [&'static str] {
        self.variants
    }

    /// 値の ordinal。別の型の値なら `None`
    pub fn ordinal(&self, value: &dyn Object) -> Option<usize> {
        (self.ordinal)(value)
    }

    pub fn from_ordinal(&self, ordinal: usize) -> Option<ObjectRef> {
        (self.from_ordinal)(ordinal)
    }
}

impl fmt::Debug for EnumInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumInfo")
            .field("variants", &self.variants)
            .finish()
    }
}

fn ordinal_of<T: ReflectEnum>(value: &dyn Object) -> Option<usize> {
    value.as_any().downcast_ref::<T>().map(T::ordinal)
}

fn from_ordinal<T: ReflectEnum>(ordinal: usize) -> Option<ObjectRef> {
    T::from_ordinal(ordinal).map(|value| Arc::new(value) as ObjectRef)
}
