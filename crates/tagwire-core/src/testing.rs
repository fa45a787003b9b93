//! テスト用の型・class・codec
//!
//! class 名の並び: `demo.Pair` < `demo.geo.Point` < `demo.shapes.Shape` < `demo.text.Label`
//! なので、全部登録するとタグは Pair=1, Point=2, Shape=3, Label=4 になります。

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{
    Class, CodecConstructionError, EnumInfo, Object, ObjectRef, ReflectEnum, SerializationError,
    Structure,
};
use crate::impl_object;
use crate::impls::{ClassPath, DefaultFallbackFactory};
use crate::ports::{ClassResolver, FallbackCodecFactory, ObjectCodec};
use crate::session::{DeserializationContext, SerializationContext};
use crate::wire::{CodedInput, CodedOutput};

pub static SHAPE: Class = Class::new("demo.shapes.Shape");
pub static CIRCLE: Class = Class::new("demo.shapes.Circle")
    .extends(&SHAPE)
    .with_structure(Structure::of::<Circle>());
pub static SQUARE: Class = Class::new("demo.shapes.Square")
    .extends(&SHAPE)
    .with_structure(Structure::of::<Square>());
pub static TRIANGLE: Class =
    Class::new("demo.shapes.Triangle").with_structure(Structure::of::<Triangle>());
pub static POINT: Class = Class::new("demo.geo.Point");
pub static LABEL: Class = Class::new("demo.text.Label");
pub static PAIR: Class = Class::new("demo.Pair");
pub static HOLDER: Class = Class::new("demo.Holder");
static SHAPE_EXTRAS: [&Class; 1] = [&TRIANGLE];
pub static COLOR: Class = Class::enumeration("demo.Color", EnumInfo::of::<Color>());
pub static STATUS: Class = Class::enumeration("demo.Status", EnumInfo::of::<Status>());
pub static SPECIAL_CASE: Class = Class::enum_case("demo.Status$1", &STATUS);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub radius: f64,
}
impl_object!(Circle => CIRCLE);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Square {
    pub side: f64,
}
impl_object!(Square => SQUARE);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub base: f64,
    pub height: f64,
}
impl_object!(Triangle => TRIANGLE);

#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}
impl_object!(Point => POINT);

#[derive(Debug, Clone, PartialEq)]
pub struct Label(pub String);
impl_object!(Label => LABEL);

#[derive(Debug, Clone)]
pub struct Pair {
    pub left: Option<ObjectRef>,
    pub right: Option<ObjectRef>,
}
impl_object!(Pair => PAIR);

/// 先頭フィールドが自身と同じアドレスに置かれる値
#[repr(C)]
#[derive(Debug, Clone, PartialEq)]
pub struct Holder {
    pub inner: Point,
}
impl_object!(Holder => HOLDER);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
}
impl_object!(Color => COLOR);

impl ReflectEnum for Color {
    const VARIANTS: &'static [&'static str] = &["Red", "Green"];

    fn ordinal(&self) -> usize {
        *self as usize
    }

    fn from_ordinal(ordinal: usize) -> Option<Self> {
        match ordinal {
            0 => Some(Color::Red),
            1 => Some(Color::Green),
            _ => None,
        }
    }
}

/// `Special` だけが case subclass を持つ列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Active,
    Retired,
    Special,
}

impl Object for Status {
    fn class(&self) -> &'static Class {
        match self {
            Status::Special => &SPECIAL_CASE,
            _ => &STATUS,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl ReflectEnum for Status {
    const VARIANTS: &'static [&'static str] = &["Active", "Retired", "Special"];

    fn ordinal(&self) -> usize {
        *self as usize
    }

    fn from_ordinal(ordinal: usize) -> Option<Self> {
        match ordinal {
            0 => Some(Status::Active),
            1 => Some(Status::Retired),
            2 => Some(Status::Special),
            _ => None,
        }
    }
}

fn mismatch(expected: &Class, value: &dyn Object) -> SerializationError {
    SerializationError::TypeMismatch {
        expected: expected.name().to_string(),
        found: value.class().name().to_string(),
    }
}

#[derive(Debug)]
pub struct PointCodec;

impl ObjectCodec for PointCodec {
    fn encoded_class(&self) -> &'static Class {
        &POINT
    }

    fn serialize(
        &self,
        _ctx: &mut SerializationContext<'_>,
        value: &dyn Object,
        out: &mut CodedOutput,
    ) -> Result<(), SerializationError> {
        let point = value
            .downcast_ref::<Point>()
            .ok_or_else(|| mismatch(&POINT, value))?;
        out.write_sint32(point.x);
        out.write_sint32(point.y);
        Ok(())
    }

    fn deserialize(
        &self,
        _ctx: &mut DeserializationContext<'_>,
        input: &mut CodedInput<'_>,
    ) -> Result<ObjectRef, SerializationError> {
        let x = input.read_sint32()?;
        let y = input.read_sint32()?;
        Ok(Arc::new(Point { x, y }))
    }
}

#[derive(Debug)]
pub struct LabelCodec;

impl ObjectCodec for LabelCodec {
    fn encoded_class(&self) -> &'static Class {
        &LABEL
    }

    fn serialize(
        &self,
        _ctx: &mut SerializationContext<'_>,
        value: &dyn Object,
        out: &mut CodedOutput,
    ) -> Result<(), SerializationError> {
        let label = value
            .downcast_ref::<Label>()
            .ok_or_else(|| mismatch(&LABEL, value))?;
        out.write_str(&label.0);
        Ok(())
    }

    fn deserialize(
        &self,
        _ctx: &mut DeserializationContext<'_>,
        input: &mut CodedInput<'_>,
    ) -> Result<ObjectRef, SerializationError> {
        Ok(Arc::new(Label(input.read_str()?.to_string())))
    }
}

/// Shape 系（と Triangle）を class 名 + 構造で書き出す codec
#[derive(Debug)]
pub struct ShapeCodec;

impl ObjectCodec for ShapeCodec {
    fn encoded_class(&self) -> &'static Class {
        &SHAPE
    }

    fn additional_encoded_classes(&self) -> &'static [&'static Class] {
        &SHAPE_EXTRAS
    }

    fn serialize(
        &self,
        _ctx: &mut SerializationContext<'_>,
        value: &dyn Object,
        out: &mut CodedOutput,
    ) -> Result<(), SerializationError> {
        let class = value.class();
        let structure = class.structure().ok_or_else(|| mismatch(&SHAPE, value))?;
        out.write_str(class.name());
        out.write_bytes(&serde_json::to_vec(&structure.encode(value)?)?);
        Ok(())
    }

    fn deserialize(
        &self,
        _ctx: &mut DeserializationContext<'_>,
        input: &mut CodedInput<'_>,
    ) -> Result<ObjectRef, SerializationError> {
        let name = input.read_str()?;
        let class = shape_class_path()
            .resolve(name)
            .map_err(|_| SerializationError::TypeMismatch {
                expected: SHAPE.name().to_string(),
                found: name.to_string(),
            })?;
        let structure = class.structure().ok_or_else(|| SerializationError::TypeMismatch {
            expected: SHAPE.name().to_string(),
            found: name.to_string(),
        })?;
        let json: serde_json::Value = serde_json::from_slice(input.read_bytes()?)?;
        structure.decode(json)
    }
}

fn shape_class_path() -> ClassPath {
    ClassPath::new().with(&CIRCLE).with(&SQUARE).with(&TRIANGLE)
}

/// 入れ子の値をセッション経由で書き出す codec
#[derive(Debug)]
pub struct PairCodec;

impl ObjectCodec for PairCodec {
    fn encoded_class(&self) -> &'static Class {
        &PAIR
    }

    fn serialize(
        &self,
        ctx: &mut SerializationContext<'_>,
        value: &dyn Object,
        out: &mut CodedOutput,
    ) -> Result<(), SerializationError> {
        let pair = value
            .downcast_ref::<Pair>()
            .ok_or_else(|| mismatch(&PAIR, value))?;
        ctx.serialize(pair.left.as_deref(), out)?;
        ctx.serialize(pair.right.as_deref(), out)
    }

    fn deserialize(
        &self,
        ctx: &mut DeserializationContext<'_>,
        input: &mut CodedInput<'_>,
    ) -> Result<ObjectRef, SerializationError> {
        let left = ctx.deserialize(input)?;
        let right = ctx.deserialize(input)?;
        Ok(Arc::new(Pair { left, right }))
    }
}

/// 全ての明示 codec
pub fn explicit_codecs() -> Vec<Arc<dyn ObjectCodec>> {
    vec![
        Arc::new(PointCodec),
        Arc::new(LabelCodec),
        Arc::new(ShapeCodec),
        Arc::new(PairCodec),
    ]
}

/// fallback 対象になり得る class
pub fn demo_class_path() -> ClassPath {
    ClassPath::new()
        .with(&CIRCLE)
        .with(&SQUARE)
        .with(&SHAPE)
        .with(&COLOR)
        .with(&STATUS)
}

/// 構築回数を数える FallbackCodecFactory
#[derive(Debug, Default)]
pub struct CountingFactory {
    pub calls: AtomicUsize,
}

impl CountingFactory {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FallbackCodecFactory for CountingFactory {
    fn enum_codec(
        &self,
        class: &'static Class,
    ) -> Result<Arc<dyn ObjectCodec>, CodecConstructionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        DefaultFallbackFactory.enum_codec(class)
    }

    fn dynamic_codec(
        &self,
        class: &'static Class,
    ) -> Result<Arc<dyn ObjectCodec>, CodecConstructionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        DefaultFallbackFactory.dynamic_codec(class)
    }
}

/// 解決回数を数える ClassResolver
#[derive(Debug)]
pub struct CountingResolver {
    pub inner: ClassPath,
    pub calls: AtomicUsize,
}

impl CountingResolver {
    pub fn new(inner: ClassPath) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ClassResolver for CountingResolver {
    fn resolve(&self, name: &str) -> Result<&'static Class, CodecConstructionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve(name)
    }
}
