use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use tagwire_core::domain::{EnumInfo, ReflectEnum, Structure};
use tagwire_core::impls::ClassPath;
use tagwire_core::ports::ObjectCodec;
use tagwire_core::session::{DeserializationContext, SerializationContext};
use tagwire_core::wire::{CodedInput, CodedOutput};
use tagwire_core::{
    Class, CodecRegistry, Object, ObjectRef, RegistryConfig, SerializationError,
    deserialize_from_bytes, impl_object, serialize_to_bytes,
};

#[derive(Debug, Parser)]
#[command(name = "tagwire", about = "Codec registry demo")]
struct Cli {
    /// Registry configuration (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the tag layout as JSON
    Layout,
    /// Encode and decode the sample values
    Roundtrip,
}

// デモ用の型
static POINT: Class = Class::new("demo.geo.Point");
static CIRCLE: Class = Class::new("demo.shapes.Circle").with_structure(Structure::of::<Circle>());
static COLOR: Class = Class::enumeration("demo.Color", EnumInfo::of::<Color>());

#[derive(Debug, Clone, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}
impl_object!(Point => POINT);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Circle {
    radius: f64,
}
impl_object!(Circle => CIRCLE);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Green,
    Blue,
}
impl_object!(Color => COLOR);

impl ReflectEnum for Color {
    const VARIANTS: &'static [&'static str] = &["Red", "Green", "Blue"];

    fn ordinal(&self) -> usize {
        *self as usize
    }

    fn from_ordinal(ordinal: usize) -> Option<Self> {
        match ordinal {
            0 => Some(Color::Red),
            1 => Some(Color::Green),
            2 => Some(Color::Blue),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct PointCodec;

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
            .ok_or_else(|| SerializationError::TypeMismatch {
                expected: POINT.name().to_string(),
                found: value.class().name().to_string(),
            })?;
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

fn default_config() -> RegistryConfig {
    RegistryConfig {
        allow_default_codec: true,
        fallback_classes: vec![CIRCLE.name().to_string(), COLOR.name().to_string()],
    }
}

fn build_registry(
    config: &RegistryConfig,
    origin: ObjectRef,
) -> Result<CodecRegistry, Box<dyn Error>> {
    let class_path = ClassPath::new().with(&CIRCLE).with(&COLOR);
    let registry = CodecRegistry::builder()
        .add_codec(Arc::new(PointCodec))
        .add_constant(origin)?
        .class_resolver(Arc::new(class_path))
        .with_config(config)
        .build()?;
    Ok(registry)
}

fn roundtrip(registry: &CodecRegistry, samples: &[Option<ObjectRef>]) {
    for sample in samples {
        let bytes = match serialize_to_bytes(registry, sample.as_deref()) {
            Ok(bytes) => bytes,
            Err(e) => {
                println!("{sample:?}: encode failed: {e}");
                continue;
            }
        };
        match deserialize_from_bytes(registry, &bytes) {
            Ok(decoded) => println!("{sample:?} -> {bytes:02x?} -> {decoded:?}"),
            Err(e) => println!("{sample:?} -> {bytes:02x?}: decode failed: {e}"),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => RegistryConfig::from_path(path)?,
        None => default_config(),
    };
    tracing::debug!(?config, "loaded registry config");

    let origin: ObjectRef = Arc::new(Point { x: 0, y: 0 });
    let registry = build_registry(&config, origin.clone())?;

    match cli.command.unwrap_or(Command::Layout) {
        Command::Layout => {
            println!("{}", serde_json::to_string_pretty(&registry.layout())?);
        }
        Command::Roundtrip => {
            let samples: Vec<Option<ObjectRef>> = vec![
                None,
                Some(origin),
                Some(Arc::new(Point { x: 3, y: -4 }) as ObjectRef),
                Some(Arc::new(Circle { radius: 1.5 }) as ObjectRef),
                Some(Arc::new(Color::Blue) as ObjectRef),
            ];
            roundtrip(&registry, &samples);
        }
    }
    Ok(())
}
