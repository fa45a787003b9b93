//! RegistryBuilder - レジストリの構築
//!
//! # 学習ポイント
//! - Builder パターン（`self` を消費して返すチェーン）
//! - 構築時検証（Fail-fast 設計）: 定数の二重登録、class の取り合い
//! - タグ割り当ては `build()` の中で 1 回だけ行う

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use super::CodecRegistry;
use super::class_index::ClassIndex;
use super::constants::ConstantTable;
use super::dynamic::DynamicCodecs;
use crate::config::RegistryConfig;
use crate::domain::object::{Identity, identity_of};
use crate::domain::{ObjectRef, RegistryError, Tag};
use crate::impls::{ClassPath, DefaultFallbackFactory};
use crate::ports::{ClassResolver, FallbackCodecFactory, ObjectCodec};

/// RegistryBuilder は codec・定数・fallback class 名を集めて CodecRegistry を作る
///
/// # 使用例
/// ```ignore
/// let registry = CodecRegistry::builder()
///     .add_codec(Arc::new(PointCodec))
///     .add_constant(origin.clone())?
///     .add_class_name("demo.shapes.Circle")
///     .class_resolver(Arc::new(class_path))
///     .build()?;
/// ```
///
/// # デフォルト
/// - `allow_default_codec`: true
/// - class resolver: 空の ClassPath（全ての fallback 構築が失敗する）
/// - fallback factory: DefaultFallbackFactory
pub struct RegistryBuilder {
    codecs: Vec<Arc<dyn ObjectCodec>>,
    constants: Vec<ObjectRef>,
    constant_ids: HashSet<Identity>,
    class_names: BTreeSet<String>,
    allow_default_codec: bool,
    class_resolver: Arc<dyn ClassResolver>,
    fallback_factory: Arc<dyn FallbackCodecFactory>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            codecs: Vec::new(),
            constants: Vec::new(),
            constant_ids: HashSet::new(),
            class_names: BTreeSet::new(),
            allow_default_codec: true,
            class_resolver: Arc::new(ClassPath::new()),
            fallback_factory: Arc::new(DefaultFallbackFactory),
        }
    }

    /// 明示 codec を登録。同じインスタンスの再登録は無視される
    pub fn add_codec(mut self, codec: Arc<dyn ObjectCodec>) -> Self {
        let ptr = Arc::as_ptr(&codec) as *const ();
        if !self
            .codecs
            .iter()
            .any(|existing| Arc::as_ptr(existing) as *const () == ptr)
        {
            self.codecs.push(codec);
        }
        self
    }

    /// 定数を登録。タグは登録順に振られる
    ///
    /// 同じインスタンスを 2 回登録すると `RegistryError::DuplicateConstant`。
    pub fn add_constant(mut self, value: ObjectRef) -> Result<Self, RegistryError> {
        if !self.constant_ids.insert(identity_of(value.as_ref())) {
            return Err(RegistryError::DuplicateConstant(format!("{value:?}")));
        }
        self.constants.push(value);
        Ok(self)
    }

    /// 既存レジストリから移す定数。identity の重複は起こり得ない
    pub(super) fn push_constant(mut self, value: ObjectRef) -> Self {
        if self.constant_ids.insert(identity_of(value.as_ref())) {
            self.constants.push(value);
        }
        self
    }

    /// fallback codec の対象になる class 名を登録
    pub fn add_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_names.insert(class_name.into());
        self
    }

    /// 明示 codec が無い型を fallback で扱うかどうか
    pub fn allow_default_codec(mut self, allow: bool) -> Self {
        self.allow_default_codec = allow;
        self
    }

    pub fn class_resolver(mut self, resolver: Arc<dyn ClassResolver>) -> Self {
        self.class_resolver = resolver;
        self
    }

    pub fn fallback_factory(mut self, factory: Arc<dyn FallbackCodecFactory>) -> Self {
        self.fallback_factory = factory;
        self
    }

    /// 設定ファイルの内容を反映
    pub fn with_config(self, config: &RegistryConfig) -> Self {
        config
            .fallback_classes
            .iter()
            .fold(self, |builder, name| builder.add_class_name(name.as_str()))
            .allow_default_codec(config.allow_default_codec)
    }

    /// レジストリを構築。タグはここで確定する
    pub fn build(self) -> Result<CodecRegistry, RegistryError> {
        check_tag_space(
            self.codecs.len(),
            self.constants.len(),
            self.class_names.len(),
        )?;

        let class_index = ClassIndex::allocate(&self.codecs)?;
        let constants = ConstantTable::new(Tag::FIRST.offset(class_index.len()), self.constants);
        let dynamic = DynamicCodecs::new(
            self.class_names,
            constants.start().offset(constants.len()),
            self.class_resolver,
            self.fallback_factory,
        );

        tracing::debug!(
            explicit = class_index.len(),
            constants = constants.len(),
            fallback = dynamic.len(),
            allow_default_codec = self.allow_default_codec,
            "built codec registry"
        );

        Ok(CodecRegistry {
            allow_default_codec: self.allow_default_codec,
            class_index,
            constants,
            dynamic,
        })
    }
}

/// 登録できるエントリ数の上限。最後のタグの次の位置も `i32` に収まる
const MAX_ENTRIES: usize = i32::MAX as usize - 1;

fn check_tag_space(
    explicit: usize,
    constants: usize,
    fallback: usize,
) -> Result<(), RegistryError> {
    let total = explicit.saturating_add(constants).saturating_add(fallback);
    if total > MAX_ENTRIES {
        return Err(RegistryError::TagSpaceExhausted(total));
    }
    Ok(())
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
