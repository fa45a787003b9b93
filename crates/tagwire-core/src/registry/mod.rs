//! Registry - codec の索引とタグ空間
//!
//! # 構成
//! - **ClassIndex**: 明示 codec のタグ割り当てと class → descriptor
//! - **ConstantTable**: 定数 ↔ タグ（identity 比較）
//! - **DynamicCodecs**: fallback class 名 → 遅延構築される descriptor
//! - **CodecRegistry**: 上記をまとめた不変のスナップショット
//! - **RegistryBuilder**: 登録を集めて `build()` する
//!
//! # Thread Safety
//! 構築後は読み取り専用。唯一の可変領域は fallback descriptor の `OnceLock` で、
//! 未設定 → 設定済みに一度だけ遷移します。

pub mod builder;
mod class_index;
mod constants;
pub mod descriptor;
mod dynamic;
pub mod layout;

pub use self::builder::RegistryBuilder;
pub use self::descriptor::CodecDescriptor;
pub use self::layout::{TagEntry, TagLayout};

use std::fmt;

use self::class_index::ClassIndex;
use self::constants::ConstantTable;
use self::dynamic::DynamicCodecs;
use crate::domain::{NoCodecAvailable, Object, ObjectRef, Tag};

/// CodecRegistry は値またはタグから CodecDescriptor を引く
///
/// # タグ空間
/// - `1..=E`: 明示 codec（primary class 名の昇順）
/// - `E+1..=E+C`: 定数（登録順）
/// - `E+C+1..=E+C+F`: fallback class（辞書順、fallback 有効時のみ）
pub struct CodecRegistry {
    allow_default_codec: bool,
    class_index: ClassIndex,
    constants: ConstantTable,
    dynamic: DynamicCodecs,
}

impl CodecRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// 値の具象 class から descriptor を引く
    ///
    /// # 手順
    /// 1. class → superclass の順に明示 codec を探す
    /// 2. 見つからず fallback 無効なら `FallbackDisabled`
    /// 3. 列挙型の値なら宣言側の class に置き換える
    /// 4. fallback descriptor を class 名で引く（初回は構築）
    pub fn resolve(&self, value: &dyn Object) -> Result<&CodecDescriptor, NoCodecAvailable> {
        let class = value.class();
        if let Some(descriptor) = self.class_index.lookup(class) {
            return Ok(descriptor);
        }
        if !self.allow_default_codec {
            return Err(NoCodecAvailable::FallbackDisabled(class.name().to_string()));
        }
        let class = if class.is_enum() {
            class.declaring_class()
        } else {
            class
        };
        self.dynamic.get(class.name())
    }

    /// タグから descriptor を引く
    ///
    /// 定数のタグはここでは解決されない（`tag_to_constant` を使う）。
    pub fn resolve_by_tag(&self, tag: Tag) -> Result<&CodecDescriptor, NoCodecAvailable> {
        if tag.get() <= 0 {
            return Err(NoCodecAvailable::UnknownTag(tag));
        }
        let offset = (tag.get() - 1) as usize;
        if let Some(descriptor) = self.class_index.get(offset) {
            return Ok(descriptor);
        }

        let class_name = offset
            .checked_sub(self.class_index.len() + self.constants.len())
            .filter(|_| self.allow_default_codec)
            .and_then(|offset| self.dynamic.class_name_at(offset))
            .ok_or(NoCodecAvailable::UnknownTag(tag))?;
        self.dynamic.get(class_name)
    }

    /// 定数ならそのタグ（identity 比較）
    pub fn constant_value_to_tag(&self, value: &dyn Object) -> Option<Tag> {
        self.constants.tag_for(value)
    }

    /// タグが定数の範囲ならその値
    pub fn tag_to_constant(&self, tag: Tag) -> Option<&ObjectRef> {
        self.constants.value_for(tag)
    }

    pub fn allows_default_codec(&self) -> bool {
        self.allow_default_codec
    }

    /// fallback 対象の class 名（辞書順）
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.dynamic.class_names()
    }

    /// 現在の登録内容で初期化された Builder
    ///
    /// 明示 codec を走査し直さずにレジストリを拡張できる。
    pub fn to_builder(&self) -> RegistryBuilder {
        let mut builder = RegistryBuilder::new()
            .allow_default_codec(self.allow_default_codec)
            .class_resolver(self.dynamic.resolver().clone())
            .fallback_factory(self.dynamic.factory().clone());
        for descriptor in self.class_index.descriptors() {
            builder = builder.add_codec(descriptor.codec().clone());
        }
        for constant in self.constants.values() {
            builder = builder.push_constant(constant.clone());
        }
        for class_name in self.dynamic.class_names() {
            builder = builder.add_class_name(class_name);
        }
        builder
    }

    /// タグ空間のスナップショット
    pub fn layout(&self) -> TagLayout {
        let explicit = self
            .class_index
            .descriptors()
            .iter()
            .map(|d| TagEntry::new(d.tag(), d.codec().encoded_class().name()))
            .collect();
        let constants = self
            .constants
            .values()
            .iter()
            .enumerate()
            .map(|(offset, value)| {
                TagEntry::new(self.constants.start().offset(offset), value.class().name())
            })
            .collect();
        let fallback = if self.allow_default_codec {
            self.dynamic
                .tags()
                .map(|(tag, name)| TagEntry::new(tag, name))
                .collect()
        } else {
            Vec::new()
        };
        TagLayout {
            allow_default_codec: self.allow_default_codec,
            explicit,
            constants,
            fallback,
        }
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("allow_default_codec", &self.allow_default_codec)
            .field("explicit", &self.class_index.len())
            .field("constants", &self.constants.len())
            .field("fallback", &self.dynamic.len())
            .finish()
    }
}
