//! ClassIndex - タグ割り当てと class → descriptor の索引
//!
//! # 学習ポイント
//! - 登録順ではなく primary class 名でソートしてからタグを振る
//!   （独立に構築した 2 つのレジストリが同じタグを持つため）
//! - 追加 class も同じ descriptor を指す

use std::collections::HashMap;
use std::sync::Arc;

use super::descriptor::CodecDescriptor;
use crate::domain::{Class, RegistryError, Tag};
use crate::ports::ObjectCodec;

pub(crate) struct ClassIndex {
    /// class 名 → `by_tag` の添字
    by_class: HashMap<&'static str, usize>,
    /// `tag - 1` で引ける descriptor
    by_tag: Vec<CodecDescriptor>,
}

impl ClassIndex {
    /// codec をソートしてタグ `1..=E` を割り当てる
    pub(crate) fn allocate(codecs: &[Arc<dyn ObjectCodec>]) -> Result<Self, RegistryError> {
        let mut sorted = codecs.to_vec();
        sorted.sort_by(|a, b| a.encoded_class().name().cmp(b.encoded_class().name()));

        let mut by_class = HashMap::with_capacity(sorted.len());
        let mut by_tag = Vec::with_capacity(sorted.len());
        for (index, codec) in sorted.into_iter().enumerate() {
            let classes = std::iter::once(codec.encoded_class())
                .chain(codec.additional_encoded_classes().iter().copied());
            for class in classes {
                if by_class.insert(class.name(), index).is_some() {
                    return Err(RegistryError::ConflictingCodec {
                        class: class.name().to_string(),
                    });
                }
            }
            by_tag.push(CodecDescriptor::new(Tag::FIRST.offset(index), codec));
        }
        Ok(Self { by_class, by_tag })
    }

    /// `class` から祖先へ辿り、最初に見つかった descriptor
    ///
    /// superclass のチェーンだけを辿る。
    pub(crate) fn lookup(&self, class: &'static Class) -> Option<&CodecDescriptor> {
        // TODO: cache the ancestor walk per concrete class once profiling shows deep hierarchies
        class
            .ancestry()
            .find_map(|ancestor| self.by_class.get(ancestor.name()))
            .map(|&index| &self.by_tag[index])
    }

    /// `tag - 1` の位置にある descriptor
    pub(crate) fn get(&self, offset: usize) -> Option<&CodecDescriptor> {
        self.by_tag.get(offset)
    }

    pub(crate) fn len(&self) -> usize {
        self.by_tag.len()
    }

    pub(crate) fn descriptors(&self) -> &[CodecDescriptor] {
        &self.by_tag
    }
}
