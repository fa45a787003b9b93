//! Dynamic codec factory - fallback codec の遅延・メモ化構築
//!
//! # 学習ポイント
//! - `OnceLock` による class 名ごとの single-flight 初期化
//!   （同時に初回アクセスしても構築は高々 1 回、他のスレッドは結果を待つ）
//! - 失敗も `None` としてキャッシュし、以後は再試行しない
//! - ソート済み Vec の二分探索で名前 → エントリを引く

use std::sync::{Arc, OnceLock};

use super::descriptor::CodecDescriptor;
use crate::domain::{ClassKind, CodecConstructionError, NoCodecAvailable, Tag};
use crate::ports::{ClassResolver, FallbackCodecFactory, ObjectCodec};

struct DynamicEntry {
    class_name: String,
    tag: Tag,
    cell: OnceLock<Option<CodecDescriptor>>,
}

pub(crate) struct DynamicCodecs {
    /// class 名の辞書順
    entries: Vec<DynamicEntry>,
    resolver: Arc<dyn ClassResolver>,
    factory: Arc<dyn FallbackCodecFactory>,
}

impl DynamicCodecs {
    /// `class_names` は辞書順・重複なし。タグは `start` から順に振る
    pub(crate) fn new(
        class_names: impl IntoIterator<Item = String>,
        start: Tag,
        resolver: Arc<dyn ClassResolver>,
        factory: Arc<dyn FallbackCodecFactory>,
    ) -> Self {
        let entries = class_names
            .into_iter()
            .enumerate()
            .map(|(offset, class_name)| DynamicEntry {
                class_name,
                tag: start.offset(offset),
                cell: OnceLock::new(),
            })
            .collect();
        Self {
            entries,
            resolver,
            factory,
        }
    }

    /// class 名で fallback descriptor を取得（初回のみ構築）
    pub(crate) fn get(&self, class_name: &str) -> Result<&CodecDescriptor, NoCodecAvailable> {
        let index = self
            .entries
            .binary_search_by(|entry| entry.class_name.as_str().cmp(class_name))
            .map_err(|_| NoCodecAvailable::NotFallbackEligible(class_name.to_string()))?;
        self.materialize(&self.entries[index])
    }

    /// 辞書順で `offset` 番目の class 名
    pub(crate) fn class_name_at(&self, offset: usize) -> Option<&str> {
        self.entries.get(offset).map(|entry| entry.class_name.as_str())
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn class_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.class_name.as_str())
    }

    pub(crate) fn tags(&self) -> impl Iterator<Item = (Tag, &str)> {
        self.entries
            .iter()
            .map(|entry| (entry.tag, entry.class_name.as_str()))
    }

    pub(crate) fn resolver(&self) -> &Arc<dyn ClassResolver> {
        &self.resolver
    }

    pub(crate) fn factory(&self) -> &Arc<dyn FallbackCodecFactory> {
        &self.factory
    }

    fn materialize<'a>(
        &'a self,
        entry: &'a DynamicEntry,
    ) -> Result<&'a CodecDescriptor, NoCodecAvailable> {
        entry
            .cell
            .get_or_init(|| self.create(entry))
            .as_ref()
            .ok_or_else(|| NoCodecAvailable::ConstructionFailed(entry.class_name.clone()))
    }

    fn create(&self, entry: &DynamicEntry) -> Option<CodecDescriptor> {
        match self.construct(&entry.class_name) {
            Ok(codec) => {
                tracing::debug!(
                    class = %entry.class_name,
                    tag = %entry.tag,
                    "constructed fallback codec"
                );
                Some(CodecDescriptor::new(entry.tag, codec))
            }
            Err(error) => {
                tracing::warn!(
                    class = %entry.class_name,
                    tag = %entry.tag,
                    error = %error,
                    "could not create fallback codec"
                );
                None
            }
        }
    }

    /// 列挙型の宣言側 class だけが enum codec を受け取る
    fn construct(&self, class_name: &str) -> Result<Arc<dyn ObjectCodec>, CodecConstructionError> {
        let class = self.resolver.resolve(class_name)?;
        match class.kind() {
            ClassKind::Enum(_) => self.factory.enum_codec(class),
            _ => self.factory.dynamic_codec(class),
        }
    }
}
