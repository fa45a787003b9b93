//! Constant table - 登録済みシングルトン値のタグ
//!
//! 定数は codec を通らず、identity（同一インスタンス）でタグに対応付けられます。
//! タグは明示 codec の直後から登録順に振られます。

use std::collections::HashMap;

use crate::domain::object::{Identity, identity_of};
use crate::domain::{Object, ObjectRef, Tag};

pub(crate) struct ConstantTable {
    start: Tag,
    by_identity: HashMap<Identity, Tag>,
    /// `by_identity` のキーが有効であるために値を保持し続ける
    values: Vec<ObjectRef>,
}

impl ConstantTable {
    /// `values` は identity で重複が無いこと（Builder が保証する）
    pub(crate) fn new(start: Tag, values: Vec<ObjectRef>) -> Self {
        let by_identity = values
            .iter()
            .enumerate()
            .map(|(offset, value)| (identity_of(value.as_ref()), start.offset(offset)))
            .collect();
        Self {
            start,
            by_identity,
            values,
        }
    }

    pub(crate) fn tag_for(&self, value: &dyn Object) -> Option<Tag> {
        self.by_identity.get(&identity_of(value)).copied()
    }

    pub(crate) fn value_for(&self, tag: Tag) -> Option<&ObjectRef> {
        let offset = tag.get().checked_sub(self.start.get())?;
        self.values.get(usize::try_from(offset).ok()?)
    }

    pub(crate) fn start(&self) -> Tag {
        self.start
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn values(&self) -> &[ObjectRef] {
        &self.values
    }
}
