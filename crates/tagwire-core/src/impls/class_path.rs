//! ClassPath - 明示登録された class テーブル
//!
//! reflection の代わりに、fallback 対象になり得る class をここへ登録します。

use std::collections::HashMap;

use crate::domain::{Class, CodecConstructionError};
use crate::ports::ClassResolver;

/// ClassPath は class 名から Class への静的テーブル
///
/// # 使用例
/// ```ignore
/// let class_path = ClassPath::new().with(&CIRCLE).with(&STATUS);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ClassPath {
    classes: HashMap<&'static str, &'static Class>,
}

impl ClassPath {
    pub fn new() -> Self {
        Self {
            classes: HashMap::new(),
        }
    }

    pub fn with(mut self, class: &'static Class) -> Self {
        self.register(class);
        self
    }

    /// class を登録。同名の class は後勝ち
    pub fn register(&mut self, class: &'static Class) {
        self.classes.insert(class.name(), class);
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl FromIterator<&'static Class> for ClassPath {
    fn from_iter<I: IntoIterator<Item = &'static Class>>(iter: I) -> Self {
        let mut class_path = Self::new();
        for class in iter {
            class_path.register(class);
        }
        class_path
    }
}

impl ClassResolver for ClassPath {
    fn resolve(&self, name: &str) -> Result<&'static Class, CodecConstructionError> {
        self.classes
            .get(name)
            .copied()
            .ok_or_else(|| CodecConstructionError::ClassNotFound(name.to_string()))
    }
}
