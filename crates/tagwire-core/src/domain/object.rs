//! Object trait - エンコード可能な値

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use super::class::Class;

/// Object はレジストリが扱える全ての値が実装する
///
/// # Trait Bounds
/// - `Any`: codec 側で具象型へ downcast するため
/// - `Send + Sync`: 定数として複数スレッドから共有されるため
/// - `Debug`: エラーメッセージ・ログのため
pub trait Object: Any + Send + Sync + fmt::Debug {
    /// 値の具象 class
    fn class(&self) -> &'static Class;

    fn as_any(&self) -> &dyn Any;
}

/// 共有される値のハンドル
pub type ObjectRef = Arc<dyn Object>;

impl<'a> dyn Object + 'a {
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// 値の identity（割り当てアドレス + 具象型）
///
/// 同値性ではなく同一性で比較します。アドレスはその `Arc` が生きている間だけ
/// 一意なので、定数テーブルは値を保持し続けます。先頭フィールドは外側の値と
/// 同じアドレスを持つため、具象型も合わせて比較します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Identity {
    addr: usize,
    type_id: TypeId,
}

pub(crate) fn identity_of(value: &dyn Object) -> Identity {
    Identity {
        addr: value as *const dyn Object as *const () as usize,
        type_id: Any::type_id(value.as_any()),
    }
}

/// `Object` を class static と結び付けて実装する
///
/// ```ignore
/// static POINT: Class = Class::new("demo.Point");
/// impl_object!(Point => POINT);
/// ```
#[macro_export]
macro_rules! impl_object {
    ($ty:ty => $class:expr) => {
        impl $crate::domain::Object for $ty {
            fn class(&self) -> &'static $crate::domain::Class {
                &$class
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    };
}
