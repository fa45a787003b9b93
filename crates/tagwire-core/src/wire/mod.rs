//! Wire - codec とセッションが使うバイト列プリミティブ
//!
//! - **CodedOutput**: 追記専用の書き込み先
//! - **CodedInput**: encode 済みバッファを読むカーソル

pub mod coded;

pub use self::coded::{CodedInput, CodedOutput};
