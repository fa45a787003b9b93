//! Errors - エラー型と分類
//!
//! - **NoCodecAvailable**: lookup 失敗（唯一の lookup エラー種別）
//! - **RegistryError**: Builder の構築エラー
//! - **CodecConstructionError**: fallback codec の構築失敗（ログに出してキャッシュする）
//! - **SerializationError**: codec / セッションの実行時エラー

use thiserror::Error;

use super::tag::Tag;

/// NoCodecAvailable は値またはタグに対応する codec が無いことを表す
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoCodecAvailable {
    #[error("no codec available for {0} and default fallback disabled")]
    FallbackDisabled(String),

    #[error("no codec available for tag {0}")]
    UnknownTag(Tag),

    #[error("no default codec available for {0}")]
    NotFallbackEligible(String),

    #[error("there was a problem creating a codec for {0}, check logs for details")]
    ConstructionFailed(String),
}

/// RegistryError は Builder の操作エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("constant {0} is already registered")]
    DuplicateConstant(String),

    #[error("class '{class}' is claimed by more than one codec")]
    ConflictingCodec { class: String },

    #[error("registry too large: {0} tags do not fit the tag space")]
    TagSpaceExhausted(usize),
}

/// CodecConstructionError は fallback codec が作れなかった理由
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecConstructionError {
    #[error("class '{0}' could not be resolved")]
    ClassNotFound(String),

    #[error("class '{0}' has no structure to encode")]
    UnsupportedStructure(String),

    #[error("class '{0}' is not an enum")]
    NotAnEnum(String),
}

/// SerializationError は codec の encode/decode エラー
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error(transparent)]
    NoCodec(#[from] NoCodecAvailable),

    #[error("input truncated at offset {offset}")]
    Truncated { offset: usize },

    #[error("malformed varint at offset {offset}")]
    InvalidVarint { offset: usize },

    #[error("invalid utf-8 in string field")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("ordinal {ordinal} is out of range for enum {class}")]
    UnknownOrdinal { class: String, ordinal: u64 },

    #[error("backreference tag {0} is not supported by this session")]
    UnsupportedBackreference(Tag),

    #[error("nesting deeper than {limit} values")]
    DepthLimitExceeded { limit: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_codec_messages_name_the_subject() {
        let err = NoCodecAvailable::FallbackDisabled("demo.Point".to_string());
        assert!(err.to_string().contains("demo.Point"));

        let err = NoCodecAvailable::UnknownTag(Tag::new(-1));
        assert_eq!(err.to_string(), "no codec available for tag -1");
    }

    #[test]
    fn test_serialization_error_wraps_lookup_failure() {
        let err: SerializationError = NoCodecAvailable::UnknownTag(Tag::NULL).into();
        assert!(matches!(err, SerializationError::NoCodec(_)));
    }
}
