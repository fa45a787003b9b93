//! Coded - varint ベースの書き込み先と読み込み元
//!
//! # 学習ポイント
//! - 符号なし整数は LEB128 varint
//! - 符号付き 32bit（タグ）は zigzag してから varint
//! - バイト列・文字列は長さ prefix 付き
//! - 10 バイト目に 64bit に収まらないビットがあれば不正な varint として拒否する

use crate::domain::{SerializationError, Tag};

/// CodedOutput は追記専用のバイト列
#[derive(Debug, Default, Clone)]
pub struct CodedOutput {
    buf: Vec<u8>,
}

impl CodedOutput {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn write_varint(&mut self, mut value: u64) {
        loop {
            let byte = (value & 0x7F) as u8;
            value >>= 7;
            if value == 0 {
                self.buf.push(byte);
                break;
            }
            self.buf.push(byte | 0x80);
        }
    }

    pub fn write_sint32(&mut self, value: i32) {
        let zigzag = ((value << 1) ^ (value >> 31)) as u32;
        self.write_varint(u64::from(zigzag));
    }

    pub fn write_tag(&mut self, tag: Tag) {
        self.write_sint32(tag.get());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.write_varint(bytes.len() as u64);
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_str(&mut self, value: &str) {
        self.write_bytes(value.as_bytes());
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// CodedInput は encode 済みバッファ上のカーソル
#[derive(Debug, Clone)]
pub struct CodedInput<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> CodedInput<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn read_varint(&mut self) -> Result<u64, SerializationError> {
        let mut result = 0u64;
        let mut shift = 0u32;
        loop {
            let Some(&byte) = self.buf.get(self.pos) else {
                return Err(SerializationError::Truncated { offset: self.pos });
            };
            self.pos += 1;
            // 10 バイト目は bit 63 の 1 ビットだけで、後続も無い
            if shift == 63 && byte & 0xFE != 0 {
                return Err(SerializationError::InvalidVarint { offset: self.pos });
            }
            result |= u64::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                return Ok(result);
            }
            shift += 7;
        }
    }

    pub fn read_sint32(&mut self) -> Result<i32, SerializationError> {
        let offset = self.pos;
        let raw = u32::try_from(self.read_varint()?)
            .map_err(|_| SerializationError::InvalidVarint { offset })?;
        Ok(((raw >> 1) as i32) ^ -((raw & 1) as i32))
    }

    pub fn read_tag(&mut self) -> Result<Tag, SerializationError> {
        self.read_sint32().map(Tag::new)
    }

    pub fn read_bytes(&mut self) -> Result<&'a [u8], SerializationError> {
        let len = self.read_varint()? as usize;
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.buf.len())
            .ok_or(SerializationError::Truncated { offset: self.buf.len() })?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub fn read_str(&mut self) -> Result<&'a str, SerializationError> {
        Ok(std::str::from_utf8(self.read_bytes()?)?)
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}
