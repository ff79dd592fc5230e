// BER primitives for the SNMP message subset (X.690 definite-length encoding)

use bytes::{BufMut, BytesMut};
use thiserror::Error;

pub const INTEGER: u8 = 0x02;
pub const OCTET_STRING: u8 = 0x04;
pub const NULL: u8 = 0x05;
pub const OBJECT_IDENTIFIER: u8 = 0x06;
pub const SEQUENCE: u8 = 0x30;

pub const IP_ADDRESS: u8 = 0x40;
pub const COUNTER32: u8 = 0x41;
pub const GAUGE32: u8 = 0x42;
pub const TIMETICKS: u8 = 0x43;
pub const OPAQUE: u8 = 0x44;
pub const COUNTER64: u8 = 0x46;

pub const NO_SUCH_OBJECT: u8 = 0x80;
pub const NO_SUCH_INSTANCE: u8 = 0x81;
pub const END_OF_MIB_VIEW: u8 = 0x82;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("truncated input")]
    Truncated,
    #[error("expected tag {expected:#04x}, found {found:#04x}")]
    UnexpectedTag { expected: u8, found: u8 },
    #[error("unsupported tag {0:#04x}")]
    UnsupportedTag(u8),
    #[error("indefinite length is not allowed")]
    IndefiniteLength,
    #[error("length field of {0} bytes is too long")]
    LengthTooLong(usize),
    #[error("integer does not fit in {0} bits")]
    IntegerOverflow(u32),
    #[error("empty integer")]
    EmptyInteger,
    #[error("invalid object identifier")]
    InvalidOid,
    #[error("{0} trailing bytes after message")]
    TrailingBytes(usize),
}

pub fn put_length(buf: &mut BytesMut, len: usize) {
    if len < 0x80 {
        buf.put_u8(len as u8);
        return;
    }
    let bytes = (len as u64).to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    buf.put_u8(0x80 | (bytes.len() - skip) as u8);
    buf.put_slice(&bytes[skip..]);
}

pub fn put_tlv(buf: &mut BytesMut, tag: u8, content: &[u8]) {
    buf.put_u8(tag);
    put_length(buf, content.len());
    buf.put_slice(content);
}

/// Minimal two's complement encoding.
pub fn put_integer(buf: &mut BytesMut, tag: u8, value: i64) {
    let bytes = value.to_be_bytes();
    let mut start = 0;
    while start < bytes.len() - 1 {
        let redundant = (bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0)
            || (bytes[start] == 0xff && bytes[start + 1] & 0x80 != 0);
        if !redundant {
            break;
        }
        start += 1;
    }
    put_tlv(buf, tag, &bytes[start..]);
}

/// Unsigned application types (Counter32, Gauge32, TimeTicks, Counter64).
pub fn put_unsigned(buf: &mut BytesMut, tag: u8, value: u64) {
    let bytes = value.to_be_bytes();
    let start = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(bytes.len() - 1);
    let mut content = Vec::with_capacity(bytes.len() + 1);
    if bytes[start] & 0x80 != 0 {
        content.push(0);
    }
    content.extend_from_slice(&bytes[start..]);
    put_tlv(buf, tag, &content);
}

/// Base-128 big-endian with continuation bits.
pub fn put_base128(buf: &mut BytesMut, value: u64) {
    let mut groups = [0u8; 10];
    let mut n = 0;
    let mut v = value;
    loop {
        groups[n] = (v & 0x7f) as u8;
        n += 1;
        v >>= 7;
        if v == 0 {
            break;
        }
    }
    for i in (0..n).rev() {
        let continuation = if i > 0 { 0x80 } else { 0 };
        buf.put_u8(groups[i] | continuation);
    }
}

pub fn decode_integer(content: &[u8]) -> Result<i64, DecodeError> {
    if content.is_empty() {
        return Err(DecodeError::EmptyInteger);
    }
    if content.len() > 8 {
        return Err(DecodeError::IntegerOverflow(64));
    }
    let init: i64 = if content[0] & 0x80 != 0 { -1 } else { 0 };
    Ok(content
        .iter()
        .fold(init, |acc, &b| (acc << 8) | i64::from(b)))
}

pub fn decode_unsigned(content: &[u8]) -> Result<u64, DecodeError> {
    if content.is_empty() {
        return Err(DecodeError::EmptyInteger);
    }
    let content = match content {
        [0, rest @ ..] if !rest.is_empty() => rest,
        _ => content,
    };
    if content.len() > 8 {
        return Err(DecodeError::IntegerOverflow(64));
    }
    Ok(content.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
}

/// Cursor over BER encoded bytes.
pub struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    /// Reads one tag-length-value and returns the tag and its content.
    pub fn read_tlv(&mut self) -> Result<(u8, &'a [u8]), DecodeError> {
        let (&tag, rest) = self.buf.split_first().ok_or(DecodeError::Truncated)?;
        let (&first, mut rest) = rest.split_first().ok_or(DecodeError::Truncated)?;
        let len = if first < 0x80 {
            usize::from(first)
        } else if first == 0x80 {
            return Err(DecodeError::IndefiniteLength);
        } else {
            let n = usize::from(first & 0x7f);
            if n > 4 {
                return Err(DecodeError::LengthTooLong(n));
            }
            if rest.len() < n {
                return Err(DecodeError::Truncated);
            }
            let (len_bytes, after) = rest.split_at(n);
            rest = after;
            len_bytes
                .iter()
                .fold(0usize, |acc, &b| (acc << 8) | usize::from(b))
        };
        if rest.len() < len {
            return Err(DecodeError::Truncated);
        }
        let (content, after) = rest.split_at(len);
        self.buf = after;
        Ok((tag, content))
    }

    pub fn expect(&mut self, expected: u8) -> Result<&'a [u8], DecodeError> {
        let (found, content) = self.read_tlv()?;
        if found != expected {
            return Err(DecodeError::UnexpectedTag { expected, found });
        }
        Ok(content)
    }

    pub fn read_integer(&mut self) -> Result<i64, DecodeError> {
        decode_integer(self.expect(INTEGER)?)
    }
}
