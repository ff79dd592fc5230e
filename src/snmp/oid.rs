// Object identifiers

use std::fmt;
use std::str::FromStr;

use bytes::BytesMut;

use super::ber::{self, DecodeError};

/// Dotted-decimal object identifier. Derived ordering is lexicographic by arc,
/// which is the order an agent walks its MIB in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Oid(Vec<u32>);

impl Oid {
    pub fn from_arcs(arcs: &[u32]) -> Self {
        Self(arcs.to_vec())
    }

    pub fn arcs(&self) -> &[u32] {
        &self.0
    }

    pub fn starts_with(&self, prefix: &Oid) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Arcs after `prefix`, when `self` lies under it.
    pub fn suffix_after(&self, prefix: &Oid) -> Option<&[u32]> {
        self.0.strip_prefix(prefix.0.as_slice())
    }

    pub fn child(&self, arcs: &[u32]) -> Oid {
        let mut out = self.0.clone();
        out.extend_from_slice(arcs);
        Oid(out)
    }

    pub(crate) fn encode_content(&self, buf: &mut BytesMut) {
        let (first, second, rest) = match self.0.as_slice() {
            [] => (0, 0, &[][..]),
            [first] => (*first, 0, &[][..]),
            [first, second, rest @ ..] => (*first, *second, rest),
        };
        ber::put_base128(buf, u64::from(first) * 40 + u64::from(second));
        for &arc in rest {
            ber::put_base128(buf, u64::from(arc));
        }
    }

    pub(crate) fn decode_content(content: &[u8]) -> Result<Self, DecodeError> {
        if content.is_empty() {
            return Err(DecodeError::InvalidOid);
        }
        let mut arcs = Vec::with_capacity(content.len() + 1);
        let mut value: u64 = 0;
        let mut pending = false;
        for &b in content {
            if value > u64::from(u32::MAX) {
                return Err(DecodeError::InvalidOid);
            }
            value = (value << 7) | u64::from(b & 0x7f);
            pending = b & 0x80 != 0;
            if pending {
                continue;
            }
            if arcs.is_empty() {
                let (first, second) = match value {
                    0..40 => (0, value),
                    40..80 => (1, value - 40),
                    _ => (2, value - 80),
                };
                arcs.push(first);
                arcs.push(u32::try_from(second).map_err(|_| DecodeError::InvalidOid)?);
            } else {
                arcs.push(u32::try_from(value).map_err(|_| DecodeError::InvalidOid)?);
            }
            value = 0;
        }
        if pending {
            return Err(DecodeError::InvalidOid);
        }
        Ok(Oid(arcs))
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arc) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{arc}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid object identifier {0:?}")]
pub struct ParseOidError(pub String);

impl FromStr for Oid {
    type Err = ParseOidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_prefix('.').unwrap_or(s);
        let arcs = trimmed
            .split('.')
            .map(str::parse::<u32>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ParseOidError(s.to_string()))?;
        if arcs.len() < 2 || arcs[0] > 2 || (arcs[0] < 2 && arcs[1] >= 40) {
            return Err(ParseOidError(s.to_string()));
        }
        Ok(Oid(arcs))
    }
}
