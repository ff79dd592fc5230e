// SNMPv1/v2c messages: community header, PDU and variable bindings

use bytes::{Bytes, BytesMut};

use super::ber::{self, DecodeError, Reader};
use super::oid::Oid;

/// `version` field of an SNMPv2c message.
pub const VERSION_2C: i64 = 1;

pub const NO_ERROR: i64 = 0;
pub const TOO_BIG: i64 = 1;
/// SNMPv1 agents report the end of the MIB this way instead of endOfMibView.
pub const NO_SUCH_NAME: i64 = 2;
pub const GEN_ERR: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Integer(i64),
    OctetString(Vec<u8>),
    Null,
    ObjectId(Oid),
    IpAddress([u8; 4]),
    Counter32(u32),
    Gauge32(u32),
    TimeTicks(u32),
    Opaque(Vec<u8>),
    Counter64(u64),
    NoSuchObject,
    NoSuchInstance,
    EndOfMibView,
}

impl Value {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Octet string contents as text; invalid UTF-8 is replaced, not rejected.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::OctetString(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    }

    /// noSuchObject, noSuchInstance or endOfMibView.
    pub fn is_exception(&self) -> bool {
        matches!(
            self,
            Value::NoSuchObject | Value::NoSuchInstance | Value::EndOfMibView
        )
    }

    fn encode(&self, buf: &mut BytesMut) {
        match self {
            Value::Integer(v) => ber::put_integer(buf, ber::INTEGER, *v),
            Value::OctetString(bytes) => ber::put_tlv(buf, ber::OCTET_STRING, bytes),
            Value::Null => ber::put_tlv(buf, ber::NULL, &[]),
            Value::ObjectId(oid) => {
                let mut content = BytesMut::new();
                oid.encode_content(&mut content);
                ber::put_tlv(buf, ber::OBJECT_IDENTIFIER, &content);
            }
            Value::IpAddress(octets) => ber::put_tlv(buf, ber::IP_ADDRESS, octets),
            Value::Counter32(v) => ber::put_unsigned(buf, ber::COUNTER32, u64::from(*v)),
            Value::Gauge32(v) => ber::put_unsigned(buf, ber::GAUGE32, u64::from(*v)),
            Value::TimeTicks(v) => ber::put_unsigned(buf, ber::TIMETICKS, u64::from(*v)),
            Value::Opaque(bytes) => ber::put_tlv(buf, ber::OPAQUE, bytes),
            Value::Counter64(v) => ber::put_unsigned(buf, ber::COUNTER64, *v),
            Value::NoSuchObject => ber::put_tlv(buf, ber::NO_SUCH_OBJECT, &[]),
            Value::NoSuchInstance => ber::put_tlv(buf, ber::NO_SUCH_INSTANCE, &[]),
            Value::EndOfMibView => ber::put_tlv(buf, ber::END_OF_MIB_VIEW, &[]),
        }
    }

    fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let (tag, content) = reader.read_tlv()?;
        let value = match tag {
            ber::INTEGER => Value::Integer(ber::decode_integer(content)?),
            ber::OCTET_STRING => Value::OctetString(content.to_vec()),
            ber::NULL => Value::Null,
            ber::OBJECT_IDENTIFIER => Value::ObjectId(Oid::decode_content(content)?),
            ber::IP_ADDRESS => Value::IpAddress(
                content
                    .try_into()
                    .map_err(|_| DecodeError::Truncated)?,
            ),
            ber::COUNTER32 => Value::Counter32(decode_u32(content)?),
            ber::GAUGE32 => Value::Gauge32(decode_u32(content)?),
            ber::TIMETICKS => Value::TimeTicks(decode_u32(content)?),
            ber::OPAQUE => Value::Opaque(content.to_vec()),
            ber::COUNTER64 => Value::Counter64(ber::decode_unsigned(content)?),
            ber::NO_SUCH_OBJECT => Value::NoSuchObject,
            ber::NO_SUCH_INSTANCE => Value::NoSuchInstance,
            ber::END_OF_MIB_VIEW => Value::EndOfMibView,
            other => return Err(DecodeError::UnsupportedTag(other)),
        };
        Ok(value)
    }
}

fn decode_u32(content: &[u8]) -> Result<u32, DecodeError> {
    u32::try_from(ber::decode_unsigned(content)?).map_err(|_| DecodeError::IntegerOverflow(32))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarBind {
    pub oid: Oid,
    pub value: Value,
}

impl VarBind {
    pub fn new(oid: Oid, value: Value) -> Self {
        Self { oid, value }
    }

    /// Request binding: the OID with a NULL value.
    pub fn null(oid: Oid) -> Self {
        Self::new(oid, Value::Null)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PduKind {
    GetRequest,
    GetNextRequest,
    Response,
    SetRequest,
    GetBulkRequest,
}

impl PduKind {
    pub fn tag(&self) -> u8 {
        match self {
            PduKind::GetRequest => 0xa0,
            PduKind::GetNextRequest => 0xa1,
            PduKind::Response => 0xa2,
            PduKind::SetRequest => 0xa3,
            PduKind::GetBulkRequest => 0xa5,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0xa0 => Some(PduKind::GetRequest),
            0xa1 => Some(PduKind::GetNextRequest),
            0xa2 => Some(PduKind::Response),
            0xa3 => Some(PduKind::SetRequest),
            0xa5 => Some(PduKind::GetBulkRequest),
            _ => None,
        }
    }
}

/// Protocol data unit. For GetBulkRequest, `error_status` carries non-repeaters and
/// `error_index` carries max-repetitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pdu {
    pub kind: PduKind,
    pub request_id: i32,
    pub error_status: i64,
    pub error_index: i64,
    pub varbinds: Vec<VarBind>,
}

impl Pdu {
    pub fn get(request_id: i32, oids: &[Oid]) -> Self {
        Self {
            kind: PduKind::GetRequest,
            request_id,
            error_status: NO_ERROR,
            error_index: 0,
            varbinds: oids.iter().cloned().map(VarBind::null).collect(),
        }
    }

    pub fn get_next(request_id: i32, oids: &[Oid]) -> Self {
        Self {
            kind: PduKind::GetNextRequest,
            request_id,
            error_status: NO_ERROR,
            error_index: 0,
            varbinds: oids.iter().cloned().map(VarBind::null).collect(),
        }
    }

    pub fn response(request_id: i32, varbinds: Vec<VarBind>) -> Self {
        Self {
            kind: PduKind::Response,
            request_id,
            error_status: NO_ERROR,
            error_index: 0,
            varbinds,
        }
    }

    fn encode(&self, buf: &mut BytesMut) {
        let mut bindings = BytesMut::new();
        for vb in &self.varbinds {
            let mut binding = BytesMut::new();
            let mut oid = BytesMut::new();
            vb.oid.encode_content(&mut oid);
            ber::put_tlv(&mut binding, ber::OBJECT_IDENTIFIER, &oid);
            vb.value.encode(&mut binding);
            ber::put_tlv(&mut bindings, ber::SEQUENCE, &binding);
        }

        let mut body = BytesMut::new();
        ber::put_integer(&mut body, ber::INTEGER, i64::from(self.request_id));
        ber::put_integer(&mut body, ber::INTEGER, self.error_status);
        ber::put_integer(&mut body, ber::INTEGER, self.error_index);
        ber::put_tlv(&mut body, ber::SEQUENCE, &bindings);
        ber::put_tlv(buf, self.kind.tag(), &body);
    }

    fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let (tag, content) = reader.read_tlv()?;
        let kind = PduKind::from_tag(tag).ok_or(DecodeError::UnsupportedTag(tag))?;
        let mut body = Reader::new(content);
        let request_id = i32::try_from(body.read_integer()?)
            .map_err(|_| DecodeError::IntegerOverflow(32))?;
        let error_status = body.read_integer()?;
        let error_index = body.read_integer()?;

        let mut bindings = Reader::new(body.expect(ber::SEQUENCE)?);
        let mut varbinds = Vec::new();
        while !bindings.is_empty() {
            let mut binding = Reader::new(bindings.expect(ber::SEQUENCE)?);
            let oid = Oid::decode_content(binding.expect(ber::OBJECT_IDENTIFIER)?)?;
            let value = Value::decode(&mut binding)?;
            varbinds.push(VarBind { oid, value });
        }

        Ok(Self {
            kind,
            request_id,
            error_status,
            error_index,
            varbinds,
        })
    }
}

/// Community-based message (SNMPv1 / SNMPv2c).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub version: i64,
    pub community: Vec<u8>,
    pub pdu: Pdu,
}

impl Message {
    pub fn v2c(community: &str, pdu: Pdu) -> Self {
        Self {
            version: VERSION_2C,
            community: community.as_bytes().to_vec(),
            pdu,
        }
    }

    pub fn encode(&self) -> Bytes {
        let mut body = BytesMut::new();
        ber::put_integer(&mut body, ber::INTEGER, self.version);
        ber::put_tlv(&mut body, ber::OCTET_STRING, &self.community);
        self.pdu.encode(&mut body);

        let mut out = BytesMut::with_capacity(body.len() + 4);
        ber::put_tlv(&mut out, ber::SEQUENCE, &body);
        out.freeze()
    }

    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let mut outer = Reader::new(data);
        let mut body = Reader::new(outer.expect(ber::SEQUENCE)?);
        if !outer.is_empty() {
            return Err(DecodeError::TrailingBytes(outer.remaining()));
        }
        let version = body.read_integer()?;
        let community = body.expect(ber::OCTET_STRING)?.to_vec();
        let pdu = Pdu::decode(&mut body)?;
        Ok(Self {
            version,
            community,
            pdu,
        })
    }
}
