// Minimal SNMP codec: enough of BER and the v2c message format to walk a table

pub mod ber;
mod oid;
mod pdu;

pub use ber::DecodeError;
pub use oid::{Oid, ParseOidError};
pub use pdu::{
    GEN_ERR, Message, NO_ERROR, NO_SUCH_NAME, Pdu, PduKind, TOO_BIG, VERSION_2C, Value, VarBind,
};
