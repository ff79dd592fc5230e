// Device pollers: collect the complete interface table before anything is classified

mod snmp;

pub use snmp::{
    IF_ADMIN_STATUS, IF_ALIAS, IF_NAME, IF_OPER_STATUS, SnmpPoller, SnmpSettings, SnmpTarget,
};

use crate::error::PollError;
use crate::models::RawInterface;

/// Source of interface rows. A failure discards every row collected so far.
pub trait DevicePoller {
    fn poll(&self) -> impl Future<Output = Result<Vec<RawInterface>, PollError>>;
}
