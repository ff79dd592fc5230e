// SNMPv2c GETNEXT walk of the IF-MIB columns the classifier needs

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use super::DevicePoller;
use crate::error::PollError;
use crate::models::RawInterface;
use crate::snmp::{Message, NO_ERROR, NO_SUCH_NAME, Oid, Pdu, PduKind, Value, VarBind};

/// IF-MIB::ifAlias
pub const IF_ALIAS: &[u32] = &[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 18];
/// IF-MIB::ifName
pub const IF_NAME: &[u32] = &[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 1];
/// IF-MIB::ifOperStatus
pub const IF_OPER_STATUS: &[u32] = &[1, 3, 6, 1, 2, 1, 2, 2, 1, 8];
/// IF-MIB::ifAdminStatus
pub const IF_ADMIN_STATUS: &[u32] = &[1, 3, 6, 1, 2, 1, 2, 2, 1, 7];

const MAX_DATAGRAM: usize = 65_535;

#[derive(Debug, Clone)]
pub struct SnmpTarget {
    pub host: String,
    pub port: u16,
    pub community: String,
}

/// Timing for one walk. Retries apply per request; the deadline bounds the whole walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnmpSettings {
    pub request_timeout: Duration,
    pub retries: u32,
    pub deadline: Duration,
}

impl Default for SnmpSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(1),
            retries: 5,
            deadline: Duration::from_secs(90),
        }
    }
}

pub struct SnmpPoller {
    target: SnmpTarget,
    settings: SnmpSettings,
}

impl SnmpPoller {
    pub fn new(target: SnmpTarget, settings: SnmpSettings) -> Self {
        Self { target, settings }
    }

    pub fn target(&self) -> &SnmpTarget {
        &self.target
    }

    #[instrument(skip(self), fields(poller = "snmp", operation = "walk", host = %self.target.host))]
    async fn walk(&self) -> Result<Vec<RawInterface>, PollError> {
        let socket = self.connect().await?;
        let columns = [IF_ALIAS, IF_NAME, IF_OPER_STATUS, IF_ADMIN_STATUS].map(Oid::from_arcs);
        let mut cursor = columns.to_vec();
        let mut request_id: i32 = 0;
        let mut rows = Vec::new();

        loop {
            request_id = next_request_id(request_id);
            let response = self
                .exchange(&socket, Pdu::get_next(request_id, &cursor))
                .await?;
            if response.error_status == NO_SUCH_NAME {
                break;
            }
            self.check_status(&response)?;
            if response.varbinds.len() != columns.len() {
                return Err(self.malformed(format!(
                    "expected {} variable bindings, got {}",
                    columns.len(),
                    response.varbinds.len()
                )));
            }

            let lead = &response.varbinds[0];
            let Some(index) = lead.oid.suffix_after(&columns[0]) else {
                break;
            };
            if lead.value == Value::EndOfMibView || index.is_empty() {
                break;
            }
            if lead.oid <= cursor[0] {
                return Err(self.malformed(format!("OID {} does not increase", lead.oid)));
            }
            let index = index.to_vec();
            let mut varbinds = response.varbinds;

            // Another column skipped this row; fetch its cells directly.
            let gaps: Vec<usize> = (1..columns.len())
                .filter(|&i| varbinds[i].oid.suffix_after(&columns[i]) != Some(index.as_slice()))
                .collect();
            if !gaps.is_empty() {
                request_id = next_request_id(request_id);
                let oids: Vec<Oid> = gaps.iter().map(|&i| columns[i].child(&index)).collect();
                let fill = self.exchange(&socket, Pdu::get(request_id, &oids)).await?;
                if fill.error_status == NO_ERROR && fill.varbinds.len() == gaps.len() {
                    for (&i, vb) in gaps.iter().zip(fill.varbinds) {
                        varbinds[i] = vb;
                    }
                } else {
                    debug!(
                        index = ?index,
                        error_status = fill.error_status,
                        "row has missing columns"
                    );
                }
            }

            rows.push(row_at(&columns, &index, &varbinds));
            cursor = columns.iter().map(|column| column.child(&index)).collect();
        }

        debug!(interfaces = rows.len(), requests = request_id, "walk complete");
        Ok(rows)
    }

    async fn connect(&self) -> Result<UdpSocket, PollError> {
        let host = self.target.host.as_str();
        let addr: SocketAddr = match tokio::net::lookup_host((host, self.target.port)).await {
            Ok(mut addrs) => addrs.next().ok_or_else(|| PollError::Unresolvable {
                host: host.to_string(),
            })?,
            Err(e) => {
                warn!(error = %e, operation = "lookup_host", "target does not resolve");
                return Err(PollError::Unresolvable {
                    host: host.to_string(),
                });
            }
        };
        let local = if addr.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let socket = UdpSocket::bind(local)
            .await
            .map_err(|e| self.unreachable(e))?;
        socket.connect(addr).await.map_err(|e| self.unreachable(e))?;
        debug!(%addr, "UDP socket connected");
        Ok(socket)
    }

    /// Sends `pdu` and waits for the matching response, resending on timeout.
    async fn exchange(&self, socket: &UdpSocket, pdu: Pdu) -> Result<Pdu, PollError> {
        let request_id = pdu.request_id;
        let request = Message::v2c(&self.target.community, pdu).encode();
        let mut buf = vec![0u8; MAX_DATAGRAM];
        for attempt in 0..=self.settings.retries {
            socket
                .send(&request)
                .await
                .map_err(|e| self.unreachable(e))?;
            match timeout(
                self.settings.request_timeout,
                self.receive(socket, request_id, &mut buf),
            )
            .await
            {
                Ok(result) => return result,
                Err(_) => debug!(attempt, request_id, "SNMP request timed out"),
            }
        }
        Err(PollError::NotResponding {
            host: self.target.host.clone(),
        })
    }

    async fn receive(
        &self,
        socket: &UdpSocket,
        request_id: i32,
        buf: &mut [u8],
    ) -> Result<Pdu, PollError> {
        loop {
            let n = socket.recv(buf).await.map_err(|e| self.unreachable(e))?;
            let message = Message::decode(&buf[..n])?;
            if message.pdu.kind != PduKind::Response || message.pdu.request_id != request_id {
                debug!(
                    expected = request_id,
                    received = message.pdu.request_id,
                    "discarding unrelated SNMP message"
                );
                continue;
            }
            return Ok(message.pdu);
        }
    }

    fn check_status(&self, response: &Pdu) -> Result<(), PollError> {
        if response.error_status == NO_ERROR {
            return Ok(());
        }
        Err(PollError::Agent {
            host: self.target.host.clone(),
            status: response.error_status,
            index: response.error_index,
        })
    }

    fn unreachable(&self, source: std::io::Error) -> PollError {
        PollError::Unreachable {
            host: self.target.host.clone(),
            source,
        }
    }

    fn malformed(&self, reason: String) -> PollError {
        PollError::MalformedResponse {
            host: self.target.host.clone(),
            reason,
        }
    }
}

impl DevicePoller for SnmpPoller {
    async fn poll(&self) -> Result<Vec<RawInterface>, PollError> {
        let deadline = self.settings.deadline;
        match timeout(deadline, self.walk()).await {
            Ok(result) => result,
            Err(_) => Err(PollError::Timeout(deadline.as_secs())),
        }
    }
}

fn next_request_id(id: i32) -> i32 {
    if id == i32::MAX { 1 } else { id + 1 }
}

/// Builds the row for `index`. A column whose binding is not exactly `column.index`
/// (a gap in that column) or carries an exception is reported as missing.
fn row_at(columns: &[Oid], index: &[u32], varbinds: &[VarBind]) -> RawInterface {
    RawInterface {
        label: cell(columns, index, varbinds, 0).and_then(Value::as_text),
        name: cell(columns, index, varbinds, 1).and_then(Value::as_text),
        oper_status: cell(columns, index, varbinds, 2).and_then(Value::as_i64),
        admin_status: cell(columns, index, varbinds, 3).and_then(Value::as_i64),
    }
}

fn cell<'a>(columns: &[Oid], index: &[u32], varbinds: &'a [VarBind], i: usize) -> Option<&'a Value> {
    let vb = &varbinds[i];
    (vb.oid.suffix_after(&columns[i]) == Some(index) && !vb.value.is_exception()).then_some(&vb.value)
}
