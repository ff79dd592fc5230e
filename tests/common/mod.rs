// Shared test helpers: record builders and an in-process SNMP agent

#![allow(dead_code)]

use ifstate_check::models::{IfStatus, InterfaceRecord};
use ifstate_check::poller::{IF_ADMIN_STATUS, IF_ALIAS, IF_NAME, IF_OPER_STATUS};
use ifstate_check::snmp::{Message, Oid, Pdu, PduKind, Value, VarBind};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::ops::Bound;
use tokio::net::UdpSocket;

pub fn record(label: &str, name: &str, oper: IfStatus, admin: IfStatus) -> InterfaceRecord {
    InterfaceRecord::new(label, name, oper, admin)
}

/// One ifTable/ifXTable row as the fake agent serves it.
pub struct AgentRow {
    pub index: u32,
    pub alias: Option<&'static str>,
    pub name: &'static str,
    pub oper: i64,
    pub admin: i64,
}

pub fn row(index: u32, alias: &'static str, name: &'static str, oper: i64, admin: i64) -> AgentRow {
    AgentRow {
        index,
        alias: Some(alias),
        name,
        oper,
        admin,
    }
}

/// MIB view with the four walked columns plus neighbouring objects, so walks have
/// to detect the end of each column themselves.
pub fn mib(rows: &[AgentRow]) -> BTreeMap<Oid, Value> {
    let mut table = BTreeMap::new();
    for r in rows {
        let idx = [r.index];
        if let Some(alias) = r.alias {
            table.insert(
                Oid::from_arcs(IF_ALIAS).child(&idx),
                Value::OctetString(alias.as_bytes().to_vec()),
            );
        }
        table.insert(
            Oid::from_arcs(IF_NAME).child(&idx),
            Value::OctetString(r.name.as_bytes().to_vec()),
        );
        table.insert(
            Oid::from_arcs(IF_OPER_STATUS).child(&idx),
            Value::Integer(r.oper),
        );
        table.insert(
            Oid::from_arcs(IF_ADMIN_STATUS).child(&idx),
            Value::Integer(r.admin),
        );
        // ifLastChange and ifCounterDiscontinuityTime follow the walked columns.
        table.insert(
            "1.3.6.1.2.1.2.2.1.9".parse::<Oid>().unwrap().child(&idx),
            Value::TimeTicks(1000),
        );
        table.insert(
            "1.3.6.1.2.1.31.1.1.1.19".parse::<Oid>().unwrap().child(&idx),
            Value::TimeTicks(0),
        );
    }
    table
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Normal,
    /// Never answers.
    Silent,
    /// Ignores the first `n` datagrams.
    DropFirst(usize),
    /// Sends a response with a stale request id before every real one.
    StaleFirst,
}

/// Spawns a v2c agent on loopback serving `table` for `community`.
pub async fn spawn_agent(
    table: BTreeMap<Oid, Value>,
    community: &'static str,
    behavior: Behavior,
) -> SocketAddr {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();
    tokio::spawn(async move {
        let mut buf = vec![0u8; 65_535];
        let mut seen = 0usize;
        loop {
            let Ok((n, peer)) = socket.recv_from(&mut buf).await else {
                break;
            };
            let Ok(request) = Message::decode(&buf[..n]) else {
                continue;
            };
            seen += 1;
            match behavior {
                Behavior::Silent => continue,
                Behavior::DropFirst(k) if seen <= k => continue,
                _ => {}
            }
            if request.community != community.as_bytes() {
                continue;
            }
            let varbinds = request
                .pdu
                .varbinds
                .iter()
                .map(|vb| answer(&table, request.pdu.kind, &vb.oid))
                .collect();
            if behavior == Behavior::StaleFirst {
                let stale = Message::v2c(
                    community,
                    Pdu::response(request.pdu.request_id.wrapping_sub(1), vec![]),
                );
                let _ = socket.send_to(&stale.encode(), peer).await;
            }
            let response = Message::v2c(community, Pdu::response(request.pdu.request_id, varbinds));
            let _ = socket.send_to(&response.encode(), peer).await;
        }
    });
    addr
}

fn answer(table: &BTreeMap<Oid, Value>, kind: PduKind, oid: &Oid) -> VarBind {
    match kind {
        PduKind::GetRequest => VarBind::new(
            oid.clone(),
            table.get(oid).cloned().unwrap_or(Value::NoSuchInstance),
        ),
        _ => table
            .range((Bound::Excluded(oid.clone()), Bound::Unbounded))
            .next()
            .map(|(k, v)| VarBind::new(k.clone(), v.clone()))
            .unwrap_or_else(|| VarBind::new(oid.clone(), Value::EndOfMibView)),
    }
}
