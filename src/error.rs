// Error types for polling and classification

use thiserror::Error;

use crate::snmp::DecodeError;

/// A record violated the classifier's input assumptions.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("invalid interface record {name}: {reason}")]
    InvalidRecord { name: String, reason: String },
}

impl ClassifyError {
    pub fn invalid(name: &str, reason: impl Into<String>) -> Self {
        ClassifyError::InvalidRecord {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Transport failure while collecting interface rows. Always fatal for the check.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("SNMP execution is taking longer than {0}s")]
    Timeout(u64),

    #[error("Host {host} is not resolving or not responding to SNMP")]
    Unresolvable { host: String },

    #[error("Host {host} is not resolving or not responding to SNMP")]
    Unreachable {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Host {host} is not responding to SNMP")]
    NotResponding { host: String },

    #[error("Host {host} returned SNMP error status {status} (index {index})")]
    Agent { host: String, status: i64, index: i64 },

    #[error("Host {host} sent a malformed SNMP response: {reason}")]
    MalformedResponse { host: String, reason: String },

    #[error("SNMP decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Failure of one whole check run.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Poll(#[from] PollError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),
}
