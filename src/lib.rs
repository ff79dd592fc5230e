// Library for tests to access modules

pub mod classifier;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod poller;
pub mod probe;
pub mod report;
pub mod snmp;
pub mod version;
