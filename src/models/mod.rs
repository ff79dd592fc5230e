// Domain models: polled interface rows, decoded records, findings and verdicts

mod finding;
mod interface;
mod verdict;

pub use finding::{Finding, Severity};
pub use interface::{IfStatus, InterfaceRecord, RawInterface, Role};
pub use verdict::Verdict;
