// Plugin output: verdict heading, findings, summary, and the exit codes that go with them

use std::fmt::Write as _;
use std::time::Duration;

use crate::classifier::Classifier;
use crate::error::CheckError;
use crate::models::{InterfaceRecord, Verdict};

/// Exit status for transport failures.
pub const EXIT_TRANSPORT_FAILURE: u8 = 1;
/// Nagios UNKNOWN: the check could not produce a verdict.
pub const EXIT_UNKNOWN: u8 = 3;

pub struct Report<'a> {
    classifier: &'a Classifier,
    elapsed: Duration,
}

impl<'a> Report<'a> {
    pub fn new(classifier: &'a Classifier, elapsed: Duration) -> Self {
        Self {
            classifier,
            elapsed,
        }
    }

    pub fn verdict(&self) -> Verdict {
        self.classifier.verdict()
    }

    pub fn exit_code(&self) -> u8 {
        self.verdict().exit_code()
    }

    /// Heading, one line per finding in evaluation order, summary and timing.
    pub fn render(&self) -> String {
        let counters = self.classifier.counters();
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.verdict().heading());
        for finding in self.classifier.findings() {
            let _ = writeln!(out, "{finding}");
        }
        let _ = writeln!(
            out,
            "Total interfaces: {}, #admin Up: {}, #oper Up: {}",
            counters.total_interfaces, counters.admin_up, counters.oper_up
        );
        let _ = writeln!(
            out,
            "Interface check completed in {} second(s).",
            self.elapsed.as_secs_f64().round() as u64
        );
        out
    }
}

pub fn failure_exit_code(err: &CheckError) -> u8 {
    match err {
        CheckError::Poll(_) => EXIT_TRANSPORT_FAILURE,
        CheckError::Classify(_) => EXIT_UNKNOWN,
    }
}

/// Verbose diagnostic line for one classified interface.
pub fn trace_line(record: &InterfaceRecord) -> String {
    format!(
        "ifName: {} ifAlias: {} ifOperStatus: {} ifAdminStatus: {}",
        record.name, record.label, record.oper_status, record.admin_status
    )
}
