// Check pipeline: poll everything, then filter, decode and classify in poller order

use tracing::{debug, info};

use crate::classifier::Classifier;
use crate::error::{CheckError, ClassifyError};
use crate::filter::InterfaceFilter;
use crate::models::{InterfaceRecord, RawInterface};
use crate::poller::DevicePoller;
use crate::report::trace_line;

/// Result of one successful check run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOutcome {
    pub classifier: Classifier,
    /// Per-interface trace lines; empty unless verbose.
    pub trace: Vec<String>,
}

pub async fn run_check<P: DevicePoller>(
    poller: &P,
    filter: &InterfaceFilter,
    verbose: bool,
) -> Result<CheckOutcome, CheckError> {
    let rows = poller.poll().await?;
    let polled = rows.len();
    let outcome = classify_rows(rows, filter, verbose)?;
    let counters = outcome.classifier.counters();
    info!(
        polled,
        classified = counters.total_interfaces,
        alarms = counters.alarms,
        warnings = counters.warnings,
        verdict = %outcome.classifier.verdict(),
        "interface check finished"
    );
    Ok(outcome)
}

/// Classifies already collected rows. Stops at the first row that cannot be decoded.
pub fn classify_rows<I>(
    rows: I,
    filter: &InterfaceFilter,
    verbose: bool,
) -> Result<CheckOutcome, ClassifyError>
where
    I: IntoIterator<Item = RawInterface>,
{
    let mut outcome = CheckOutcome::default();
    for raw in rows {
        let Some(name) = raw.name.as_deref() else {
            return Err(ClassifyError::invalid("<unnamed>", "missing ifName"));
        };
        if !filter.accepts(name) {
            continue;
        }
        let record = InterfaceRecord::try_from(raw)?;
        if verbose {
            outcome.trace.push(trace_line(&record));
        }
        let findings = outcome.classifier.classify(&record);
        debug!(
            interface = %record.name,
            label = %record.label,
            findings = findings.len(),
            "interface classified"
        );
    }
    Ok(outcome)
}
