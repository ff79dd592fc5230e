// Classification engine: interface role tag + link state -> findings and running counts

use crate::models::{Finding, IfStatus, InterfaceRecord, Role, Severity, Verdict};

/// Running totals for one check invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateCounters {
    pub total_interfaces: u64,
    pub admin_up: u64,
    pub oper_up: u64,
    /// Critical findings.
    pub alarms: u64,
    /// Warning findings.
    pub warnings: u64,
}

/// Classifier state for one invocation. Findings keep evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classifier {
    findings: Vec<Finding>,
    counters: AggregateCounters,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates one record and returns the findings it produced.
    ///
    /// The down / CUST down / bad suffix checks are a first-match group; the CORE admin down
    /// and both FREE checks run independently of that group and of each other.
    pub fn classify(&mut self, record: &InterfaceRecord) -> &[Finding] {
        let start = self.findings.len();
        let InterfaceRecord {
            label,
            name,
            oper_status: oper,
            admin_status: admin,
        } = record;
        let (oper, admin) = (*oper, *admin);
        let role = record.role();

        self.counters.total_interfaces += 1;
        if admin == IfStatus::Up {
            self.counters.admin_up += 1;
        }
        if oper == IfStatus::Up {
            self.counters.oper_up += 1;
        }

        if role == Some(Role::Core) && admin == IfStatus::Up && oper != IfStatus::Up {
            self.push(Finding::critical(format!(
                "CORE interface {name} {label} is down"
            )));
        } else if role == Some(Role::Cust) && oper == IfStatus::Down {
            self.push(Finding::warning(format!(
                "CUST interface {name} {label} is down"
            )));
        } else if role.is_none() {
            self.push(Finding::warning(format!(
                "interface {name} {label} has a bad suffix in description."
            )));
        }

        if role == Some(Role::Core) && admin == IfStatus::Down {
            self.push(Finding::warning(format!(
                "CORE interface {name} {label} is admin down"
            )));
        }
        if role == Some(Role::Free) && oper == IfStatus::Up {
            self.push(Finding::warning(format!(
                "FREE interface {name} {label} is up?!"
            )));
        }
        if role == Some(Role::Free) && admin == IfStatus::Up && oper == IfStatus::Down {
            self.push(Finding::warning(format!(
                "FREE interface {name} {label} should be admin down"
            )));
        }

        &self.findings[start..]
    }

    fn push(&mut self, finding: Finding) {
        match finding.severity {
            Severity::Critical => self.counters.alarms += 1,
            Severity::Warning => self.counters.warnings += 1,
            Severity::None => {}
        }
        self.findings.push(finding);
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn counters(&self) -> &AggregateCounters {
        &self.counters
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_counts(self.counters.alarms, self.counters.warnings)
    }
}
