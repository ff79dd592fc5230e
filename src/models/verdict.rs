// Overall check verdict and its monitoring exit code

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verdict {
    Ok,
    Warning,
    Critical,
}

impl Verdict {
    /// Critical when any alarm was raised, else warning when any warning was raised.
    pub fn from_counts(alarms: u64, warnings: u64) -> Self {
        if alarms > 0 {
            Verdict::Critical
        } else if warnings > 0 {
            Verdict::Warning
        } else {
            Verdict::Ok
        }
    }

    /// Nagios plugin exit status: 0 OK, 1 WARNING, 2 CRITICAL.
    pub fn exit_code(&self) -> u8 {
        match self {
            Verdict::Ok => 0,
            Verdict::Warning => 1,
            Verdict::Critical => 2,
        }
    }

    /// First line of the plugin output.
    pub fn heading(&self) -> &'static str {
        match self {
            Verdict::Ok => "Everything OK",
            Verdict::Warning => "Warning!",
            Verdict::Critical => "Critical!",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::Ok => "ok",
            Verdict::Warning => "warning",
            Verdict::Critical => "critical",
        })
    }
}
