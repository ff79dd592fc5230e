// Primary-interface filter: physical ports and bundles only, never their logical units

/// Prefixes of interfaces worth classifying: fabric trunks, aggregates, 10G and gigabit
/// ports, fabric node ports and the NW-NG aggregate bundle. `#` matches one ASCII digit.
pub const DEFAULT_PREFIXES: &[&str] = &["fte-", "ae", "xe-", "ge-", "qnode#:xe", "NW-NG-0:ae"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceFilter {
    prefixes: Vec<String>,
}

impl Default for InterfaceFilter {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIXES.iter().copied())
    }
}

impl InterfaceFilter {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// True iff `name` starts with a primary prefix and is not a sub-interface.
    pub fn accepts(&self, name: &str) -> bool {
        self.prefixes
            .iter()
            .any(|prefix| matches_prefix(name, prefix))
            && !is_subinterface(name)
    }
}

fn matches_prefix(name: &str, prefix: &str) -> bool {
    let mut chars = name.chars();
    prefix.chars().all(|p| match chars.next() {
        Some(c) if p == '#' => c.is_ascii_digit(),
        Some(c) => c == p,
        None => false,
    })
}

/// Logical unit of a port: the name ends in a `.` followed by one or more digits.
pub fn is_subinterface(name: &str) -> bool {
    let base = name.trim_end_matches(|c: char| c.is_ascii_digit());
    base.len() < name.len() && base.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_prefix_digit_placeholder() {
        assert!(matches_prefix("qnode3:xe-0/0/1", "qnode#:xe"));
        assert!(!matches_prefix("qnodeX:xe-0/0/1", "qnode#:xe"));
        assert!(!matches_prefix("qnode12:xe-0/0/1", "qnode#:xe"));
    }

    #[test]
    fn matches_prefix_name_shorter_than_prefix() {
        assert!(!matches_prefix("xe", "xe-"));
        assert!(matches_prefix("ae", "ae"));
    }
}
