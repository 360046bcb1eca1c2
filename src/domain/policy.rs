use std::fmt::{Display, Formatter};

use super::{severity::Severity, vulnerability_distribution::VulnerabilityDistribution};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanPolicy {
    pub critical_only: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolicyViolation {
    pub severity: Severity,
    pub count: u64,
}

impl Display for PolicyViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} vulnerabilities detected: {}",
            self.severity, self.count
        )
    }
}

impl ScanPolicy {
    pub fn new(critical_only: bool) -> Self {
        Self { critical_only }
    }

    /// Critical findings are checked first; high findings only count when
    /// the policy is not critical-only.
    pub fn evaluate(&self, distribution: &VulnerabilityDistribution) -> Option<PolicyViolation> {
        if distribution.critical > 0 {
            return Some(PolicyViolation {
                severity: Severity::Critical,
                count: distribution.critical,
            });
        }

        if !self.critical_only && distribution.high > 0 {
            return Some(PolicyViolation {
                severity: Severity::High,
                count: distribution.high,
            });
        }

        None
    }
}
