/// Vulnerability counts reported by the scanner for the tiers the policy
/// looks at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VulnerabilityDistribution {
    pub critical: u64,
    pub high: u64,
}

impl VulnerabilityDistribution {
    pub fn new(critical: u64, high: u64) -> Self {
        Self { critical, high }
    }
}
