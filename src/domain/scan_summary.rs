use std::fmt::{Display, Formatter};

use super::{image_reference::ImageReference, vulnerability_distribution::VulnerabilityDistribution};

const BORDER_WIDTH: usize = 70;
const LINE_WIDTH: usize = 66;

/// Bordered, fixed-width results banner printed once the report is parsed.
pub struct ScanSummary<'a> {
    image: &'a ImageReference,
    distribution: &'a VulnerabilityDistribution,
}

impl<'a> ScanSummary<'a> {
    pub fn new(image: &'a ImageReference, distribution: &'a VulnerabilityDistribution) -> Self {
        Self {
            image,
            distribution,
        }
    }
}

fn border(f: &mut Formatter<'_>) -> std::fmt::Result {
    writeln!(f, " {} ", "*".repeat(BORDER_WIDTH))
}

fn line(f: &mut Formatter<'_>, message: &str) -> std::fmt::Result {
    writeln!(f, " * {message:<LINE_WIDTH$} *")
}

impl Display for ScanSummary<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        border(f)?;
        line(f, "                   VULNERABILITY SCAN RESULTS")?;
        line(f, " ")?;
        line(f, &format!("  IMAGE: {}", self.image))?;
        line(f, &format!("    -> {} critical", self.distribution.critical))?;
        line(f, &format!("    -> {} high", self.distribution.high))?;
        line(f, " ")?;
        border(f)
    }
}
