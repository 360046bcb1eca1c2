use std::{error::Error, path::Path};

use thiserror::Error;

use crate::domain::vulnerability_distribution::VulnerabilityDistribution;

#[async_trait::async_trait]
pub trait ReportReader {
    async fn read_distribution(
        &self,
        report: &Path,
    ) -> Result<VulnerabilityDistribution, ReportError>;
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("invalid scan report: {0}")]
    InvalidReport(#[from] Box<dyn Error + Send + Sync>),
}
