use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::{
    app::{ReportError, ReportReader},
    domain::vulnerability_distribution::VulnerabilityDistribution,
};

// Only the fields the policy needs, the rest of the report is ignored.
#[derive(Deserialize, Debug)]
struct TwistcliReport {
    results: Vec<TwistcliScanResult>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct TwistcliScanResult {
    vulnerability_distribution: TwistcliVulnerabilityDistribution,
}

#[derive(Deserialize, Debug)]
struct TwistcliVulnerabilityDistribution {
    critical: u64,
    high: u64,
}

impl From<TwistcliVulnerabilityDistribution> for VulnerabilityDistribution {
    fn from(value: TwistcliVulnerabilityDistribution) -> Self {
        VulnerabilityDistribution::new(value.critical, value.high)
    }
}

#[derive(Error, Debug)]
pub(in crate::infra) enum TwistcliReportError {
    #[error("unable to read the report: {0}")]
    IO(#[from] std::io::Error),

    #[error("error deserializing the report: {0}")]
    ReportDeserialization(#[from] serde_json::Error),

    #[error("the report contains no results")]
    NoResults,
}

impl From<TwistcliReportError> for ReportError {
    fn from(value: TwistcliReportError) -> Self {
        ReportError::InvalidReport(Box::new(value))
    }
}

fn distribution_from_slice(
    contents: &[u8],
) -> Result<VulnerabilityDistribution, TwistcliReportError> {
    let report: TwistcliReport = serde_json::from_slice(contents)?;

    report
        .results
        .into_iter()
        .next()
        .map(|result| result.vulnerability_distribution.into())
        .ok_or(TwistcliReportError::NoResults)
}

#[derive(Clone, Copy, Default)]
pub struct TwistcliReportReader;

#[async_trait::async_trait]
impl ReportReader for TwistcliReportReader {
    async fn read_distribution(
        &self,
        report: &Path,
    ) -> Result<VulnerabilityDistribution, ReportError> {
        let contents = tokio::fs::read(report)
            .await
            .map_err(TwistcliReportError::from)?;

        Ok(distribution_from_slice(&contents)?)
    }
}
