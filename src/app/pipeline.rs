use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{
    credentials::Credentials,
    image_reference::ImageReference,
    policy::{PolicyViolation, ScanPolicy},
    scan_summary::ScanSummary,
    vulnerability_distribution::VulnerabilityDistribution,
};

use super::{
    Config, ConfigError, CredentialsError, EnvironmentReader, ImageRepository,
    ImageRepositoryError, ImageScanError, ImageScanner, ReportError, ScannerInstallError,
    component_factory::{ComponentFactory, ComponentFactoryError},
    load_credentials,
};

#[derive(Clone, Debug)]
pub struct ScanRequest {
    pub image: ImageReference,
    pub policy: ScanPolicy,
}

#[derive(Clone, Debug)]
pub struct ScanOutcome {
    pub image: ImageReference,
    pub distribution: VulnerabilityDistribution,
    pub violation: Option<PolicyViolation>,
}

impl ScanOutcome {
    pub fn summary(&self) -> ScanSummary<'_> {
        ScanSummary::new(&self.image, &self.distribution)
    }
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Components(#[from] ComponentFactoryError),

    #[error(transparent)]
    ImageRepository(#[from] ImageRepositoryError),

    #[error(transparent)]
    ScannerInstall(#[from] ScannerInstallError),

    #[error(transparent)]
    ImageScan(#[from] ImageScanError),

    #[error("{}: {source}", path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: ReportError,
    },
}

/// Runs credential loading, image presence, scanner installation, the scan
/// itself and report evaluation, strictly in that order.
pub struct ScanPipeline<F, E> {
    component_factory: F,
    environment: E,
}

impl<F, E> ScanPipeline<F, E>
where
    F: ComponentFactory,
    E: EnvironmentReader,
{
    pub fn new(component_factory: F, environment: E) -> Self {
        Self {
            component_factory,
            environment,
        }
    }

    pub async fn run(&self, request: &ScanRequest) -> Result<ScanOutcome, PipelineError> {
        let credentials = load_credentials(&self.environment)?;
        let config = Config::from_env(&self.environment)?;
        let components = self.component_factory.create_components(&config)?;

        ensure_image(components.image_repository.as_ref(), &request.image).await?;

        let scanner_path = components
            .scanner_installer
            .install_if_not_present(&credentials)
            .await?;
        info!("twistcli command located: {}", scanner_path.display());

        let report = ReportFile::new(
            request.image.report_path_in(&config.report_dir),
            config.keep_report,
        );
        run_scan(
            components.image_scanner.as_ref(),
            &scanner_path,
            &request.image,
            &credentials,
            report.path(),
        )
        .await?;

        let distribution = components
            .report_reader
            .read_distribution(report.path())
            .await
            .map_err(|source| PipelineError::Report {
                path: report.path().to_path_buf(),
                source,
            })?;

        Ok(ScanOutcome {
            image: request.image.clone(),
            distribution,
            violation: request.policy.evaluate(&distribution),
        })
    }
}

async fn ensure_image(
    repository: &(dyn ImageRepository + Send + Sync),
    image: &ImageReference,
) -> Result<(), ImageRepositoryError> {
    if repository.image_exists(image).await? {
        info!("image present on system: {image}");
        return Ok(());
    }

    info!("image not found, pulling image: {image}");
    repository.pull_image(image).await?;
    info!("image pulled: {image}");
    Ok(())
}

async fn run_scan(
    scanner: &(dyn ImageScanner + Send + Sync),
    scanner_path: &Path,
    image: &ImageReference,
    credentials: &Credentials,
    output_file: &Path,
) -> Result<(), ImageScanError> {
    info!("executing twistcli against {image}");
    scanner
        .scan_image(scanner_path, image, credentials, output_file)
        .await?;
    info!("scan report written to {}", output_file.display());
    Ok(())
}

/// Scan report on disk, removed when dropped unless it has to be kept.
struct ReportFile {
    path: PathBuf,
    keep: bool,
}

impl ReportFile {
    fn new(path: PathBuf, keep: bool) -> Self {
        Self { path, keep }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ReportFile {
    fn drop(&mut self) {
        if self.keep {
            return;
        }

        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("removed scan report {}", self.path.display()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => warn!("unable to remove scan report {}: {err}", self.path.display()),
        }
    }
}
