pub mod component_factory;
mod config;
mod credentials_loader;
mod environment;
mod image_repository;
mod image_scanner;
mod pipeline;
mod report_reader;
mod scanner_installer;

pub use config::*;
pub use credentials_loader::{
    CredentialsError, PASSWORD_ENV_VAR, USERNAME_ENV_VAR, load_credentials,
};
pub use environment::{EnvironmentReader, ProcessEnvironment};
pub use image_repository::{ImageRepository, ImageRepositoryError};
pub use image_scanner::{ImageScanError, ImageScanner};
pub use pipeline::{PipelineError, ScanOutcome, ScanPipeline, ScanRequest};
pub use report_reader::{ReportError, ReportReader};
pub use scanner_installer::{ScannerInstallError, ScannerInstaller};
