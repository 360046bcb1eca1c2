use thiserror::Error;

use super::{Config, ImageRepository, ImageScanner, ReportReader, ScannerInstaller};

pub struct Components {
    pub image_repository: Box<dyn ImageRepository + Send + Sync>,
    pub scanner_installer: Box<dyn ScannerInstaller + Send + Sync>,
    pub image_scanner: Box<dyn ImageScanner + Send + Sync>,
    pub report_reader: Box<dyn ReportReader + Send + Sync>,
}

#[derive(Error, Debug)]
pub enum ComponentFactoryError {
    #[error("unable to connect to the docker daemon: {0}")]
    DockerClientError(String),

    #[error("unable to build the http client: {0}")]
    HttpClientError(String),
}

pub trait ComponentFactory {
    fn create_components(&self, config: &Config) -> Result<Components, ComponentFactoryError>;
}
