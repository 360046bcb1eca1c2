use bollard::Docker;
use tracing::warn;

use crate::{
    app::{
        Config,
        component_factory::{ComponentFactory, ComponentFactoryError, Components},
    },
    infra::{
        DockerImageRepository, TwistcliBinaryManager, TwistcliImageScanner, TwistcliReportReader,
    },
};

pub struct ConcreteComponentFactory;

impl ComponentFactory for ConcreteComponentFactory {
    fn create_components(&self, config: &Config) -> Result<Components, ComponentFactoryError> {
        let docker_client = Docker::connect_with_local_defaults()
            .map_err(|e| ComponentFactoryError::DockerClientError(e.to_string()))?;
        let image_repository = DockerImageRepository::new(docker_client);

        if config.accept_invalid_certs {
            warn!("TLS certificate verification is disabled for the twistcli download");
        }
        let scanner_installer = TwistcliBinaryManager::new(
            config.scanner_path.clone(),
            config.console_url.clone(),
            config.accept_invalid_certs,
        )
        .map_err(|e| ComponentFactoryError::HttpClientError(e.to_string()))?;

        let image_scanner = TwistcliImageScanner::new(config.console_url.clone());

        Ok(Components {
            image_repository: Box::new(image_repository),
            scanner_installer: Box::new(scanner_installer),
            image_scanner: Box::new(image_scanner),
            report_reader: Box::new(TwistcliReportReader),
        })
    }
}
