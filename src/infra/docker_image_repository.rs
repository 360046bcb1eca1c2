use bollard::{Docker, errors::Error as BollardError, image::CreateImageOptions};
use futures::StreamExt;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    app::{ImageRepository, ImageRepositoryError},
    domain::image_reference::ImageReference,
};

#[derive(Error, Debug)]
pub(in crate::infra) enum DockerImageRepositoryError {
    #[error("internal docker client error: {0:?}")]
    Docker(#[from] BollardError),
}

impl From<DockerImageRepositoryError> for ImageRepositoryError {
    fn from(value: DockerImageRepositoryError) -> Self {
        ImageRepositoryError::ImageRepositoryError(Box::new(value))
    }
}

#[derive(Clone)]
pub struct DockerImageRepository {
    docker_client: Docker,
}

impl DockerImageRepository {
    pub fn new(docker_client: Docker) -> Self {
        Self { docker_client }
    }

    async fn inspect(&self, image: &ImageReference) -> Result<bool, DockerImageRepositoryError> {
        match self.docker_client.inspect_image(image.as_str()).await {
            Ok(inspected) => {
                debug!("image {image} resolved to {:?}", inspected.id);
                Ok(true)
            }
            Err(BollardError::DockerResponseServerError {
                status_code: 404, ..
            }) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn pull(&self, image: &ImageReference) -> Result<(), DockerImageRepositoryError> {
        let mut progress = self.docker_client.create_image(
            Some(CreateImageOptions {
                from_image: image.as_str(),
                tag: image.pull_tag().unwrap_or_default(),
                ..Default::default()
            }),
            None,
            None,
        );

        while let Some(result) = progress.next().await {
            let info = result?;
            if let Some(status) = info.status {
                match info.id {
                    Some(layer) => debug!("pull status: {layer}: {status}"),
                    None => info!("pull status: {status}"),
                }
            }
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl ImageRepository for DockerImageRepository {
    async fn image_exists(&self, image: &ImageReference) -> Result<bool, ImageRepositoryError> {
        Ok(self.inspect(image).await?)
    }

    async fn pull_image(&self, image: &ImageReference) -> Result<(), ImageRepositoryError> {
        Ok(self.pull(image).await?)
    }
}
