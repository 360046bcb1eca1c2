use std::error::Error;

use thiserror::Error;

use crate::domain::image_reference::ImageReference;

/// Local image store of the container engine.
#[async_trait::async_trait]
pub trait ImageRepository {
    async fn image_exists(&self, image: &ImageReference) -> Result<bool, ImageRepositoryError>;
    async fn pull_image(&self, image: &ImageReference) -> Result<(), ImageRepositoryError>;
}

#[derive(Error, Debug)]
pub enum ImageRepositoryError {
    #[error("image repository error: {0}")]
    ImageRepositoryError(#[from] Box<dyn Error + Send + Sync>),
}
