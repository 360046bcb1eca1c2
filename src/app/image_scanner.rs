use std::{error::Error, path::Path};

use thiserror::Error;

use crate::domain::{credentials::Credentials, image_reference::ImageReference};

#[async_trait::async_trait]
pub trait ImageScanner {
    /// Scans `image` with the scanner at `scanner_path`, which writes its JSON
    /// report to `output_file`.
    async fn scan_image(
        &self,
        scanner_path: &Path,
        image: &ImageReference,
        credentials: &Credentials,
        output_file: &Path,
    ) -> Result<(), ImageScanError>;
}

#[derive(Error, Debug)]
pub enum ImageScanError {
    #[error("error in the scanner execution: {0}")]
    InternalScannerError(#[from] Box<dyn Error + Send + Sync>),
}
