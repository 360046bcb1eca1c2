use std::{error::Error, path::PathBuf};

use thiserror::Error;

use crate::domain::credentials::Credentials;

#[async_trait::async_trait]
pub trait ScannerInstaller {
    /// Returns the path of an executable scanner, downloading it first when
    /// nothing is installed yet.
    async fn install_if_not_present(
        &self,
        credentials: &Credentials,
    ) -> Result<PathBuf, ScannerInstallError>;
}

#[derive(Error, Debug)]
pub enum ScannerInstallError {
    #[error("scanner installation error: {0}")]
    InstallerError(#[from] Box<dyn Error + Send + Sync>),
}
