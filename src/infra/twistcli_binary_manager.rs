use std::ffi::OsString;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    app::{ScannerInstallError, ScannerInstaller},
    domain::credentials::Credentials,
};

const LINUX_DOWNLOAD_PATH: &str = "api/v1/util/twistcli";
const MACOS_DOWNLOAD_PATH: &str = "api/v1/util/osx/twistcli";

#[derive(Error, Debug)]
pub(in crate::infra) enum TwistcliBinaryManagerError {
    #[error("operating system {0} is not supported, current supported systems are linux and macos")]
    UnsupportedOS(String),

    #[error("i/o error: {0}")]
    IOError(#[from] std::io::Error),

    #[error("error performing http request: {0}")]
    HTTPError(#[from] reqwest::Error),

    #[error("the console returned an empty body for {0}")]
    EmptyDownload(String),
}

impl From<TwistcliBinaryManagerError> for ScannerInstallError {
    fn from(value: TwistcliBinaryManagerError) -> Self {
        ScannerInstallError::InstallerError(Box::new(value))
    }
}

/// Keeps twistcli available at a fixed path, downloading it from the scan
/// console the first time it is needed.
#[derive(Clone)]
pub struct TwistcliBinaryManager {
    binary_path: PathBuf,
    console_url: String,
    http_client: reqwest::Client,
}

impl TwistcliBinaryManager {
    pub fn new(
        binary_path: PathBuf,
        console_url: String,
        accept_invalid_certs: bool,
    ) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;

        Ok(Self::with_client(binary_path, console_url, http_client))
    }

    pub fn with_client(
        binary_path: PathBuf,
        console_url: String,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            binary_path,
            console_url,
            http_client,
        }
    }

    async fn install_if_missing(
        &self,
        credentials: &Credentials,
    ) -> Result<PathBuf, TwistcliBinaryManagerError> {
        match tokio::fs::metadata(&self.binary_path).await {
            Ok(metadata) if metadata.is_file() => {
                self.ensure_executable(metadata.permissions()).await?;
            }
            _ => {
                let url = self.download_url(std::env::consts::OS)?;
                self.download(&url, credentials).await?;
            }
        }

        Ok(self.binary_path.clone())
    }

    fn download_url(&self, os: &str) -> Result<String, TwistcliBinaryManagerError> {
        let path = match os {
            "linux" => LINUX_DOWNLOAD_PATH,
            "macos" => MACOS_DOWNLOAD_PATH,
            other => return Err(TwistcliBinaryManagerError::UnsupportedOS(other.to_string())),
        };

        Ok(format!("{}/{path}", self.console_url.trim_end_matches('/')))
    }

    async fn download(
        &self,
        url: &str,
        credentials: &Credentials,
    ) -> Result<(), TwistcliBinaryManagerError> {
        info!("downloading twistcli to path: {}", self.binary_path.display());
        info!("download url: {url}");

        let response = self
            .http_client
            .get(url)
            .basic_auth(credentials.username(), Some(credentials.password()))
            .send()
            .await?
            .error_for_status()?;
        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(TwistcliBinaryManagerError::EmptyDownload(url.to_string()));
        }

        if let Some(parent_path) = self.binary_path.parent() {
            tokio::fs::create_dir_all(parent_path).await?;
        }

        let partial_path = self.partial_path();
        tokio::fs::write(&partial_path, &body).await?;
        #[cfg(unix)]
        tokio::fs::set_permissions(&partial_path, std::fs::Permissions::from_mode(0o755)).await?;
        tokio::fs::rename(&partial_path, &self.binary_path).await?;

        Ok(())
    }

    #[cfg(unix)]
    async fn ensure_executable(
        &self,
        permissions: std::fs::Permissions,
    ) -> Result<(), TwistcliBinaryManagerError> {
        if permissions.mode() & 0o111 == 0 {
            warn!(
                "twistcli at {} is not executable, fixing its permissions",
                self.binary_path.display()
            );
            tokio::fs::set_permissions(&self.binary_path, std::fs::Permissions::from_mode(0o755))
                .await?;
        }
        Ok(())
    }

    #[cfg(not(unix))]
    async fn ensure_executable(
        &self,
        _permissions: std::fs::Permissions,
    ) -> Result<(), TwistcliBinaryManagerError> {
        Ok(())
    }

    fn partial_path(&self) -> PathBuf {
        partial_path_for(&self.binary_path)
    }
}

fn partial_path_for(binary_path: &Path) -> PathBuf {
    let mut partial = OsString::from(binary_path.as_os_str());
    partial.push(".partial");
    PathBuf::from(partial)
}

#[async_trait::async_trait]
impl ScannerInstaller for TwistcliBinaryManager {
    async fn install_if_not_present(
        &self,
        credentials: &Credentials,
    ) -> Result<PathBuf, ScannerInstallError> {
        Ok(self.install_if_missing(credentials).await?)
    }
}
