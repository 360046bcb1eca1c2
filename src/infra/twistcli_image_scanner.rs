use std::{ffi::OsStr, path::Path, process::ExitStatus};

use thiserror::Error;
use tokio::process::Command;

use crate::{
    app::{ImageScanError, ImageScanner},
    domain::{credentials::Credentials, image_reference::ImageReference},
};

#[derive(Error, Debug)]
pub(in crate::infra) enum TwistcliImageScannerError {
    #[error("error executing the command: {0}")]
    CommandExecution(#[from] std::io::Error),

    #[error("twistcli failed with {0}")]
    ScannerFailed(ExitStatus),
}

impl From<TwistcliImageScannerError> for ImageScanError {
    fn from(value: TwistcliImageScannerError) -> Self {
        ImageScanError::InternalScannerError(Box::new(value))
    }
}

#[derive(Clone)]
pub struct TwistcliImageScanner {
    console_url: String,
}

impl TwistcliImageScanner {
    pub fn new(console_url: String) -> Self {
        Self { console_url }
    }

    /// Arguments are handed to the process as a list, nothing goes through a
    /// shell.
    fn arguments<'a>(
        &'a self,
        image: &'a ImageReference,
        credentials: &'a Credentials,
        output_file: &'a Path,
    ) -> [&'a OsStr; 12] {
        [
            OsStr::new("images"),
            OsStr::new("scan"),
            OsStr::new("-u"),
            OsStr::new(credentials.username()),
            OsStr::new("-p"),
            OsStr::new(credentials.password()),
            OsStr::new("--details"),
            OsStr::new("--address"),
            OsStr::new(self.console_url.as_str()),
            OsStr::new("--output-file"),
            output_file.as_os_str(),
            OsStr::new(image.as_str()),
        ]
    }

    async fn scan(
        &self,
        scanner_path: &Path,
        image: &ImageReference,
        credentials: &Credentials,
        output_file: &Path,
    ) -> Result<(), TwistcliImageScannerError> {
        let status = Command::new(scanner_path)
            .args(self.arguments(image, credentials, output_file))
            .kill_on_drop(true)
            .status()
            .await?;

        if !status.success() {
            return Err(TwistcliImageScannerError::ScannerFailed(status));
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl ImageScanner for TwistcliImageScanner {
    async fn scan_image(
        &self,
        scanner_path: &Path,
        image: &ImageReference,
        credentials: &Credentials,
        output_file: &Path,
    ) -> Result<(), ImageScanError> {
        Ok(self
            .scan(scanner_path, image, credentials, output_file)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use serial_test::serial;

    use super::TwistcliImageScanner;
    use crate::{
        app::ImageScanner,
        domain::{credentials::Credentials, image_reference::ImageReference},
    };

    #[cfg(unix)]
    fn fake_twistcli(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("twistcli");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn it_builds_the_scan_arguments() {
        let scanner = TwistcliImageScanner::new("https://console.example.com".to_string());
        let image = ImageReference::from("alpine:latest");
        let credentials = Credentials::new("scanner", "s3cr3t");

        let args: Vec<String> = scanner
            .arguments(&image, &credentials, Path::new("/tmp/alpine_latest.json"))
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            args,
            vec![
                "images",
                "scan",
                "-u",
                "scanner",
                "-p",
                "s3cr3t",
                "--details",
                "--address",
                "https://console.example.com",
                "--output-file",
                "/tmp/alpine_latest.json",
                "alpine:latest",
            ]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    #[serial]
    async fn it_passes_hostile_values_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let args_file = dir.path().join("args.txt");
        let twistcli = fake_twistcli(
            dir.path(),
            &format!("printf '%s\\n' \"$@\" > '{}'", args_file.display()),
        );
        let scanner = TwistcliImageScanner::new("https://console.example.com".to_string());
        let image = ImageReference::from("alpine:latest; touch /tmp/pwned");
        let credentials = Credentials::new("scanner", "pa$$ word`id`");

        scanner
            .scan_image(
                &twistcli,
                &image,
                &credentials,
                &dir.path().join("report.json"),
            )
            .await
            .unwrap();

        let recorded = std::fs::read_to_string(&args_file).unwrap();
        let recorded: Vec<&str> = recorded.lines().collect();
        assert_eq!(recorded.len(), 12);
        assert_eq!(recorded[5], "pa$$ word`id`");
        assert_eq!(recorded[11], "alpine:latest; touch /tmp/pwned");
    }

    #[cfg(unix)]
    #[tokio::test]
    #[serial]
    async fn it_fails_when_the_scanner_exits_with_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let twistcli = fake_twistcli(dir.path(), "exit 3");
        let scanner = TwistcliImageScanner::new("https://console.example.com".to_string());

        let result = scanner
            .scan_image(
                &twistcli,
                &ImageReference::from("alpine:latest"),
                &Credentials::new("scanner", "s3cr3t"),
                &dir.path().join("report.json"),
            )
            .await;

        assert_eq!(
            result.unwrap_err().to_string(),
            "error in the scanner execution: twistcli failed with exit status: 3"
        );
    }

    #[tokio::test]
    async fn it_fails_when_the_scanner_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let scanner = TwistcliImageScanner::new("https://console.example.com".to_string());

        let result = scanner
            .scan_image(
                &dir.path().join("no-twistcli-here"),
                &ImageReference::from("alpine:latest"),
                &Credentials::new("scanner", "s3cr3t"),
                &dir.path().join("report.json"),
            )
            .await;

        assert!(
            result
                .unwrap_err()
                .to_string()
                .starts_with("error in the scanner execution: error executing the command:")
        );
    }
}
