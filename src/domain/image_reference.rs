use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref UNFRIENDLY_CHARACTERS: Regex = Regex::new(r"[:/.]+").unwrap();
}

/// A container image reference such as `alpine:latest` or `org/repo:tag`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageReference(String);

impl ImageReference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Every run of `:`, `/` and `.` collapses into a single `_`.
    pub fn report_file_name(&self) -> String {
        let stem = UNFRIENDLY_CHARACTERS.replace_all(&self.0, "_");
        format!("{stem}.json")
    }

    pub fn report_path_in(&self, report_dir: &Path) -> PathBuf {
        report_dir.join(self.report_file_name())
    }

    /// Tag to request when pulling. A bare repository means `latest`, the
    /// engine would otherwise fetch every tag.
    pub fn pull_tag(&self) -> Option<&'static str> {
        if self.has_tag_or_digest() {
            None
        } else {
            Some("latest")
        }
    }

    fn has_tag_or_digest(&self) -> bool {
        if self.0.contains('@') {
            return true;
        }

        // a registry port lives before the first slash, never in the last segment
        self.0
            .rsplit('/')
            .next()
            .is_some_and(|last_segment| last_segment.contains(':'))
    }
}

impl Display for ImageReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageReference {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ImageReference {
    fn from(value: String) -> Self {
        Self(value)
    }
}
