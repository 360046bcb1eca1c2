use std::collections::HashMap;

/// Read access to environment variables, so the pipeline can be driven by a
/// fixed map in tests instead of the process environment.
pub trait EnvironmentReader {
    fn read(&self, key: &str) -> Option<String>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnvironment;

impl EnvironmentReader for ProcessEnvironment {
    fn read(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvironmentReader for HashMap<String, String> {
    fn read(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}
