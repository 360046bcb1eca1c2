use thiserror::Error;

use crate::domain::credentials::Credentials;

use super::EnvironmentReader;

pub const USERNAME_ENV_VAR: &str = "TWISTLOCK_USER";
pub const PASSWORD_ENV_VAR: &str = "TWISTLOCK_PASS";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("env var not found: {0}")]
    MissingEnvVar(&'static str),
}

pub fn load_credentials(
    environment: &dyn EnvironmentReader,
) -> Result<Credentials, CredentialsError> {
    let username = required(environment, USERNAME_ENV_VAR)?;
    let password = required(environment, PASSWORD_ENV_VAR)?;

    Ok(Credentials::new(username, password))
}

fn required(
    environment: &dyn EnvironmentReader,
    key: &'static str,
) -> Result<String, CredentialsError> {
    environment
        .read(key)
        .filter(|value| !value.is_empty())
        .ok_or(CredentialsError::MissingEnvVar(key))
}
